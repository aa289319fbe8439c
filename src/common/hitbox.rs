//! Collision boxes measured against a spritesheet frame.
//!
//! Offsets follow the art convention: measured from the frame's top-left
//! corner with y pointing down. `collider` converts that into a centred,
//! y-up avian collider.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Every spritesheet in the game uses square 129px frames.
pub const FRAME_SIZE: Vec2 = Vec2::splat(129.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub size: Vec2,
    /// Top-left of the box inside the frame. `None` centres it.
    pub offset: Option<Vec2>,
}

impl HitBox {
    pub const fn centered(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: None,
        }
    }

    pub const fn with_offset(width: f32, height: f32, x: f32, y: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Some(Vec2::new(x, y)),
        }
    }

    /// Box centre relative to the frame centre, y-up.
    pub fn center_offset(&self, frame: Vec2) -> Vec2 {
        let Some(offset) = self.offset else {
            return Vec2::ZERO;
        };
        let c = offset + self.size * 0.5 - frame * 0.5;
        Vec2::new(c.x, -c.y)
    }

    pub fn collider(&self, frame: Vec2) -> Collider {
        let shape = Collider::rectangle(self.size.x, self.size.y);
        let center = self.center_offset(frame);
        if center == Vec2::ZERO {
            return shape;
        }
        Collider::compound(vec![(Position::new(center), Rotation::IDENTITY, shape)])
    }
}
