//! Common, shared types.

pub mod hitbox;
pub mod layers;
pub mod payload;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
