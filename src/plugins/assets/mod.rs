//! Asset catalog + the Preload state.
//!
//! ```text
//! OnEnter(Preload): queue every image / spritesheet / clip into AssetCatalog
//! Update(Preload):  poll the catalog
//!                   Ready  -> cut atlas layouts, register animations, -> Menu
//!                   Failed -> PreloadFailure, stay in Preload
//! ```
//!
//! Startup never proceeds with a missing resource: the first failed key is
//! reported on screen and in the log, and Preload stops polling.

use std::fmt;

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::hitbox::FRAME_SIZE;
use crate::common::state::GameState;
use crate::plugins::animation::AnimationRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Background,
    Note,
    Cover,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetKey {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioKey {
    IntroMusic,
    GameMusic,
    NotePickup,
    GameOver,
    Win,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Image(ImageKey),
    Sheet(SheetKey),
    Audio(AudioKey),
}

impl CatalogKey {
    pub fn name(self) -> &'static str {
        match self {
            Self::Image(ImageKey::Background) => "bg-tile",
            Self::Image(ImageKey::Note) => "note",
            Self::Image(ImageKey::Cover) => "cover",
            Self::Sheet(SheetKey::Player) => "player-sheet",
            Self::Sheet(SheetKey::Enemy) => "enemy-sheet",
            Self::Audio(AudioKey::IntroMusic) => "intro-music",
            Self::Audio(AudioKey::GameMusic) => "game-music",
            Self::Audio(AudioKey::NotePickup) => "note-sound",
            Self::Audio(AudioKey::GameOver) => "game-over-sound",
            Self::Audio(AudioKey::Win) => "win-sound",
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A spritesheet image plus its atlas layout.
///
/// The layout is cut once the image is resident, because the grid size comes
/// from the image dimensions.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub image: Handle<Image>,
    pub frame: UVec2,
    pub layout: Option<Handle<TextureAtlasLayout>>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    key: CatalogKey,
    path: &'static str,
    id: UntypedAssetId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Loaded,
    Failed,
}

impl EntryStatus {
    fn from_load_state(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Loaded,
            Some(LoadState::Failed(_)) => Self::Failed,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProgress {
    Loading { loaded: usize, total: usize },
    Ready,
    Failed { key: CatalogKey, path: String },
}

/// Every requested asset, addressable by key.
#[derive(Resource, Debug, Default)]
pub struct AssetCatalog {
    images: HashMap<ImageKey, Handle<Image>>,
    sheets: HashMap<SheetKey, SpriteSheet>,
    audio: HashMap<AudioKey, Handle<AudioSource>>,
    entries: Vec<CatalogEntry>,
}

impl AssetCatalog {
    pub fn load_image(&mut self, server: &AssetServer, key: ImageKey, path: &'static str) {
        let handle: Handle<Image> = server.load(path);
        self.track(CatalogKey::Image(key), path, handle.id().untyped());
        self.images.insert(key, handle);
    }

    pub fn load_spritesheet(
        &mut self,
        server: &AssetServer,
        key: SheetKey,
        path: &'static str,
        frame: UVec2,
    ) {
        let image: Handle<Image> = server.load(path);
        self.track(CatalogKey::Sheet(key), path, image.id().untyped());
        self.sheets.insert(
            key,
            SpriteSheet {
                image,
                frame,
                layout: None,
            },
        );
    }

    pub fn load_audio(&mut self, server: &AssetServer, key: AudioKey, path: &'static str) {
        let handle: Handle<AudioSource> = server.load(path);
        self.track(CatalogKey::Audio(key), path, handle.id().untyped());
        self.audio.insert(key, handle);
    }

    fn track(&mut self, key: CatalogKey, path: &'static str, id: UntypedAssetId) {
        self.entries.retain(|e| e.key != key);
        self.entries.push(CatalogEntry { key, path, id });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn image(&self, key: ImageKey) -> Option<Handle<Image>> {
        self.images.get(&key).cloned()
    }

    pub fn sheet(&self, key: SheetKey) -> Option<&SpriteSheet> {
        self.sheets.get(&key)
    }

    pub fn audio(&self, key: AudioKey) -> Option<Handle<AudioSource>> {
        self.audio.get(&key).cloned()
    }

    /// Sprite showing frame `index` of a sheet, once its layout exists.
    pub fn atlas_sprite(&self, key: SheetKey, index: usize) -> Option<Sprite> {
        let sheet = self.sheets.get(&key)?;
        let layout = sheet.layout.clone()?;
        Some(Sprite::from_atlas_image(
            sheet.image.clone(),
            TextureAtlas { layout, index },
        ))
    }

    pub fn progress(&self, server: &AssetServer) -> CatalogProgress {
        summarize(self.entries.iter().map(|e| {
            let status = EntryStatus::from_load_state(server.get_load_state(e.id));
            (e.key, e.path, status)
        }))
    }

    /// Cut an atlas layout for every resident sheet that lacks one.
    pub fn build_layouts(
        &mut self,
        images: &Assets<Image>,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) {
        for sheet in self.sheets.values_mut() {
            if sheet.layout.is_some() {
                continue;
            }
            let Some(image) = images.get(&sheet.image) else {
                continue;
            };
            let grid = grid_dims(image.size(), sheet.frame);
            let layout = TextureAtlasLayout::from_grid(sheet.frame, grid.x, grid.y, None, None);
            sheet.layout = Some(layouts.add(layout));
        }
    }
}

/// First failure wins; otherwise ready once everything is loaded.
fn summarize<'a>(
    entries: impl IntoIterator<Item = (CatalogKey, &'a str, EntryStatus)>,
) -> CatalogProgress {
    let mut loaded = 0;
    let mut total = 0;
    for (key, path, status) in entries {
        total += 1;
        match status {
            EntryStatus::Failed => {
                return CatalogProgress::Failed {
                    key,
                    path: path.to_owned(),
                };
            }
            EntryStatus::Loaded => loaded += 1,
            EntryStatus::Pending => {}
        }
    }
    if loaded == total {
        CatalogProgress::Ready
    } else {
        CatalogProgress::Loading { loaded, total }
    }
}

/// Columns x rows of whole frames in an image. Never zero.
fn grid_dims(image_size: UVec2, frame: UVec2) -> UVec2 {
    (image_size / frame.max(UVec2::ONE)).max(UVec2::ONE)
}

/// Set when an asset failed to load; Preload stays put while it exists.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct PreloadFailure {
    pub key: CatalogKey,
    pub path: String,
}

#[derive(Component)]
struct PreloadText;

pub fn plugin(app: &mut App) {
    app.init_resource::<AssetCatalog>()
        .add_systems(OnEnter(GameState::Preload), (queue_assets, spawn_loading_text))
        .add_systems(
            Update,
            poll_catalog
                .run_if(in_state(GameState::Preload))
                .run_if(not(resource_exists::<PreloadFailure>)),
        );
}

fn queue_assets(server: Res<AssetServer>, mut catalog: ResMut<AssetCatalog>) {
    catalog.load_audio(&server, AudioKey::IntroMusic, "sounds/intro.ogg");
    catalog.load_audio(&server, AudioKey::GameMusic, "sounds/soundtrack.ogg");
    catalog.load_audio(&server, AudioKey::NotePickup, "sounds/note-sound.ogg");
    catalog.load_audio(&server, AudioKey::GameOver, "sounds/over.ogg");
    catalog.load_audio(&server, AudioKey::Win, "sounds/win.ogg");

    catalog.load_image(&server, ImageKey::Background, "images/background.png");
    catalog.load_image(&server, ImageKey::Note, "images/note.png");
    catalog.load_image(&server, ImageKey::Cover, "images/cover.png");

    let frame = FRAME_SIZE.as_uvec2();
    catalog.load_spritesheet(
        &server,
        SheetKey::Player,
        "images/spritesheets/player_spritesheet.png",
        frame,
    );
    catalog.load_spritesheet(
        &server,
        SheetKey::Enemy,
        "images/spritesheets/enemy_spritesheet.png",
        frame,
    );

    info!("Queued {} assets", catalog.len());
}

fn spawn_loading_text(mut commands: Commands) {
    commands.spawn((
        Name::new("LoadingText"),
        PreloadText,
        Text2d::new("Loading..."),
        TextFont::from_font_size(24.0),
        TextColor(Color::srgb_u8(0xe2, 0xf3, 0xe4)),
        Transform::from_xyz(0.0, 0.0, 1.0),
        DespawnOnExit(GameState::Preload),
    ));
}

fn poll_catalog(
    mut commands: Commands,
    server: Res<AssetServer>,
    mut catalog: ResMut<AssetCatalog>,
    images: Res<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut registry: ResMut<AnimationRegistry>,
    mut text: Query<&mut Text2d, With<PreloadText>>,
    mut next: ResMut<NextState<GameState>>,
) {
    match catalog.progress(&server) {
        CatalogProgress::Loading { loaded, total } => {
            debug!("Loading assets: {loaded}/{total}");
        }
        CatalogProgress::Failed { key, path } => {
            error!("Failed to load asset '{key}' from '{path}'; startup halted");
            for mut t in &mut text {
                t.0 = format!("Failed to load '{key}'");
            }
            commands.insert_resource(PreloadFailure { key, path });
        }
        CatalogProgress::Ready => {
            catalog.build_layouts(&images, &mut layouts);
            if registry.register_defaults() {
                info!("Registered {} animation clips", registry.len());
            }
            info!("All {} assets resident", catalog.len());
            next.set(GameState::Menu);
        }
    }
}
