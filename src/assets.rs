//! Image-provider boundary
//!
//! The simulation never decodes pixels. It asks an [`ImageProvider`] for
//! opaque handles carrying pixel dimensions, and derives plane-specific
//! variants (scaled, tinted) through the same interface at spawn and respawn
//! time. A provider must never fail: a missing or malformed asset is
//! substituted with a deterministic fixed-size placeholder.

pub const GROUND_SPRITE: &str = "assets/world/ground.png";
pub const SKY_SPRITE: &str = "assets/world/sky.png";
pub const TREE_SPRITES: [&str; 3] = [
    "assets/world/tree1.png",
    "assets/world/tree2.png",
    "assets/world/tree3.png",
];
pub const ACORN_SPRITE: &str = "assets/world/acorn.png";
pub const GHOST_SPRITE: &str = "assets/world/ghost.png";
pub const PLAYER_RUN_SPRITE: &str = "assets/player/run.png";

/// Frames in the player run cycle
pub const RUN_FRAME_COUNT: usize = 6;

/// Fallback dimensions when an asset cannot be resolved
pub const PLACEHOLDER_SIZE: (u32, u32) = (64, 64);

/// RGBA multiply tint for foreground entities (darkened silhouette)
pub const FOREGROUND_TINT: [u8; 4] = [160, 160, 160, 255];
/// RGBA multiply tint for background entities (grey-blue haze)
pub const BACKGROUND_TINT: [u8; 4] = [140, 140, 160, 255];

/// Opaque handle to a 2D surface owned by the provider, plus its pixel size.
/// Cheap to copy; the simulation stores these on entities so collision rects
/// can follow sprite geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub id: u32,
    pub w: u32,
    pub h: u32,
}

/// Loading, scaling and tinting live outside the simulation. Implementations
/// must be total: on failure they return a placeholder instead of an error.
pub trait ImageProvider {
    fn load(&mut self, path: &str) -> Image;
    fn scale(&mut self, image: Image, w: u32, h: u32) -> Image;
    fn tint(&mut self, image: Image, rgba: [u8; 4]) -> Image;
}

/// Tint applied to entities on a given plane, if any
pub fn plane_tint(plane: crate::sim::Plane) -> Option<[u8; 4]> {
    use crate::sim::Plane;
    match plane {
        Plane::Foreground => Some(FOREGROUND_TINT),
        Plane::Mid => None,
        Plane::Background => Some(BACKGROUND_TINT),
    }
}

/// Headless provider used by the native demo and the test suite. Every asset
/// resolves to a placeholder surface with a fixed catalog size, so the
/// simulation sees the same geometry a real decoder would produce.
#[derive(Debug, Default)]
pub struct Placeholders {
    next_id: u32,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    fn intrinsic_size(path: &str) -> (u32, u32) {
        match path {
            GROUND_SPRITE => (1024, 512),
            SKY_SPRITE => (1600, 800),
            p if TREE_SPRITES.contains(&p) => (800, 1200),
            ACORN_SPRITE => (128, 128),
            GHOST_SPRITE => (256, 256),
            PLAYER_RUN_SPRITE => (250, 110),
            _ => PLACEHOLDER_SIZE,
        }
    }

    fn register(&mut self, w: u32, h: u32) -> Image {
        let id = self.next_id;
        self.next_id += 1;
        Image { id, w, h }
    }
}

impl ImageProvider for Placeholders {
    fn load(&mut self, path: &str) -> Image {
        let (w, h) = Self::intrinsic_size(path);
        self.register(w, h)
    }

    fn scale(&mut self, _image: Image, w: u32, h: u32) -> Image {
        self.register(w.max(1), h.max(1))
    }

    fn tint(&mut self, image: Image, _rgba: [u8; 4]) -> Image {
        self.register(image.w, image.h)
    }
}
