//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by an external `dt` (seconds, ≥ 0)
//! - Seeded RNG only
//! - No rendering, audio, or asset decoding; those sit behind the
//!   `assets`/`audio` boundary traits

pub mod ability;
pub mod collision;
pub mod draw;
pub mod rect;
pub mod state;
pub mod tick;
pub mod transition;
pub mod world;

pub use ability::{Ability, PlaneJumpAbility, PlaneJumpVisual, PlaneShifter, PowerAbility};
pub use collision::{player_hitbox, trunk_hitbox};
pub use draw::{DrawItem, draw_order};
pub use rect::Rect;
pub use state::{
    Acorn, AnimState, Clip, GameEvent, GameState, Ghost, Plane, Player, PoseOverride, ShiftDir,
    SkyStrip, Tree, TreeKind, WorldLayer,
};
pub use tick::{TickInput, tick};
pub use transition::{PlaneTransition, TransitionSample};
