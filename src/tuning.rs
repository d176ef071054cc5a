//! Data-driven game balance
//!
//! Every gameplay constant shared between the world layers, the player, and
//! the collision resolver lives here, so the balance of the game can be
//! edited in one place (or overridden from a JSON file) without touching
//! simulation code.

use serde::{Deserialize, Serialize};

use crate::sim::{Plane, TreeKind};

/// Immutable gameplay configuration, passed by reference to each simulation
/// component at construction. Defaults match the shipped balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scrolling (px/s) ===
    pub scroll_speed_mid: f32,
    pub scroll_speed_fg: f32,
    pub scroll_speed_bg: f32,
    pub sky_scroll_speed: f32,

    // === Player scale per plane ===
    pub player_scale_mid: f32,
    pub player_scale_fg: f32,
    pub player_scale_bg: f32,

    // === Ground strips ===
    /// Target strip heights in pixels (width follows the source aspect ratio)
    pub strip_height_mid: u32,
    pub strip_height_fg: u32,
    pub strip_height_bg: u32,
    /// Strip top relative to the player's starting feet line
    pub strip_offset_mid: i32,
    pub strip_offset_fg: i32,
    pub strip_offset_bg: i32,
    /// Feet line relative to the strip top
    pub player_offset_mid: i32,
    pub player_offset_fg: i32,
    pub player_offset_bg: i32,
    /// Horizontal gap between consecutive tiles (negative = overlap)
    pub tile_gap_mid: i32,
    pub tile_gap_fg: i32,
    pub tile_gap_bg: i32,
    /// Tiles per strip; enough to cover the screen plus off-screen margin
    pub tiles_per_strip: usize,

    // === Trees ===
    /// Scale applied to the raw tree sprites for the mid plane
    pub tree_mid_scale: f32,
    /// Per-plane size factors relative to the mid-plane tree
    pub tree_fg_factor: f32,
    pub tree_bg_factor: f32,
    /// Tree baseline relative to the plane's feet line
    pub tree_offset_y_mid: i32,
    pub tree_offset_y_bg: i32,
    pub initial_mid_trees: usize,
    pub initial_fg_trees: usize,
    pub initial_bg_trees: usize,
    /// Respawn distance past the right screen edge
    pub tree_respawn_min: i32,
    pub tree_respawn_max: i32,

    // === Trunk hitboxes ===
    /// Trunk width as a fraction of the sprite width
    pub trunk_width_factor: f32,
    /// Oaks have a visibly wider trunk
    pub trunk_width_factor_oak: f32,
    /// Trunk height as a fraction of the sprite height, bottom-aligned
    pub trunk_height_factor: f32,

    // === Player hitbox ===
    /// Fraction of the sprite width/height trimmed off the collision box
    pub player_hitbox_trim_x: f32,
    pub player_hitbox_trim_y: f32,

    // === Player kinematics ===
    pub player_speed: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub frame_duration: f32,

    // === Abilities ===
    pub plane_jump_cooldown: f32,
    pub power_duration: f32,

    // === Plane transition ===
    pub transition_duration: f32,
    /// Peak height of the hop arc at scale 1.0
    pub transition_arc: f32,

    // === Acorns ===
    pub acorn_size: u32,
    pub acorn_spawn_min: i32,
    pub acorn_spawn_max: i32,

    // === Ghosts ===
    pub ghost_size: u32,
    pub ghost_spawn_min: i32,
    pub ghost_spawn_max: i32,
    /// Ghosts float this many pixels above their plane's feet line
    pub ghost_float_height: i32,
    /// Ghosts outrun the ground they float over by this factor
    pub ghost_speed_factor: f32,
    pub ghost_bob_amplitude: f32,
    pub ghost_bob_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_speed_mid: 200.0,
            scroll_speed_fg: 260.0,
            scroll_speed_bg: 100.0,
            sky_scroll_speed: 80.0,

            player_scale_mid: 1.0,
            player_scale_fg: 2.5,
            player_scale_bg: 0.4,

            strip_height_mid: 500,
            strip_height_fg: 1200,
            strip_height_bg: 250,
            strip_offset_mid: -220,
            strip_offset_fg: -350,
            strip_offset_bg: -200,
            player_offset_mid: 220,
            player_offset_fg: 525,
            player_offset_bg: 110,
            tile_gap_mid: -80,
            tile_gap_fg: -180,
            tile_gap_bg: -30,
            tiles_per_strip: 8,

            tree_mid_scale: 0.3,
            tree_fg_factor: 2.0,
            tree_bg_factor: 0.2,
            tree_offset_y_mid: 12,
            tree_offset_y_bg: 0,
            initial_mid_trees: 3,
            initial_fg_trees: 2,
            initial_bg_trees: 2,
            tree_respawn_min: 150,
            tree_respawn_max: 400,

            trunk_width_factor: 0.2,
            trunk_width_factor_oak: 0.33,
            trunk_height_factor: 0.5,

            player_hitbox_trim_x: 0.6,
            player_hitbox_trim_y: 0.2,

            player_speed: 300.0,
            gravity: 1200.0,
            jump_strength: -500.0,
            frame_duration: 0.08,

            plane_jump_cooldown: 0.4,
            power_duration: 5.0,

            transition_duration: 0.5,
            transition_arc: 120.0,

            acorn_size: 60,
            acorn_spawn_min: 300,
            acorn_spawn_max: 700,

            ghost_size: 120,
            ghost_spawn_min: 800,
            ghost_spawn_max: 2000,
            ghost_float_height: 20,
            ghost_speed_factor: 1.6,
            ghost_bob_amplitude: 20.0,
            ghost_bob_rate: 2.0,
        }
    }
}

impl Tuning {
    pub fn scroll_speed(&self, plane: Plane) -> f32 {
        match plane {
            Plane::Foreground => self.scroll_speed_fg,
            Plane::Mid => self.scroll_speed_mid,
            Plane::Background => self.scroll_speed_bg,
        }
    }

    pub fn player_scale(&self, plane: Plane) -> f32 {
        match plane {
            Plane::Foreground => self.player_scale_fg,
            Plane::Mid => self.player_scale_mid,
            Plane::Background => self.player_scale_bg,
        }
    }

    pub fn strip_height(&self, plane: Plane) -> u32 {
        match plane {
            Plane::Foreground => self.strip_height_fg,
            Plane::Mid => self.strip_height_mid,
            Plane::Background => self.strip_height_bg,
        }
    }

    pub fn strip_offset(&self, plane: Plane) -> i32 {
        match plane {
            Plane::Foreground => self.strip_offset_fg,
            Plane::Mid => self.strip_offset_mid,
            Plane::Background => self.strip_offset_bg,
        }
    }

    pub fn player_offset(&self, plane: Plane) -> i32 {
        match plane {
            Plane::Foreground => self.player_offset_fg,
            Plane::Mid => self.player_offset_mid,
            Plane::Background => self.player_offset_bg,
        }
    }

    pub fn tile_gap(&self, plane: Plane) -> i32 {
        match plane {
            Plane::Foreground => self.tile_gap_fg,
            Plane::Mid => self.tile_gap_mid,
            Plane::Background => self.tile_gap_bg,
        }
    }

    /// Tree size relative to the mid-plane variant
    pub fn tree_factor(&self, plane: Plane) -> f32 {
        match plane {
            Plane::Foreground => self.tree_fg_factor,
            Plane::Mid => 1.0,
            Plane::Background => self.tree_bg_factor,
        }
    }

    /// Tree baseline offset below the plane's feet line
    pub fn tree_offset_y(&self, plane: Plane) -> i32 {
        match plane {
            Plane::Background => self.tree_offset_y_bg,
            _ => self.tree_offset_y_mid,
        }
    }

    pub fn initial_trees(&self, plane: Plane) -> usize {
        match plane {
            Plane::Foreground => self.initial_fg_trees,
            Plane::Mid => self.initial_mid_trees,
            Plane::Background => self.initial_bg_trees,
        }
    }

    /// Trunk width fraction for a tree kind; the single source of truth for
    /// the hitbox policy shared by the world layers and the resolver.
    pub fn trunk_width_factor(&self, kind: TreeKind) -> f32 {
        match kind {
            TreeKind::Oak => self.trunk_width_factor_oak,
            _ => self.trunk_width_factor,
        }
    }
}
