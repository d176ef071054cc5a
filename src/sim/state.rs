//! Game state and core simulation types
//!
//! Everything the simulation mutates per tick lives here. Construction pulls
//! plane-specific sprite variants from the image provider once; respawns
//! re-derive them so a recycled entity never reuses a stale variant.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::{self, Image, ImageProvider};
use crate::consts::*;
use crate::tuning::Tuning;

use super::ability::{PlaneJumpAbility, PlaneJumpVisual, PlaneShifter, PowerAbility, PowerChange};
use super::rect::Rect;
use super::transition::PlaneTransition;

/// Depth plane the player can occupy. Ordered: "up" moves toward the
/// background, "down" toward the foreground, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Plane {
    Foreground = 0,
    Mid = 1,
    Background = 2,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Foreground, Plane::Mid, Plane::Background];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One step toward the background (`Up`) or foreground (`Down`),
    /// saturating at the outer planes
    pub fn shifted(self, direction: ShiftDir) -> Plane {
        match (self, direction) {
            (Plane::Foreground, ShiftDir::Up) => Plane::Mid,
            (Plane::Mid, ShiftDir::Up) => Plane::Background,
            (Plane::Background, ShiftDir::Down) => Plane::Mid,
            (Plane::Mid, ShiftDir::Down) => Plane::Foreground,
            (plane, _) => plane,
        }
    }
}

/// Direction of a plane jump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDir {
    /// Away from the camera, toward the background
    Up,
    /// Toward the camera, toward the foreground
    Down,
}

/// Animation clip selected from the player's movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Idle,
    Run,
}

/// Current animation playback position
#[derive(Debug, Clone)]
pub struct AnimState {
    pub clip: Clip,
    pub frame: usize,
    pub timer: f32,
    /// Frames in the run clip (idle is a single frame)
    pub run_frames: usize,
}

impl AnimState {
    fn new(run_frames: usize) -> Self {
        Self {
            clip: Clip::Idle,
            frame: 0,
            timer: 0.0,
            run_frames: run_frames.max(1),
        }
    }

    fn frame_count(&self) -> usize {
        match self.clip {
            Clip::Idle => 1,
            Clip::Run => self.run_frames,
        }
    }
}

/// Time-boxed pose shown instead of the run animation during a plane jump
#[derive(Debug, Clone, Copy)]
pub struct PoseOverride {
    pub direction: ShiftDir,
    pub remaining: f32,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Integer bounds, synced from `pos` after every update
    pub rect: Rect,
    /// Precise feet-center position (x = center, y = feet line)
    pub pos: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub plane: Plane,
    /// Feet line of the current plane; reassigned on every plane change
    pub ground_y: f32,
    pub facing_right: bool,
    pub anim: AnimState,
    pub pose_override: Option<PoseOverride>,
    pub is_powered: bool,
    pub power: PowerAbility,
}

impl Player {
    pub fn new(feet_x: f32, feet_y: f32, tuning: &Tuning) -> Self {
        let rect = Rect::from_midbottom(
            feet_x.round() as i32,
            feet_y.round() as i32,
            PLAYER_WIDTH,
            PLAYER_HEIGHT,
        );
        Self {
            rect,
            pos: Vec2::new(feet_x, feet_y),
            vel: Vec2::ZERO,
            on_ground: true,
            plane: Plane::Mid,
            ground_y: feet_y,
            facing_right: true,
            anim: AnimState::new(assets::RUN_FRAME_COUNT),
            pose_override: None,
            is_powered: false,
            power: PowerAbility::new(tuning.power_duration),
        }
    }

    /// Translate held movement keys into horizontal velocity
    pub fn handle_input(&mut self, left: bool, right: bool, tuning: &Tuning) {
        self.vel.x = 0.0;
        if left {
            self.vel.x = -tuning.player_speed;
            self.facing_right = false;
        } else if right {
            self.vel.x = tuning.player_speed;
            self.facing_right = true;
        }
    }

    /// Vertical hop within the current plane
    pub fn jump(&mut self, tuning: &Tuning) {
        if self.on_ground {
            self.vel.y = tuning.jump_strength;
            self.on_ground = false;
        }
    }

    /// Advance kinematics, animation, pose override and the acorn power.
    /// While a plane transition positions the player, `gravity_enabled` is
    /// false and vertical physics pauses entirely.
    pub fn update(&mut self, dt: f32, gravity_enabled: bool, tuning: &Tuning) {
        self.pos.x += self.vel.x * dt;

        if gravity_enabled {
            self.vel.y += tuning.gravity * dt;
            self.pos.y += self.vel.y * dt;

            if self.pos.y >= self.ground_y {
                self.pos.y = self.ground_y;
                self.vel.y = 0.0;
                self.on_ground = true;
            } else {
                self.on_ground = false;
            }
        }

        // Clip selection follows horizontal movement
        if self.vel.x != 0.0 {
            self.anim.clip = Clip::Run;
            self.anim.timer += dt;
            while self.anim.timer >= tuning.frame_duration {
                self.anim.timer -= tuning.frame_duration;
                self.anim.frame += 1;
            }
        } else {
            self.anim.clip = Clip::Idle;
            self.anim.frame = 0;
            self.anim.timer = 0.0;
        }
        self.anim.frame %= self.anim.frame_count();

        if let Some(pose) = &mut self.pose_override {
            pose.remaining -= dt;
            if pose.remaining <= 0.0 {
                self.pose_override = None;
            }
        }

        if self.power.update(dt) == PowerChange::Expired {
            self.is_powered = false;
        }

        self.sync_rect();
    }

    /// Called by the resolver when the player picks up an acorn
    pub fn collect_acorn(&mut self) {
        if self.power.activate() {
            self.is_powered = true;
        }
    }

    /// Mirror the precise position into the integer collision rect
    pub fn sync_rect(&mut self) {
        self.rect
            .set_midbottom(self.pos.x.round() as i32, self.pos.y.round() as i32);
    }
}

impl PlaneShifter for Player {
    fn plane(&self) -> Plane {
        self.plane
    }

    fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }

    fn jump_visual(&mut self) -> Option<&mut dyn PlaneJumpVisual> {
        Some(self)
    }
}

impl PlaneJumpVisual for Player {
    fn start_plane_jump_visual(&mut self, direction: ShiftDir, duration: f32) {
        self.pose_override = Some(PoseOverride {
            direction,
            remaining: duration,
        });
    }
}

/// Tree species; `Oak` carries a wider trunk hitbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Aspen = 0,
    Birch = 1,
    Oak = 2,
}

impl TreeKind {
    pub const ALL: [TreeKind; 3] = [TreeKind::Aspen, TreeKind::Birch, TreeKind::Oak];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A tree obstacle slot. Destroyed or scrolled-out trees are respawned in
/// place with a fresh kind and a freshly derived plane variant; the slot
/// itself is never deallocated.
#[derive(Debug, Clone)]
pub struct Tree {
    pub image: Image,
    pub rect: Rect,
    pub kind: TreeKind,
}

/// Collectible acorn, tagged with its home plane
#[derive(Debug, Clone)]
pub struct Acorn {
    pub image: Image,
    pub rect: Rect,
    pub plane: Plane,
    /// Precise center x; the rect is synced from it
    pub x: f32,
}

/// Roaming ghost enemy with a sinusoidal vertical bob
#[derive(Debug, Clone)]
pub struct Ghost {
    pub image: Image,
    pub rect: Rect,
    pub plane: Plane,
    pub x: f32,
    pub base_y: f32,
    pub phase: f32,
}

/// One scrolling ground strip plus its obstacle pool
#[derive(Debug, Clone)]
pub struct WorldLayer {
    pub plane: Plane,
    pub ground_image: Image,
    /// Top edge of the ground strip
    pub strip_top: i32,
    /// Feet line for the player on this plane
    pub ground_y: i32,
    /// Baseline trees and acorns stand on
    pub tree_line: i32,
    pub tiles: Vec<Rect>,
    pub trees: Vec<Tree>,
    /// Mid-scale tree sprites, indexed by kind; plane variants are derived
    /// from these at every (re)spawn
    pub tree_bases: [Image; 3],
    /// Sub-pixel scroll remainder carried between ticks
    pub scroll_accum: f32,
}

/// Plane-independent sky backdrop, scrolling slower than every ground plane
#[derive(Debug, Clone)]
pub struct SkyStrip {
    pub image: Image,
    pub tiles: Vec<Rect>,
    pub scroll_accum: f32,
}

/// Things that happened during a tick that the outside world may want to
/// react to (sound cues, HUD flashes). Drained by the caller after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    AcornCollected { plane: Plane },
    TreeSmashed { plane: Plane, kind: TreeKind },
    PlaneJumped { from: Plane, to: Plane },
}

/// Complete session state for one run
#[derive(Debug)]
pub struct GameState {
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub time_ticks: u64,
    /// Countdown before the world starts moving
    pub countdown: f32,
    pub scrolling: bool,
    pub player: Player,
    pub plane_jump: PlaneJumpAbility,
    /// Indexed by `Plane::index()`
    pub layers: [WorldLayer; 3],
    pub sky: SkyStrip,
    pub acorns: Vec<Acorn>,
    pub ghosts: Vec<Ghost>,
    pub transition: Option<PlaneTransition>,
    /// Visual scale the player is currently drawn at
    pub current_scale: f32,
    /// Raised by the resolver; read (and acted on) by the session controller
    pub restart_requested: bool,
    pub events: Vec<GameEvent>,
    /// Mid-plane sprites that respawns re-derive plane variants from
    pub acorn_image: Image,
    pub ghost_image: Image,
}

impl GameState {
    /// Build a fresh session. All sprite variants are derived through the
    /// image provider here and at respawn time; the simulation itself never
    /// touches pixel data.
    pub fn new(seed: u64, tuning: Tuning, images: &mut dyn ImageProvider) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let feet_x = (SCREEN_WIDTH / 2) as f32;
        let feet_y = ((SCREEN_HEIGHT + PLAYER_HEIGHT) / 2) as f32;
        let player = Player::new(feet_x, feet_y, &tuning);

        let layers = [
            WorldLayer::generate(Plane::Foreground, feet_y, &tuning, images, &mut rng),
            WorldLayer::generate(Plane::Mid, feet_y, &tuning, images, &mut rng),
            WorldLayer::generate(Plane::Background, feet_y, &tuning, images, &mut rng),
        ];
        let sky = SkyStrip::generate(images);

        let acorn_raw = images.load(assets::ACORN_SPRITE);
        let acorn_image = images.scale(acorn_raw, tuning.acorn_size, tuning.acorn_size);
        let ghost_raw = images.load(assets::GHOST_SPRITE);
        let ghost_image = images.scale(ghost_raw, tuning.ghost_size, tuning.ghost_size);

        let current_scale = tuning.player_scale(Plane::Mid);
        let plane_jump = PlaneJumpAbility::new(tuning.plane_jump_cooldown);

        let mut state = Self {
            seed,
            rng,
            tuning,
            time_ticks: 0,
            countdown: START_COUNTDOWN,
            scrolling: false,
            player,
            plane_jump,
            layers,
            sky,
            acorns: Vec::new(),
            ghosts: Vec::new(),
            transition: None,
            current_scale,
            restart_requested: false,
            events: Vec::new(),
            acorn_image,
            ghost_image,
        };

        state.player.ground_y = state.layer(Plane::Mid).ground_y as f32;
        state.player.pos.y = state.player.ground_y;
        state.player.sync_rect();

        state.spawn_acorn(Plane::Mid);
        state.spawn_ghost(images);

        state
    }

    #[inline]
    pub fn layer(&self, plane: Plane) -> &WorldLayer {
        &self.layers[plane.index()]
    }

    #[inline]
    pub fn layer_mut(&mut self, plane: Plane) -> &mut WorldLayer {
        &mut self.layers[plane.index()]
    }

    /// Feet line for a plane, as established at layer construction
    pub fn ground_y(&self, plane: Plane) -> f32 {
        self.layer(plane).ground_y as f32
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the tick's events to the caller (sound cues etc.)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn random_range(&mut self, min: i32, max: i32) -> i32 {
        self.rng.random_range(min..=max)
    }

    pub(crate) fn random_plane(&mut self) -> Plane {
        Plane::ALL[self.rng.random_range(0..Plane::ALL.len())]
    }
}
