//! Cooldown-based activatable abilities
//!
//! The plane jump is a plain rate-limited ability. The acorn power-up
//! deliberately ignores cooldowns: picking up another acorn while powered
//! extends the remaining time instead of resetting it.

use crate::consts::JUMP_POSE_DURATION;

use super::state::{Plane, ShiftDir};

/// Base cooldown timer. `can_activate` is true whenever the timer has
/// drained to zero; `update` never lets it go negative.
#[derive(Debug, Clone)]
pub struct Ability {
    pub name: &'static str,
    pub cooldown: f32,
    timer: f32,
}

impl Ability {
    pub fn new(name: &'static str, cooldown: f32) -> Self {
        Self {
            name,
            cooldown,
            timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    pub fn can_activate(&self) -> bool {
        self.timer <= 0.0
    }

    /// Restart the cooldown from its full duration
    pub fn trigger_cooldown(&mut self) {
        self.timer = self.cooldown;
    }

    pub fn remaining_cooldown(&self) -> f32 {
        self.timer
    }
}

/// The ability's view of its owner: the current depth plane plus an optional
/// pose-override capability.
pub trait PlaneShifter {
    fn plane(&self) -> Plane;
    fn set_plane(&mut self, plane: Plane);

    /// Capability query; owners without a pose override return `None` and the
    /// jump degrades to a logical plane change.
    fn jump_visual(&mut self) -> Option<&mut dyn PlaneJumpVisual> {
        None
    }
}

/// Optional owner capability: show a toward/away-from-camera pose for a
/// limited time while jumping between planes.
pub trait PlaneJumpVisual {
    fn start_plane_jump_visual(&mut self, direction: ShiftDir, duration: f32);
}

/// Rate-limited plane change. Flips the owner's logical plane one step and
/// starts the pose override; animating the move itself is the session's job.
#[derive(Debug, Clone)]
pub struct PlaneJumpAbility {
    pub ability: Ability,
}

impl PlaneJumpAbility {
    pub fn new(cooldown: f32) -> Self {
        Self {
            ability: Ability::new("plane jump", cooldown),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.ability.update(dt);
    }

    pub fn can_activate(&self) -> bool {
        self.ability.can_activate()
    }

    /// Attempt a plane jump. On cooldown this is a silent no-op. Otherwise
    /// the owner's plane moves one step in `direction` (clamped at the outer
    /// planes), the pose override starts, and the cooldown restarts.
    ///
    /// Returns true if the owner's plane actually changed, so the caller can
    /// kick off the visual transition.
    pub fn try_activate(&mut self, owner: &mut dyn PlaneShifter, direction: ShiftDir) -> bool {
        if !self.ability.can_activate() {
            return false;
        }

        let from = owner.plane();
        let to = from.shifted(direction);
        if to != from {
            owner.set_plane(to);
            log::debug!("plane jump: {from:?} -> {to:?}");
        }

        match owner.jump_visual() {
            Some(visual) => visual.start_plane_jump_visual(direction, JUMP_POSE_DURATION),
            None => log::warn!("{}: owner has no jump pose, continuing without", self.ability.name),
        }

        self.ability.trigger_cooldown();
        to != from
    }
}

/// What a power-up update reported back to the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerChange {
    None,
    Expired,
}

/// Stackable acorn buff. Activation while already active adds the full
/// duration to the remaining time; there is no cap.
#[derive(Debug, Clone)]
pub struct PowerAbility {
    duration: f32,
    active: bool,
    remaining: f32,
}

impl PowerAbility {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            active: false,
            remaining: 0.0,
        }
    }

    /// Returns true when this activation turned the buff on (as opposed to
    /// extending an already-running one); the owner raises its powered flag.
    pub fn activate(&mut self) -> bool {
        if self.active {
            self.remaining += self.duration;
            log::debug!("acorn power extended, {:.2}s remaining", self.remaining);
            false
        } else {
            self.active = true;
            self.remaining = self.duration;
            log::debug!("acorn power activated for {:.1}s", self.duration);
            true
        }
    }

    /// Decay the buff. Reports `Expired` in exactly the call that crosses
    /// zero, so the owner can drop its powered flag in the same tick.
    pub fn update(&mut self, dt: f32) -> PowerChange {
        if !self.active {
            return PowerChange::None;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.active = false;
            return PowerChange::Expired;
        }
        PowerChange::None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
