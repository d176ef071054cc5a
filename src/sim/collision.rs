//! Collision detection and per-tick consequences
//!
//! Runs once per tick against the player's current plane only; entities on
//! other planes never collide. Tree checks use a narrowed player box against
//! trunk-only tree boxes so canopy sprites can overlap harmlessly.

use crate::assets::ImageProvider;
use crate::tuning::Tuning;

use super::rect::Rect;
use super::state::{GameEvent, GameState, TreeKind};
use super::world;

/// Narrowed collision box for the player: a vertically tall core well inside
/// the sprite bounds
pub fn player_hitbox(rect: Rect, tuning: &Tuning) -> Rect {
    rect.inflate(
        -(rect.w as f32 * tuning.player_hitbox_trim_x) as i32,
        -(rect.h as f32 * tuning.player_hitbox_trim_y) as i32,
    )
}

/// Trunk-only collision box for a tree: a per-kind fraction of the sprite
/// width, half the sprite height, bottom-aligned with the sprite
pub fn trunk_hitbox(rect: Rect, kind: TreeKind, tuning: &Tuning) -> Rect {
    let trunk_w = (rect.w as f32 * tuning.trunk_width_factor(kind)) as i32;
    let trunk_h = (rect.h as f32 * tuning.trunk_height_factor) as i32;
    Rect::from_midbottom(rect.center_x(), rect.bottom(), trunk_w, trunk_h)
}

impl GameState {
    /// Resolve this tick's collisions against post-scroll, post-transition
    /// positions. The world-exit check pre-empts everything else.
    pub(crate) fn resolve_collisions(&mut self, images: &mut dyn ImageProvider) {
        if self.player.rect.right() < 0 {
            log::info!("player scrolled off the left edge");
            self.restart_requested = true;
            return;
        }

        let plane = self.player.plane;
        let player_rect = self.player.rect;

        // Acorns: collect, power up, recycle the slot off-screen right
        let mut collected = Vec::new();
        for (i, acorn) in self.acorns.iter().enumerate() {
            if acorn.plane == plane && player_rect.intersects(&acorn.rect) {
                collected.push(i);
            }
        }
        for &i in collected.iter().rev() {
            let acorn_plane = self.acorns[i].plane;
            self.acorns.remove(i);
            self.player.collect_acorn();
            self.push_event(GameEvent::AcornCollected { plane: acorn_plane });
            self.spawn_acorn(acorn_plane);
        }

        // Ghosts end the run outright; the acorn power is no defense
        if self
            .ghosts
            .iter()
            .any(|g| g.plane == plane && player_rect.intersects(&g.rect))
        {
            self.restart_requested = true;
            return;
        }

        // Trees: powered players smash through (slot respawns in place),
        // everyone else loses the run on the first blocking trunk
        let hitbox = player_hitbox(player_rect, &self.tuning);
        let Self {
            layers,
            rng,
            tuning,
            events,
            restart_requested,
            player,
            ..
        } = self;
        let layer = &mut layers[plane.index()];
        for slot in 0..layer.trees.len() {
            let tree = &layer.trees[slot];
            let trunk = trunk_hitbox(tree.rect, tree.kind, tuning);
            if !hitbox.intersects(&trunk) {
                continue;
            }
            if player.is_powered {
                let kind = tree.kind;
                world::respawn_tree(layer, slot, rng, tuning, images);
                events.push(GameEvent::TreeSmashed { plane, kind });
            } else {
                *restart_requested = true;
                break;
            }
        }
    }
}
