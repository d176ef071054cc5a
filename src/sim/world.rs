//! Scrolling world layers: ground tiles, trees, acorns, ghosts, sky
//!
//! Each plane owns an endless ground strip built from a handful of recycling
//! tiles, plus a fixed pool of tree slots. Nothing is ever deallocated while
//! a session runs: tiles wrap from the left edge to the right end of the
//! strip, and tree slots are respawned in place with a fresh kind and a
//! freshly derived plane variant.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::assets::{self, Image, ImageProvider};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::Tuning;

use super::rect::Rect;
use super::state::{GameState, Ghost, Plane, SkyStrip, Tree, TreeKind, WorldLayer};

/// Derive the drawable variant of a mid-scale tree sprite for a plane:
/// foreground trees are enlarged and darkened, background trees shrunk and
/// hazed, mid trees use the base as-is.
pub(crate) fn derive_tree_image(
    images: &mut dyn ImageProvider,
    base: Image,
    plane: Plane,
    tuning: &Tuning,
) -> Image {
    let factor = tuning.tree_factor(plane);
    let mut image = if factor != 1.0 {
        let w = ((base.w as f32 * factor).round() as u32).max(1);
        let h = ((base.h as f32 * factor).round() as u32).max(1);
        images.scale(base, w, h)
    } else {
        base
    };
    if let Some(tint) = assets::plane_tint(plane) {
        image = images.tint(image, tint);
    }
    image
}

/// Respawn a tree slot off-screen right with a freshly randomized kind and a
/// re-derived plane variant. Used both when a tree scrolls out and when a
/// powered player smashes one.
pub(crate) fn respawn_tree(
    layer: &mut WorldLayer,
    slot: usize,
    rng: &mut Pcg32,
    tuning: &Tuning,
    images: &mut dyn ImageProvider,
) {
    let kind = TreeKind::ALL[rng.random_range(0..TreeKind::ALL.len())];
    let image = derive_tree_image(images, layer.tree_bases[kind.index()], layer.plane, tuning);
    let x = SCREEN_WIDTH + rng.random_range(tuning.tree_respawn_min..=tuning.tree_respawn_max);
    let rect = Rect::from_midbottom(x, layer.tree_line, image.w as i32, image.h as i32);

    let tree = &mut layer.trees[slot];
    tree.kind = kind;
    tree.image = image;
    tree.rect = rect;
}

impl WorldLayer {
    /// Build one plane's strip and tree pool. `feet_y0` is the player's
    /// starting feet line, the anchor all strip geometry hangs off.
    pub(crate) fn generate(
        plane: Plane,
        feet_y0: f32,
        tuning: &Tuning,
        images: &mut dyn ImageProvider,
        rng: &mut Pcg32,
    ) -> Self {
        let raw = images.load(assets::GROUND_SPRITE);
        let target_h = tuning.strip_height(plane);
        let scale = target_h as f32 / raw.h as f32;
        let target_w = ((raw.w as f32 * scale).round() as u32).max(1);
        let mut ground_image = images.scale(raw, target_w, target_h);
        if let Some(tint) = assets::plane_tint(plane) {
            ground_image = images.tint(ground_image, tint);
        }

        let strip_top = feet_y0.round() as i32 + tuning.strip_offset(plane);
        let ground_y = strip_top + tuning.player_offset(plane);
        let tree_line = ground_y + tuning.tree_offset_y(plane);

        let tile_w = ground_image.w as i32;
        let tile_h = ground_image.h as i32;
        let gap = tuning.tile_gap(plane);
        let start_x = -(tile_w / 2);
        let tiles = (0..tuning.tiles_per_strip)
            .map(|i| Rect::new(start_x + i as i32 * (tile_w + gap), strip_top, tile_w, tile_h))
            .collect();

        let tree_bases = assets::TREE_SPRITES.map(|path| {
            let raw = images.load(path);
            let w = ((raw.w as f32 * tuning.tree_mid_scale).round() as u32).max(1);
            let h = ((raw.h as f32 * tuning.tree_mid_scale).round() as u32).max(1);
            images.scale(raw, w, h)
        });

        let mut layer = Self {
            plane,
            ground_image,
            strip_top,
            ground_y,
            tree_line,
            tiles,
            trees: Vec::with_capacity(tuning.initial_trees(plane)),
            tree_bases,
            scroll_accum: 0.0,
        };

        for _ in 0..tuning.initial_trees(plane) {
            let kind = TreeKind::ALL[rng.random_range(0..TreeKind::ALL.len())];
            let image = derive_tree_image(images, layer.tree_bases[kind.index()], plane, tuning);
            let x = rng.random_range(-SCREEN_WIDTH..=SCREEN_WIDTH * 3);
            let rect = Rect::from_midbottom(x, tree_line, image.w as i32, image.h as i32);
            layer.trees.push(Tree { image, rect, kind });
        }

        layer
    }

    /// Shift tiles and trees left by this tick's scroll, wrap tiles that left
    /// the screen, and report tree slots that need a respawn.
    pub(crate) fn scroll(&mut self, dt: f32, tuning: &Tuning) -> Vec<usize> {
        self.scroll_accum += tuning.scroll_speed(self.plane) * dt;
        let dx = self.scroll_accum.floor() as i32;
        self.scroll_accum -= dx as f32;
        if dx == 0 {
            return Vec::new();
        }

        for tile in &mut self.tiles {
            tile.x -= dx;
        }
        // Wrap tiles past the current rightmost one; max_x must follow each
        // relocation or a multi-tile scroll stacks tiles on the same spot
        let tile_w = self.ground_image.w as i32;
        let gap = tuning.tile_gap(self.plane);
        if let Some(mut max_x) = self.tiles.iter().map(|t| t.x).max() {
            for tile in &mut self.tiles {
                if tile.right() < 0 {
                    tile.x = max_x + tile_w + gap;
                    max_x = tile.x;
                }
            }
        }

        let mut stale = Vec::new();
        for (slot, tree) in self.trees.iter_mut().enumerate() {
            tree.rect.x -= dx;
            if tree.rect.right() < 0 {
                stale.push(slot);
            }
        }
        stale
    }
}

impl SkyStrip {
    pub(crate) fn generate(images: &mut dyn ImageProvider) -> Self {
        let raw = images.load(assets::SKY_SPRITE);
        let scale = SCREEN_HEIGHT as f32 / raw.h as f32;
        let w = ((raw.w as f32 * scale).round() as u32).max(1);
        let image = images.scale(raw, w, SCREEN_HEIGHT as u32);

        let mut tiles = Vec::new();
        let mut x = 0;
        while x < SCREEN_WIDTH * 2 {
            tiles.push(Rect::new(x, 0, image.w as i32, image.h as i32));
            x += image.w as i32;
        }

        Self {
            image,
            tiles,
            scroll_accum: 0.0,
        }
    }

    pub(crate) fn scroll(&mut self, dt: f32, speed: f32) {
        self.scroll_accum += speed * dt;
        let dx = self.scroll_accum.floor() as i32;
        self.scroll_accum -= dx as f32;
        if dx == 0 {
            return;
        }
        for tile in &mut self.tiles {
            tile.x -= dx;
        }
        if let Some(mut max_right) = self.tiles.iter().map(|t| t.right()).max() {
            for tile in &mut self.tiles {
                if tile.right() < 0 {
                    tile.x = max_right;
                    max_right = tile.right();
                }
            }
        }
    }
}

impl GameState {
    /// Advance everything that moves with the scroll: the sky, the three
    /// ground strips and their trees, acorns, ghosts, and the leftward drag
    /// on the player. Runs only after the start countdown has elapsed.
    pub(crate) fn update_world(&mut self, dt: f32, images: &mut dyn ImageProvider) {
        let Self {
            layers,
            sky,
            acorns,
            ghosts,
            player,
            rng,
            tuning,
            ..
        } = self;

        // The world carries the player backward at the current plane's pace
        player.pos.x -= tuning.scroll_speed(player.plane) * dt;
        player.sync_rect();

        sky.scroll(dt, tuning.sky_scroll_speed);

        for layer in layers.iter_mut() {
            for slot in layer.scroll(dt, tuning) {
                respawn_tree(layer, slot, rng, tuning, images);
            }
        }

        for acorn in acorns.iter_mut() {
            acorn.x -= tuning.scroll_speed(acorn.plane) * dt;
            acorn.rect.x = acorn.x.round() as i32 - acorn.rect.w / 2;
            if acorn.rect.right() < 0 {
                let x = SCREEN_WIDTH
                    + rng.random_range(tuning.acorn_spawn_min..=tuning.acorn_spawn_max);
                let tree_line = layers[acorn.plane.index()].tree_line;
                acorn.x = x as f32;
                acorn.rect.set_midbottom(x, tree_line);
            }
        }

        for ghost in ghosts.iter_mut() {
            let pace = tuning.scroll_speed(ghost.plane) * tuning.ghost_speed_factor;
            ghost.x -= pace * dt;
            ghost.phase += tuning.ghost_bob_rate * dt;
            ghost.rect.x = ghost.x.round() as i32 - ghost.rect.w / 2;
            let bob = ghost.phase.sin() * tuning.ghost_bob_amplitude;
            ghost.rect.set_center_y((ghost.base_y + bob).round() as i32);
        }

        // Ghosts that leave the screen are replaced outright, with the home
        // plane re-randomized
        let before = self.ghosts.len();
        self.ghosts.retain(|g| g.rect.right() >= 0);
        for _ in self.ghosts.len()..before {
            self.spawn_ghost(images);
        }
    }

    /// Place a fresh acorn off-screen right. Only the mid plane carries a
    /// live acorn slot; requests for other planes are ignored.
    pub(crate) fn spawn_acorn(&mut self, plane: Plane) {
        if plane != Plane::Mid {
            return;
        }
        let x = SCREEN_WIDTH
            + self.random_range(self.tuning.acorn_spawn_min, self.tuning.acorn_spawn_max);
        let tree_line = self.layer(plane).tree_line;
        let image = self.acorn_image;
        let rect = Rect::from_midbottom(x, tree_line, image.w as i32, image.h as i32);
        self.acorns.push(super::state::Acorn {
            image,
            rect,
            plane,
            x: x as f32,
        });
    }

    /// Spawn a ghost on a uniformly random plane, scaled and tinted to match
    /// it, floating just above that plane's feet line.
    pub(crate) fn spawn_ghost(&mut self, images: &mut dyn ImageProvider) {
        let plane = self.random_plane();
        let rel = self.tuning.player_scale(plane) / self.tuning.player_scale(Plane::Mid);
        let mut image = self.ghost_image;
        if rel != 1.0 {
            let w = ((image.w as f32 * rel).round() as u32).max(1);
            let h = ((image.h as f32 * rel).round() as u32).max(1);
            image = images.scale(image, w, h);
        }
        if let Some(tint) = assets::plane_tint(plane) {
            image = images.tint(image, tint);
        }

        let float_bottom = self.layer(plane).ground_y - self.tuning.ghost_float_height;
        let x = SCREEN_WIDTH
            + self.random_range(self.tuning.ghost_spawn_min, self.tuning.ghost_spawn_max);
        let rect = Rect::from_midbottom(x, float_bottom, image.w as i32, image.h as i32);
        let base_y = rect.center_y() as f32;
        let phase = self.rng.random_range(0.0..std::f32::consts::TAU);

        self.ghosts.push(Ghost {
            image,
            rect,
            plane,
            x: x as f32,
            base_y,
            phase,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Placeholders;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn fresh_state(seed: u64) -> (GameState, Placeholders) {
        let mut images = Placeholders::new();
        let state = GameState::new(seed, Tuning::default(), &mut images);
        (state, images)
    }

    /// Merged tile coverage must span the whole viewport with no gap
    fn assert_viewport_covered(layer: &WorldLayer) {
        let mut tiles: Vec<_> = layer.tiles.clone();
        tiles.sort_by_key(|t| t.x);
        let mut covered_to = i32::MIN;
        for tile in &tiles {
            if tile.right() <= 0 {
                continue;
            }
            if covered_to == i32::MIN {
                assert!(tile.x <= 0, "leftmost on-screen tile starts at {}", tile.x);
            } else {
                assert!(
                    tile.x <= covered_to,
                    "gap before tile at {} (covered to {})",
                    tile.x,
                    covered_to
                );
            }
            covered_to = covered_to.max(tile.right());
            if covered_to >= SCREEN_WIDTH {
                return;
            }
        }
        panic!("viewport covered only to {covered_to}");
    }

    #[test]
    fn test_layers_anchor_to_player_feet() {
        let (state, _) = fresh_state(1);
        // Mid feet line equals the player's starting feet position
        assert_eq!(state.layer(Plane::Mid).ground_y, state.player.rect.bottom());
        // Foreground sits lower on screen, background higher
        assert!(state.layer(Plane::Foreground).ground_y > state.layer(Plane::Mid).ground_y);
        assert!(state.layer(Plane::Background).ground_y < state.layer(Plane::Mid).ground_y);
    }

    #[test]
    fn test_tiles_cover_viewport_through_long_scroll() {
        let (mut state, mut images) = fresh_state(7);
        for _ in 0..3000 {
            state.update_world(SIM_DT, &mut images);
        }
        for layer in &state.layers {
            assert_viewport_covered(layer);
        }
    }

    #[test]
    fn test_tile_recycle_handles_multi_tile_scroll() {
        let (mut state, mut images) = fresh_state(3);
        // One giant step scrolls several tiles off the left edge at once
        state.update_world(12.0, &mut images);
        for layer in &state.layers {
            assert_viewport_covered(layer);
            // No two tiles may land on the same x
            let mut xs: Vec<_> = layer.tiles.iter().map(|t| t.x).collect();
            xs.sort_unstable();
            xs.dedup();
            assert_eq!(xs.len(), layer.tiles.len());
        }
    }

    #[test]
    fn test_tree_respawns_off_screen_right_with_fresh_variant() {
        let (mut state, mut images) = fresh_state(11);
        let tuning = state.tuning.clone();
        for plane in Plane::ALL {
            let layer = state.layer_mut(plane);
            let old_image = layer.trees[0].image;
            layer.trees[0].rect.x = -10_000;
            state.update_world(SIM_DT, &mut images);

            let layer = state.layer(plane);
            let tree = &layer.trees[0];
            let min_x = SCREEN_WIDTH + tuning.tree_respawn_min - tree.rect.w;
            assert!(tree.rect.x >= min_x, "tree respawned at {}", tree.rect.x);
            assert_eq!(tree.rect.bottom(), layer.tree_line);
            // Mid trees use the shared base directly; the outer planes must
            // get a freshly derived variant, never the old instance's image
            if plane == Plane::Mid {
                assert_eq!(tree.image, layer.tree_bases[tree.kind.index()]);
            } else {
                assert_ne!(tree.image.id, old_image.id);
            }
            let expected_w = ((layer.tree_bases[tree.kind.index()].w as f32
                * tuning.tree_factor(plane))
            .round() as u32)
                .max(1);
            assert_eq!(tree.image.w, expected_w);
        }
    }

    #[test]
    fn test_acorn_recycles_when_scrolled_out() {
        let (mut state, mut images) = fresh_state(5);
        state.acorns[0].x = -500.0;
        state.acorns[0].rect.x = -500;
        state.update_world(SIM_DT, &mut images);
        let acorn = &state.acorns[0];
        assert!(acorn.rect.left() >= SCREEN_WIDTH);
        assert_eq!(acorn.rect.bottom(), state.layer(Plane::Mid).tree_line);
    }

    #[test]
    fn test_ghost_outruns_its_plane_and_bobs() {
        let (mut state, mut images) = fresh_state(9);
        let plane = state.ghosts[0].plane;
        let x0 = state.ghosts[0].x;
        let phase0 = state.ghosts[0].phase;
        state.update_world(SIM_DT, &mut images);
        let ghost = &state.ghosts[0];
        let expected_dx =
            state.tuning.scroll_speed(plane) * state.tuning.ghost_speed_factor * SIM_DT;
        assert!((x0 - ghost.x - expected_dx).abs() < 1e-3);
        assert!(ghost.phase > phase0);
        let bob = ghost.phase.sin() * state.tuning.ghost_bob_amplitude;
        assert_eq!(
            ghost.rect.center_y(),
            (ghost.base_y + bob).round() as i32
        );
    }

    #[test]
    fn test_ghost_recycled_with_rerandomized_plane() {
        let (mut state, mut images) = fresh_state(13);
        state.ghosts[0].x = -500.0;
        state.ghosts[0].rect.x = -500;
        state.update_world(SIM_DT, &mut images);
        assert_eq!(state.ghosts.len(), 1);
        assert!(state.ghosts[0].rect.left() >= SCREEN_WIDTH);
    }

    #[test]
    fn test_scroll_drags_player_left() {
        let (mut state, mut images) = fresh_state(17);
        let x0 = state.player.pos.x;
        state.update_world(SIM_DT, &mut images);
        let dragged = x0 - state.player.pos.x;
        let expected = state.tuning.scroll_speed(state.player.plane) * SIM_DT;
        assert!((dragged - expected).abs() < 1e-3);
    }

    #[test]
    fn test_acorn_spawns_only_on_mid() {
        let (mut state, _) = fresh_state(19);
        let before = state.acorns.len();
        state.spawn_acorn(Plane::Foreground);
        state.spawn_acorn(Plane::Background);
        assert_eq!(state.acorns.len(), before);
    }

    proptest! {
        #[test]
        fn prop_tiles_stay_on_pitch_grid(seed in 0u64..1000, steps in 1usize..200) {
            let mut images = Placeholders::new();
            let mut state = GameState::new(seed, Tuning::default(), &mut images);
            for _ in 0..steps {
                state.update_world(SIM_DT, &mut images);
            }
            for layer in &state.layers {
                let pitch = layer.ground_image.w as i32 + state.tuning.tile_gap(layer.plane);
                let mut xs: Vec<_> = layer.tiles.iter().map(|t| t.x).collect();
                xs.sort_unstable();
                for pair in xs.windows(2) {
                    prop_assert_eq!(pair[1] - pair[0], pitch);
                }
            }
        }
    }
}
