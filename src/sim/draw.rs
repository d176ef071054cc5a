//! Composition policy: back-to-front paint order per frame
//!
//! A pure function of the player's current plane. The sky and the background
//! strip always paint first; the mid and foreground strips move in front of
//! the player exactly when the player stands on a deeper plane, so occlusion
//! matches depth.

use super::state::Plane;

/// One paint pass. A renderer walks the slice and blits the named group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawItem {
    Sky,
    Ground(Plane),
    Trees(Plane),
    Ghosts(Plane),
    Acorns(Plane),
    Player,
}

use DrawItem::*;
use Plane::{Background, Foreground, Mid};

static FOREGROUND_ORDER: [DrawItem; 12] = [
    Sky,
    Ground(Background),
    Trees(Background),
    Ghosts(Background),
    Ground(Mid),
    Trees(Mid),
    Ghosts(Mid),
    Acorns(Mid),
    Ground(Foreground),
    Trees(Foreground),
    Ghosts(Foreground),
    Player,
];

static MID_ORDER: [DrawItem; 12] = [
    Sky,
    Ground(Background),
    Trees(Background),
    Ghosts(Background),
    Ground(Mid),
    Trees(Mid),
    Ghosts(Mid),
    Acorns(Mid),
    Player,
    Ground(Foreground),
    Trees(Foreground),
    Ghosts(Foreground),
];

static BACKGROUND_ORDER: [DrawItem; 12] = [
    Sky,
    Ground(Background),
    Trees(Background),
    Ghosts(Background),
    Player,
    Ground(Mid),
    Trees(Mid),
    Ghosts(Mid),
    Acorns(Mid),
    Ground(Foreground),
    Trees(Foreground),
    Ghosts(Foreground),
];

/// Paint order for a frame, keyed by the player's plane
pub fn draw_order(player_plane: Plane) -> &'static [DrawItem] {
    match player_plane {
        Plane::Foreground => &FOREGROUND_ORDER,
        Plane::Mid => &MID_ORDER,
        Plane::Background => &BACKGROUND_ORDER,
    }
}
