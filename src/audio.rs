//! Sound-cue boundary
//!
//! The simulation reports what happened through [`crate::sim::GameEvent`]s;
//! mapping those to cues and actually making noise is the embedder's job.
//! Playback is fire-and-forget: the core never tracks audio device state.

use crate::sim::GameEvent;

/// Sound cues the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Acorn picked up
    Powerup,
    /// Tree smashed by a powered player
    Hit,
}

/// Fire-and-forget cue playback
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Cue for a simulation event, if it makes a sound
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::AcornCollected { .. } => Some(Cue::Powerup),
        GameEvent::TreeSmashed { .. } => Some(Cue::Hit),
        GameEvent::PlaneJumped { .. } => None,
    }
}

/// Cue player that discards everything (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullCues;

impl CuePlayer for NullCues {
    fn play(&mut self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Plane;

    #[test]
    fn test_event_cue_mapping() {
        assert_eq!(
            cue_for(&GameEvent::AcornCollected { plane: Plane::Mid }),
            Some(Cue::Powerup)
        );
        assert_eq!(
            cue_for(&GameEvent::TreeSmashed {
                plane: Plane::Mid,
                kind: crate::sim::TreeKind::Oak
            }),
            Some(Cue::Hit)
        );
        assert_eq!(
            cue_for(&GameEvent::PlaneJumped {
                from: Plane::Mid,
                to: Plane::Background
            }),
            None
        );
    }
}
