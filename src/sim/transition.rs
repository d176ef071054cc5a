//! Plane transition: the eased hop between depth planes
//!
//! Vertical position eases with smoothstep while the visual scale
//! interpolates linearly; a parabolic arc lifts the player mid-hop, sized by
//! the average of the two planes' scales so deeper jumps read bigger.

use crate::{lerp, smoothstep};

/// Interpolated output for one tick of a running transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSample {
    /// Feet-line y for this instant (arc already applied)
    pub y: f32,
    /// Visual scale for this instant
    pub scale: f32,
    /// True exactly once, on the tick the transition completes
    pub done: bool,
}

/// A single in-flight hop between two planes. Constructed when the player's
/// logical plane changes; the session positions the player from its samples
/// until it reports done, with ordinary gravity suspended meanwhile.
#[derive(Debug, Clone)]
pub struct PlaneTransition {
    start_y: f32,
    end_y: f32,
    start_scale: f32,
    end_scale: f32,
    /// Arc peak height, already scaled by the average plane scale
    arc: f32,
    elapsed: f32,
    duration: f32,
}

impl PlaneTransition {
    pub fn new(
        start_y: f32,
        end_y: f32,
        start_scale: f32,
        end_scale: f32,
        arc_height: f32,
        duration: f32,
    ) -> Self {
        let avg_scale = (start_scale + end_scale) * 0.5;
        Self {
            start_y,
            end_y,
            start_scale,
            end_scale,
            arc: arc_height * avg_scale,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    /// Advance by `dt` and sample the current position/scale. At completion
    /// the sample snaps exactly to the target feet line and scale.
    pub fn advance(&mut self, dt: f32) -> TransitionSample {
        self.elapsed += dt;
        let t = (self.elapsed / self.duration).min(1.0);

        if t >= 1.0 {
            return TransitionSample {
                y: self.end_y,
                scale: self.end_scale,
                done: true,
            };
        }

        let alpha = smoothstep(t);
        let linear_y = lerp(self.start_y, self.end_y, alpha);
        // Parabola peaking at alpha = 0.5; negative because y grows downward
        let hop = -self.arc * 4.0 * alpha * (1.0 - alpha);

        TransitionSample {
            y: linear_y + hop,
            scale: lerp(self.start_scale, self.end_scale, alpha),
            done: false,
        }
    }

    /// Sample without advancing time (used to restart a transition from its
    /// current interpolated state when a second jump lands mid-flight)
    pub fn sample(&self) -> TransitionSample {
        let t = (self.elapsed / self.duration).min(1.0);
        let alpha = smoothstep(t);
        let linear_y = lerp(self.start_y, self.end_y, alpha);
        let hop = -self.arc * 4.0 * alpha * (1.0 - alpha);
        TransitionSample {
            y: if t >= 1.0 { self.end_y } else { linear_y + hop },
            scale: lerp(self.start_scale, self.end_scale, alpha),
            done: t >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop_down() -> PlaneTransition {
        // Mid (y=455, scale 1.0) to foreground (y=630, scale 2.5)
        PlaneTransition::new(455.0, 630.0, 1.0, 2.5, 120.0, 0.5)
    }

    #[test]
    fn test_starts_at_start_y() {
        let transition = hop_down();
        let sample = transition.sample();
        assert_eq!(sample.y, 455.0);
        assert_eq!(sample.scale, 1.0);
        assert!(!sample.done);
    }

    #[test]
    fn test_ends_exactly_at_target() {
        let mut transition = hop_down();
        let mut last = transition.sample();
        for _ in 0..60 {
            last = transition.advance(0.5 / 60.0 + 1e-4);
            if last.done {
                break;
            }
        }
        assert!(last.done);
        assert_eq!(last.y, 630.0);
        assert_eq!(last.scale, 2.5);
    }

    #[test]
    fn test_arc_peaks_at_midpoint() {
        // Equal endpoints isolate the hop term
        let mut transition = PlaneTransition::new(455.0, 455.0, 1.0, 1.0, 120.0, 0.5);
        let mid = transition.advance(0.25);
        // alpha = smoothstep(0.5) = 0.5, hop = -120 * 4 * 0.25 = -120
        assert!((mid.y - (455.0 - 120.0)).abs() < 1e-3);

        let mut early = PlaneTransition::new(455.0, 455.0, 1.0, 1.0, 120.0, 0.5);
        let quarter = early.advance(0.125);
        assert!(quarter.y > mid.y, "hop magnitude must peak at the midpoint");
    }

    #[test]
    fn test_arc_scales_with_average_plane_scale() {
        let mut small = PlaneTransition::new(0.0, 0.0, 0.4, 0.4, 120.0, 0.5);
        let mut big = PlaneTransition::new(0.0, 0.0, 2.5, 2.5, 120.0, 0.5);
        let lift_small = -small.advance(0.25).y;
        let lift_big = -big.advance(0.25).y;
        assert!((lift_small - 120.0 * 0.4).abs() < 1e-3);
        assert!((lift_big - 120.0 * 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_scale_interpolates_linearly() {
        let mut transition = hop_down();
        // At t=0.5, alpha=0.5, so scale is the plain midpoint
        let sample = transition.advance(0.25);
        assert!((sample.scale - 1.75).abs() < 1e-3);
    }

    #[test]
    fn test_done_fires_past_duration() {
        let mut transition = hop_down();
        let sample = transition.advance(0.6);
        assert!(sample.done);
        assert_eq!(sample.y, 630.0);
    }
}
