//! Pan gesture handling
//!
//! [`PanTracker`] turns a stream of touch points into deltas and
//! [`PanGestureIntegrator`] maps a delta onto the orientation.

use std::f32::consts::TAU;

use glam::Vec2;
use panorama_core::{clamp_pitch, constrain_to_axes, AxisMask, Orientation, ViewportSize};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Phase of a pan gesture as reported by the host's gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureState {
    /// Finger went down
    Began,
    /// Finger moved
    Changed,
    /// Finger lifted
    Ended,
    /// Recognizer gave up on the gesture
    Cancelled,
}

/// Remembers the previous touch point of an ongoing pan
#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    previous: Option<Vec2>,
}

impl PanTracker {
    /// Create a tracker with no gesture in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture at `point`
    pub fn begin(&mut self, point: Vec2) {
        debug!("Pan began at ({}, {})", point.x, point.y);
        self.previous = Some(point);
    }

    /// Move to `point`, returning the delta (current minus previous).
    ///
    /// Without a previous point this behaves like [`begin`](Self::begin)
    /// and returns `None`.
    pub fn advance(&mut self, point: Vec2) -> Option<Vec2> {
        let previous = self.previous.replace(point);
        previous.map(|previous| point - previous)
    }

    /// Forget the gesture
    pub fn end(&mut self) {
        if self.previous.take().is_some() {
            debug!("Pan ended");
        }
    }

    /// Check whether a gesture is in progress
    pub fn is_tracking(&self) -> bool {
        self.previous.is_some()
    }
}

/// Maps a screen-space drag onto a yaw/pitch change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGestureIntegrator {
    /// Multiplier on a full-turn-per-width horizontal drag
    pub horizontal_sensitivity: f32,
    /// Multiplier on a full-turn-per-height vertical drag
    pub vertical_sensitivity: f32,
}

impl PanGestureIntegrator {
    /// Create an integrator with the given sensitivities
    pub fn new(horizontal_sensitivity: f32, vertical_sensitivity: f32) -> Self {
        Self {
            horizontal_sensitivity,
            vertical_sensitivity,
        }
    }

    /// Apply a drag of `delta` points over `viewport` to `position`.
    ///
    /// Returns `None` when the viewport has no area.
    pub fn integrate(
        &self,
        position: Orientation,
        delta: Vec2,
        viewport: ViewportSize,
        allowed_axes: AxisMask,
    ) -> Option<Orientation> {
        if !viewport.has_area() {
            return None;
        }

        let next = Orientation::new(
            position.yaw + TAU * delta.x / viewport.width * self.horizontal_sensitivity,
            position.pitch + TAU * delta.y / viewport.height * self.vertical_sensitivity,
        );
        Some(constrain_to_axes(clamp_pitch(next), allowed_axes))
    }
}

impl Default for PanGestureIntegrator {
    fn default() -> Self {
        Self::new(0.5, 0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama_core::PITCH_LIMIT;
    use std::f32::consts::PI;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1000.0,
        height: 500.0,
    };

    #[test]
    fn horizontal_drag_turns_yaw() {
        let pan = PanGestureIntegrator::default();
        let next = pan
            .integrate(
                Orientation::new(PI, 0.0),
                Vec2::new(100.0, 0.0),
                VIEWPORT,
                AxisMask::BOTH,
            )
            .unwrap();
        assert!((next.yaw - (PI + TAU * 100.0 / 1000.0 * 0.5)).abs() < 1e-5);
        assert!((next.yaw - (PI + 0.314)).abs() < 1e-3);
        assert_eq!(next.pitch, 0.0);
    }

    #[test]
    fn vertical_drag_is_less_sensitive() {
        let pan = PanGestureIntegrator::default();
        let square = ViewportSize::new(500.0, 500.0);
        let h = pan
            .integrate(Orientation::ZERO, Vec2::new(50.0, 0.0), square, AxisMask::BOTH)
            .unwrap();
        let v = pan
            .integrate(Orientation::ZERO, Vec2::new(0.0, 50.0), square, AxisMask::BOTH)
            .unwrap();
        assert!(v.pitch.abs() < h.yaw.abs());
        assert!((v.pitch - TAU * 0.1 * 0.4).abs() < 1e-5);
    }

    #[test]
    fn huge_drag_clamps_pitch() {
        let pan = PanGestureIntegrator::default();
        let up = pan
            .integrate(Orientation::ZERO, Vec2::new(0.0, 1e6), VIEWPORT, AxisMask::BOTH)
            .unwrap();
        assert_eq!(up.pitch, PITCH_LIMIT);
        let down = pan
            .integrate(Orientation::ZERO, Vec2::new(0.0, -1e6), VIEWPORT, AxisMask::BOTH)
            .unwrap();
        assert_eq!(down.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn masked_axis_stays_zero() {
        let pan = PanGestureIntegrator::default();
        let next = pan
            .integrate(
                Orientation::new(2.0, 0.3),
                Vec2::new(1e5, 40.0),
                VIEWPORT,
                AxisMask::VERTICAL,
            )
            .unwrap();
        assert_eq!(next.yaw, 0.0);
        assert!(next.pitch > 0.3);
    }

    #[test]
    fn zero_viewport_skips() {
        let pan = PanGestureIntegrator::default();
        assert!(pan
            .integrate(
                Orientation::ZERO,
                Vec2::ONE,
                ViewportSize::new(0.0, 100.0),
                AxisMask::BOTH
            )
            .is_none());
    }

    #[test]
    fn tracker_produces_successive_deltas() {
        let mut tracker = PanTracker::new();
        assert_eq!(tracker.advance(Vec2::new(10.0, 10.0)), None);
        assert!(tracker.is_tracking());

        tracker.begin(Vec2::new(0.0, 0.0));
        assert_eq!(tracker.advance(Vec2::new(5.0, -2.0)), Some(Vec2::new(5.0, -2.0)));
        assert_eq!(tracker.advance(Vec2::new(8.0, -2.0)), Some(Vec2::new(3.0, 0.0)));

        tracker.end();
        assert!(!tracker.is_tracking());
    }
}
