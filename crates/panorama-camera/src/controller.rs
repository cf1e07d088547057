//! Camera controller for one viewing session
//!
//! Owns the orientation and routes pan gestures and gyroscope samples
//! through their integrators. Every call that changes what the renderer
//! should show returns a [`CameraUpdate`]; `None` means nothing changed.

use glam::{Quat, Vec2, Vec3};
use panorama_core::{
    compass_angle, constrain_to_axes, optimal_field_of_view, AxisMask, InteractionMethod,
    MotionSample, Orientation, ScreenOrientation, ViewportSize,
};
use panorama_sensor::{MotionSensor, SensorError, SensorMultiplexer, SubscriptionToken};
use tracing::debug;

use crate::config::CameraConfig;
use crate::detector::InitialMovementDetector;
use crate::error::CameraError;
use crate::gesture::{GestureState, PanGestureIntegrator, PanTracker};
use crate::motion::GyroscopeIntegrator;
use crate::orientation::OrientationState;
use crate::reorient::ReorientationAnimation;

/// What the renderer needs after an orientation change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUpdate {
    /// Euler rotation `(pitch, yaw, 0)` for the camera node
    pub rotation: Vec3,
    /// Compass heading in radians
    pub compass_angle: f32,
    /// Set on the one update that is the user's first camera movement
    pub first_movement: Option<InteractionMethod>,
}

/// Camera controller
pub struct CameraController {
    config: CameraConfig,
    state: OrientationState,
    /// Resting pose the gyroscope distance gate measures against; masked
    /// together with the stored orientation
    origin: Orientation,
    pan: PanGestureIntegrator,
    gyro: GyroscopeIntegrator,
    tracker: PanTracker,
    detector: InitialMovementDetector,
    viewport: ViewportSize,
    field_of_view: f32,
    motion_token: Option<SubscriptionToken>,
    reorientation: Option<ReorientationAnimation>,
}

impl CameraController {
    /// Create a controller for a view of the given size with default config
    pub fn new(viewport: ViewportSize) -> Result<Self, CameraError> {
        Self::with_config(viewport, CameraConfig::default())
    }

    /// Create a controller with custom config
    pub fn with_config(viewport: ViewportSize, config: CameraConfig) -> Result<Self, CameraError> {
        if !viewport.is_valid() {
            return Err(CameraError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        config.validate()?;

        let origin = config.initial_orientation();
        Ok(Self {
            state: OrientationState::new(origin),
            origin,
            pan: PanGestureIntegrator::new(
                config.horizontal_pan_sensitivity,
                config.vertical_pan_sensitivity,
            ),
            gyro: GyroscopeIntegrator::new(config.rotation_rate_damping, config.noise_threshold),
            tracker: PanTracker::new(),
            detector: InitialMovementDetector::new(),
            field_of_view: optimal_field_of_view(viewport),
            viewport,
            motion_token: None,
            reorientation: None,
            config,
        })
    }

    // ---- Queries ----

    /// Current stored orientation
    pub fn orientation(&self) -> Orientation {
        self.state.position()
    }

    /// Rotation the renderer should currently show, `(pitch, yaw, 0)`.
    ///
    /// Differs from the stored orientation only while a reorientation
    /// animation is running.
    pub fn rotation(&self) -> Vec3 {
        let mut rotation = self.state.position().euler_angles();
        if let Some(anim) = &self.reorientation {
            rotation.x = anim.current_pitch();
        }
        rotation
    }

    /// [`rotation`](Self::rotation) as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        let rotation = self.rotation();
        Orientation::new(rotation.y, rotation.x).quat()
    }

    /// Current compass heading in radians
    pub fn compass_angle(&self) -> f32 {
        compass_angle(self.rotation().y)
    }

    /// Vertical field of view in degrees for the current viewport
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    /// Current viewport size
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Get a reference to the config
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Axes the pan gesture may drive
    pub fn allowed_gesture_axes(&self) -> AxisMask {
        self.state.gesture_axes()
    }

    /// Axes the motion sensor may drive
    pub fn allowed_motion_axes(&self) -> AxisMask {
        self.state.motion_axes()
    }

    /// Whether the first-movement notification has been emitted
    pub fn has_reported_initial_movement(&self) -> bool {
        self.detector.has_fired()
    }

    /// Whether a reorientation animation is running (input is ignored)
    pub fn is_reorienting(&self) -> bool {
        self.reorientation.is_some()
    }

    /// Whether this controller holds a motion subscription
    pub fn is_receiving_motion_updates(&self) -> bool {
        self.motion_token.is_some()
    }

    // ---- Configuration ----

    /// Restrict the axes the pan gesture may drive. The current orientation
    /// is re-projected through the new mask at once.
    pub fn set_allowed_gesture_axes(&mut self, mask: AxisMask) -> Option<CameraUpdate> {
        if !self.state.set_gesture_axes(mask) {
            return None;
        }
        self.origin = constrain_to_axes(self.origin, mask);
        self.reorientation = None;
        Some(self.update(None))
    }

    /// Restrict the axes the motion sensor may drive. The current
    /// orientation is re-projected through the new mask at once.
    pub fn set_allowed_motion_axes(&mut self, mask: AxisMask) -> Option<CameraUpdate> {
        if !self.state.set_motion_axes(mask) {
            return None;
        }
        self.origin = constrain_to_axes(self.origin, mask);
        self.reorientation = None;
        Some(self.update(None))
    }

    /// Handle a layout change, returning the new field of view in degrees
    pub fn update_viewport(&mut self, viewport: ViewportSize) -> Result<f32, CameraError> {
        if !viewport.is_valid() {
            return Err(CameraError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.field_of_view = optimal_field_of_view(viewport);
        debug!(
            "Viewport {}x{}, field of view {}",
            viewport.width, viewport.height, self.field_of_view
        );
        Ok(self.field_of_view)
    }

    // ---- Pan gesture ----

    /// Feed one pan gesture event with its touch point in view coordinates
    pub fn handle_pan(&mut self, point: Vec2, state: GestureState) -> Option<CameraUpdate> {
        if self.is_reorienting() {
            return None;
        }

        match state {
            GestureState::Began => {
                self.tracker.begin(point);
                None
            }
            GestureState::Changed => {
                let delta = self.tracker.advance(point)?;
                self.pan_by(delta)
            }
            GestureState::Ended | GestureState::Cancelled => {
                self.tracker.end();
                None
            }
        }
    }

    /// Apply a drag of `delta` points (current minus previous touch point)
    pub fn pan_by(&mut self, delta: Vec2) -> Option<CameraUpdate> {
        if self.is_reorienting() {
            return None;
        }

        let next = self.pan.integrate(
            self.state.position(),
            delta,
            self.viewport,
            self.state.gesture_axes(),
        )?;
        self.state.set_position(next);

        let first = self.detector.evaluate(InteractionMethod::Touch);
        Some(self.update(first))
    }

    // ---- Device motion ----

    /// Subscribe to motion updates at the configured interval.
    /// Does nothing if already subscribed.
    pub fn start_motion_updates<S: MotionSensor>(
        &mut self,
        sensors: &mut SensorMultiplexer<S>,
    ) -> Result<(), SensorError> {
        if self.motion_token.is_some() {
            return Ok(());
        }
        let token = sensors.start_updating(self.config.motion_update_interval())?;
        self.motion_token = Some(token);
        Ok(())
    }

    /// Balance [`start_motion_updates`](Self::start_motion_updates).
    /// Does nothing if not subscribed.
    pub fn stop_motion_updates<S: MotionSensor>(
        &mut self,
        sensors: &mut SensorMultiplexer<S>,
    ) -> Result<(), SensorError> {
        match self.motion_token.take() {
            Some(token) => sensors.stop_updating(token),
            None => Ok(()),
        }
    }

    /// Poll the sensor and apply its latest sample. Call once per render
    /// tick. Skipped when no sample is available.
    pub fn update_for_device_motion<S: MotionSensor>(
        &mut self,
        sensors: &SensorMultiplexer<S>,
        screen_orientation: ScreenOrientation,
    ) -> Option<CameraUpdate> {
        let sample = sensors.current_sample()?;
        self.handle_motion_sample(sample, screen_orientation)
    }

    /// Apply one motion sample taken in the given screen orientation
    pub fn handle_motion_sample(
        &mut self,
        sample: MotionSample,
        screen_orientation: ScreenOrientation,
    ) -> Option<CameraUpdate> {
        if self.is_reorienting() {
            return None;
        }

        let next = self.gyro.integrate(
            self.state.position(),
            sample.rotation_rate,
            screen_orientation,
            self.state.motion_axes(),
        );
        self.state.set_position(next);

        // Sensor noise at rest must not count as the user moving the camera
        let first = if next.distance(self.origin) > self.config.minimal_rotation_distance_to_report
        {
            self.detector.evaluate(InteractionMethod::Gyroscope)
        } else {
            None
        };
        Some(self.update(first))
    }

    // ---- Reorientation ----

    /// Point the camera back at the horizon (pitch 0).
    ///
    /// The stored pitch is reset at once. When `animated`, the displayed
    /// rotation eases there over the configured duration, driven by
    /// [`tick`](Self::tick), and input is ignored until it finishes.
    pub fn reorient_vertical_to_horizon(&mut self, animated: bool) -> Option<CameraUpdate> {
        let from_pitch = self.rotation().x;
        let mut position = self.state.position();
        position.pitch = 0.0;
        self.state.set_position(position);

        let duration = self.config.reorientation_duration;
        self.reorientation = if animated && from_pitch != 0.0 && duration > 0.0 {
            Some(ReorientationAnimation::new(from_pitch, duration))
        } else {
            None
        };
        Some(self.update(None))
    }

    /// Advance time-based state by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<CameraUpdate> {
        let anim = self.reorientation.as_mut()?;
        anim.advance(dt);
        if anim.is_finished() {
            self.reorientation = None;
            debug!("Reorientation finished");
        }
        Some(self.update(None))
    }

    fn update(&self, first_movement: Option<InteractionMethod>) -> CameraUpdate {
        CameraUpdate {
            rotation: self.rotation(),
            compass_angle: self.compass_angle(),
            first_movement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama_core::{FOV_DEFAULT_DEGREES, PITCH_LIMIT};
    use panorama_sensor::SimulatedMotionSensor;
    use std::f32::consts::{PI, TAU};

    fn controller() -> CameraController {
        CameraController::new(ViewportSize::new(1000.0, 500.0)).unwrap()
    }

    fn rate(x: f32, y: f32) -> MotionSample {
        MotionSample::new(Vec3::new(x, y, 0.0), 0.0)
    }

    #[test]
    fn starts_facing_seam_free_hemisphere() {
        let camera = controller();
        assert_eq!(camera.orientation(), Orientation::new(PI, 0.0));
        assert_eq!(camera.rotation(), Vec3::new(0.0, PI, 0.0));
        assert_eq!(camera.compass_angle(), 0.0);
        assert_eq!(camera.allowed_gesture_axes(), AxisMask::BOTH);
        assert_eq!(camera.allowed_motion_axes(), AxisMask::BOTH);
        assert!(!camera.has_reported_initial_movement());
    }

    #[test]
    fn rejects_invalid_viewport() {
        assert!(matches!(
            CameraController::new(ViewportSize::new(-1.0, 10.0)),
            Err(CameraError::InvalidViewport { .. })
        ));
        let mut camera = controller();
        assert!(camera.update_viewport(ViewportSize::new(f32::NAN, 1.0)).is_err());
        assert_eq!(camera.viewport(), ViewportSize::new(1000.0, 500.0));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = CameraConfig {
            rotation_rate_damping: -1.0,
            ..Default::default()
        };
        assert!(CameraController::with_config(ViewportSize::new(1.0, 1.0), config).is_err());
    }

    #[test]
    fn pan_gesture_scenario() {
        let mut camera = controller();
        assert_eq!(camera.handle_pan(Vec2::new(500.0, 250.0), GestureState::Began), None);

        let update = camera
            .handle_pan(Vec2::new(600.0, 250.0), GestureState::Changed)
            .unwrap();
        let expected_yaw = PI + TAU * 100.0 / 1000.0 * 0.5;
        assert!((camera.orientation().yaw - expected_yaw).abs() < 1e-5);
        assert_eq!(update.rotation, Vec3::new(0.0, camera.orientation().yaw, 0.0));
        assert!((update.compass_angle - compass_angle(expected_yaw)).abs() < 1e-6);
        assert_eq!(update.first_movement, Some(InteractionMethod::Touch));

        // The next delta is measured from the last point, not the first
        let update = camera
            .handle_pan(Vec2::new(600.0, 300.0), GestureState::Changed)
            .unwrap();
        assert!((camera.orientation().yaw - expected_yaw).abs() < 1e-5);
        assert!((camera.orientation().pitch - TAU * 50.0 / 500.0 * 0.4).abs() < 1e-5);
        assert_eq!(update.first_movement, None);

        assert_eq!(camera.handle_pan(Vec2::ZERO, GestureState::Ended), None);
    }

    #[test]
    fn pan_with_zero_area_viewport_is_skipped() {
        let mut camera = controller();
        assert_eq!(camera.update_viewport(ViewportSize::new(0.0, 0.0)).unwrap(), FOV_DEFAULT_DEGREES);
        assert_eq!(camera.pan_by(Vec2::new(10.0, 10.0)), None);
        assert_eq!(camera.orientation(), Orientation::new(PI, 0.0));
        assert!(!camera.has_reported_initial_movement());
    }

    #[test]
    fn pitch_stays_bounded_under_mixed_input() {
        let mut camera = controller();
        let orientations = [
            ScreenOrientation::Portrait,
            ScreenOrientation::LandscapeLeft,
            ScreenOrientation::LandscapeRight,
            ScreenOrientation::Unknown,
        ];
        for i in 0..500 {
            let sign = if (i / 50) % 2 == 0 { 1.0 } else { -1.0 };
            let _ = camera.pan_by(Vec2::new(37.0, sign * 90.0));
            let _ = camera.handle_motion_sample(
                rate(sign * 8.0, sign * -6.0),
                orientations[i % orientations.len()],
            );
            let pitch = camera.orientation().pitch;
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch));
        }
    }

    #[test]
    fn disabled_horizontal_axis_keeps_yaw_zero() {
        let mut camera = controller();
        let _ = camera.set_allowed_gesture_axes(AxisMask::VERTICAL);
        let _ = camera.set_allowed_motion_axes(AxisMask::VERTICAL);
        for _ in 0..20 {
            let _ = camera.pan_by(Vec2::new(1e6, 3.0));
            assert_eq!(camera.orientation().yaw, 0.0);
            let _ = camera.handle_motion_sample(rate(50.0, 50.0), ScreenOrientation::Portrait);
            assert_eq!(camera.orientation().yaw, 0.0);
        }
    }

    #[test]
    fn mask_change_reprojects_and_emits() {
        let mut camera = controller();
        let _ = camera.pan_by(Vec2::new(0.0, 50.0));
        assert!(camera.orientation().pitch != 0.0);

        let update = camera.set_allowed_motion_axes(AxisMask::HORIZONTAL).unwrap();
        assert_eq!(camera.orientation().pitch, 0.0);
        assert_eq!(update.rotation.x, 0.0);
        assert_eq!(update.rotation.y, PI);

        assert_eq!(camera.set_allowed_motion_axes(AxisMask::HORIZONTAL), None);
    }

    #[test]
    fn gyroscope_noise_does_not_count_as_movement() {
        let mut camera = controller();
        for _ in 0..100 {
            let update = camera
                .handle_motion_sample(rate(0.05, -0.1), ScreenOrientation::Portrait)
                .unwrap();
            assert_eq!(update.first_movement, None);
        }
        assert_eq!(camera.orientation(), Orientation::new(PI, 0.0));
        assert!(!camera.has_reported_initial_movement());
    }

    #[test]
    fn still_device_after_mask_change_is_not_movement() {
        let mut camera = controller();
        let _ = camera.set_allowed_motion_axes(AxisMask::VERTICAL);
        let update = camera
            .handle_motion_sample(rate(0.0, 0.0), ScreenOrientation::Portrait)
            .unwrap();
        assert_eq!(camera.orientation(), Orientation::ZERO);
        assert_eq!(update.first_movement, None);

        let mut camera = controller();
        let _ = camera.set_allowed_gesture_axes(AxisMask::VERTICAL);
        for _ in 0..10 {
            let update = camera
                .handle_motion_sample(rate(0.05, 0.0), ScreenOrientation::Portrait)
                .unwrap();
            assert_eq!(update.first_movement, None);
        }
        assert!(!camera.has_reported_initial_movement());
    }

    #[test]
    fn gyroscope_reports_after_distance_threshold_under_mask() {
        let mut camera = controller();
        let _ = camera.set_allowed_motion_axes(AxisMask::VERTICAL);
        // 0.02 rad of pitch per sample; fires once past 0.75 rad
        let mut fired = 0;
        for _ in 0..60 {
            let update = camera
                .handle_motion_sample(rate(1.0, 0.0), ScreenOrientation::Portrait)
                .unwrap();
            if update.first_movement.is_some() {
                fired += 1;
                assert!(camera.orientation().pitch > 0.75);
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn gyroscope_reports_after_distance_threshold() {
        let mut camera = controller();
        // 0.02 rad of yaw per sample at rate 1.0
        let mut fired_at = None;
        for i in 0..100 {
            let update = camera
                .handle_motion_sample(rate(0.0, 1.0), ScreenOrientation::Portrait)
                .unwrap();
            if update.first_movement.is_some() {
                assert_eq!(update.first_movement, Some(InteractionMethod::Gyroscope));
                fired_at = Some(i);
                break;
            }
        }
        let fired_at = fired_at.unwrap();
        assert!(fired_at >= 37);
        assert!(fired_at <= 38);
    }

    #[test]
    fn first_movement_fires_once_across_inputs() {
        let mut camera = controller();
        let mut fired = Vec::new();
        for _ in 0..1_000 {
            if let Some(update) = camera.pan_by(Vec2::new(5.0, 0.0)) {
                fired.extend(update.first_movement);
            }
            if let Some(update) =
                camera.handle_motion_sample(rate(3.0, 3.0), ScreenOrientation::Portrait)
            {
                fired.extend(update.first_movement);
            }
        }
        assert_eq!(fired, vec![InteractionMethod::Touch]);
    }

    #[test]
    fn motion_updates_through_multiplexer() {
        let mut sensors = SensorMultiplexer::new(SimulatedMotionSensor::new());
        let mut camera = controller();

        assert_eq!(
            camera.update_for_device_motion(&sensors, ScreenOrientation::Portrait),
            None
        );

        camera.start_motion_updates(&mut sensors).unwrap();
        camera.start_motion_updates(&mut sensors).unwrap();
        assert_eq!(sensors.subscription_count(), 1);
        assert!(camera.is_receiving_motion_updates());

        // Active but nothing delivered yet: tick skipped
        assert_eq!(
            camera.update_for_device_motion(&sensors, ScreenOrientation::Portrait),
            None
        );

        sensors.push_sample(rate(0.0, 1.0));
        let update = camera
            .update_for_device_motion(&sensors, ScreenOrientation::Portrait)
            .unwrap();
        assert!((update.rotation.y - (PI + 0.02)).abs() < 1e-5);

        camera.stop_motion_updates(&mut sensors).unwrap();
        camera.stop_motion_updates(&mut sensors).unwrap();
        assert!(!sensors.is_active());
        assert_eq!(sensors.sensor().stop_count(), 1);
    }

    #[test]
    fn immediate_reorientation() {
        let mut camera = controller();
        let _ = camera.pan_by(Vec2::new(0.0, 100.0));
        let update = camera.reorient_vertical_to_horizon(false).unwrap();
        assert_eq!(update.rotation.x, 0.0);
        assert_eq!(camera.orientation().pitch, 0.0);
        assert!(!camera.is_reorienting());
        assert_eq!(camera.tick(0.1), None);
    }

    #[test]
    fn animated_reorientation_blocks_input() {
        let mut camera = controller();
        let _ = camera.pan_by(Vec2::new(0.0, 100.0));
        let from = camera.orientation().pitch;

        let update = camera.reorient_vertical_to_horizon(true).unwrap();
        assert_eq!(update.rotation.x, from);
        assert_eq!(camera.orientation().pitch, 0.0);
        assert!(camera.is_reorienting());

        assert_eq!(camera.pan_by(Vec2::new(50.0, 50.0)), None);
        assert_eq!(
            camera.handle_motion_sample(rate(5.0, 5.0), ScreenOrientation::Portrait),
            None
        );

        let mid = camera.tick(0.125).unwrap();
        assert!(mid.rotation.x > 0.0 && mid.rotation.x < from);

        let done = camera.tick(1.0).unwrap();
        assert_eq!(done.rotation.x, 0.0);
        assert!(!camera.is_reorienting());
        assert!(camera.pan_by(Vec2::new(50.0, 0.0)).is_some());
    }

    #[test]
    fn fov_tracks_viewport() {
        let mut camera = controller();
        let landscape = camera.field_of_view();
        let portrait = camera.update_viewport(ViewportSize::new(500.0, 1000.0)).unwrap();
        assert!(portrait > landscape);
        assert_eq!(camera.field_of_view(), portrait);
    }
}
