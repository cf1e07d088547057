//! Camera control configuration

use std::f32::consts::PI;
use std::time::Duration;

use panorama_core::Orientation;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

const DEFAULT_MOTION_UPDATE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Camera control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of a half turn per viewport width of horizontal drag
    pub horizontal_pan_sensitivity: f32,
    /// Fraction of a half turn per viewport height of vertical drag
    pub vertical_pan_sensitivity: f32,
    /// Scale applied to gyroscope rotation rates
    pub rotation_rate_damping: f32,
    /// Rotation-rate magnitude below which an axis is treated as still
    pub noise_threshold: f32,
    /// Distance from the initial orientation (radians) a gyroscope move must
    /// exceed before it counts as the user's first movement
    pub minimal_rotation_distance_to_report: f32,
    /// Starting yaw in radians
    pub initial_yaw: f32,
    /// Starting pitch in radians
    pub initial_pitch: f32,
    /// Requested motion sensor update interval in seconds
    pub motion_update_interval: f32,
    /// Duration of an animated reorientation to the horizon in seconds
    pub reorientation_duration: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            horizontal_pan_sensitivity: 0.5,
            // Lower than horizontal; 0.5 over-rotates vertically
            vertical_pan_sensitivity: 0.4,
            rotation_rate_damping: 0.02,
            noise_threshold: 0.12,
            minimal_rotation_distance_to_report: 0.75,
            initial_yaw: PI,
            initial_pitch: 0.0,
            motion_update_interval: 1.0 / 60.0,
            reorientation_duration: 0.25,
        }
    }
}

impl CameraConfig {
    /// Starting orientation
    pub fn initial_orientation(&self) -> Orientation {
        Orientation::new(self.initial_yaw, self.initial_pitch)
    }

    /// Motion update interval as a duration.
    ///
    /// Falls back to 60 Hz when the configured value has no `Duration`
    /// representation; [`validate`](Self::validate) rejects such values.
    pub fn motion_update_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.motion_update_interval)
            .unwrap_or(DEFAULT_MOTION_UPDATE_INTERVAL)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), CameraError> {
        let positive = [
            ("horizontal_pan_sensitivity", self.horizontal_pan_sensitivity),
            ("vertical_pan_sensitivity", self.vertical_pan_sensitivity),
            ("rotation_rate_damping", self.rotation_rate_damping),
            ("motion_update_interval", self.motion_update_interval),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CameraError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if let Err(e) = Duration::try_from_secs_f32(self.motion_update_interval) {
            return Err(CameraError::Config(format!(
                "motion_update_interval {} is out of range: {e}",
                self.motion_update_interval
            )));
        }

        let non_negative = [
            ("noise_threshold", self.noise_threshold),
            (
                "minimal_rotation_distance_to_report",
                self.minimal_rotation_distance_to_report,
            ),
            ("reorientation_duration", self.reorientation_duration),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CameraError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !self.initial_yaw.is_finite() || !self.initial_pitch.is_finite() {
            return Err(CameraError::Config(
                "initial orientation must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
