use glam::Vec3;
use panorama_core::{clamp_pitch, constrain_to_axes, AxisMask, Orientation, ScreenOrientation};

/// Maps gyroscope rotation rates onto a yaw/pitch change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyroscopeIntegrator {
    /// Scale applied to each rotation rate before it is added
    pub damping: f32,
    /// Axes whose rate magnitude is below this are treated as still
    pub noise_threshold: f32,
}

impl GyroscopeIntegrator {
    /// Create an integrator with the given damping and noise threshold
    pub fn new(damping: f32, noise_threshold: f32) -> Self {
        Self {
            damping,
            noise_threshold,
        }
    }

    /// Zero every rate component whose magnitude is below the threshold.
    /// Only x and y are used downstream.
    pub fn suppress_noise(&self, rotation_rate: Vec3) -> Vec3 {
        let gate = |v: f32| if v.abs() < self.noise_threshold { 0.0 } else { v };
        Vec3::new(gate(rotation_rate.x), gate(rotation_rate.y), rotation_rate.z)
    }

    /// Apply one rotation-rate sample to `position`.
    ///
    /// The device axes map onto yaw/pitch differently per screen
    /// orientation. The portrait branch keeps both signs while each landscape
    /// branch inverts one; this matches the sensor's axis convention and must
    /// stay as is. `Unknown` and upside-down use the portrait mapping.
    pub fn integrate(
        &self,
        position: Orientation,
        rotation_rate: Vec3,
        screen_orientation: ScreenOrientation,
        allowed_axes: AxisMask,
    ) -> Orientation {
        let rate = self.suppress_noise(rotation_rate);
        let d = self.damping;

        let (yaw_delta, pitch_delta) = match screen_orientation {
            ScreenOrientation::LandscapeLeft => (-rate.x * d, rate.y * d),
            ScreenOrientation::LandscapeRight => (rate.x * d, -rate.y * d),
            ScreenOrientation::Portrait
            | ScreenOrientation::PortraitUpsideDown
            | ScreenOrientation::Unknown => (rate.y * d, rate.x * d),
        };

        let next = Orientation::new(position.yaw + yaw_delta, position.pitch + pitch_delta);
        constrain_to_axes(clamp_pitch(next), allowed_axes)
    }
}

impl Default for GyroscopeIntegrator {
    fn default() -> Self {
        Self::new(0.02, 0.12)
    }
}
