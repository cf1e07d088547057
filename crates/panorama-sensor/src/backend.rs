//! The physical sensor seam
//!
//! [`MotionSensor`] is what a platform layer implements around its native
//! motion API. [`SimulatedMotionSensor`] is a headless implementation used by
//! the demo driver and by tests.

use std::time::Duration;

use panorama_core::MotionSample;

/// A physical device-motion sensor.
///
/// Implementations only need to do what they are told; lifecycle and rate
/// arbitration live in [`SensorMultiplexer`](crate::SensorMultiplexer).
pub trait MotionSensor {
    /// Whether motion hardware is present on this device
    fn is_available(&self) -> bool;

    /// Whether the sensor is currently delivering samples
    fn is_active(&self) -> bool;

    /// Change the delivery interval; takes effect immediately if active
    fn set_update_interval(&mut self, interval: Duration);

    /// Begin delivering samples
    fn start(&mut self);

    /// Stop delivering samples
    fn stop(&mut self);

    /// The most recent sample, if one has been delivered
    fn latest_sample(&self) -> Option<MotionSample>;
}

/// Motion sensor fed by hand.
///
/// Samples are pushed with [`push_sample`](Self::push_sample). Start/stop
/// calls are counted so lifecycle behaviour can be observed.
#[derive(Debug, Clone)]
pub struct SimulatedMotionSensor {
    available: bool,
    active: bool,
    update_interval: Duration,
    latest: Option<MotionSample>,
    start_count: u32,
    stop_count: u32,
}

impl SimulatedMotionSensor {
    /// Create a sensor that reports itself as available
    pub fn new() -> Self {
        Self {
            available: true,
            active: false,
            update_interval: Duration::ZERO,
            latest: None,
            start_count: 0,
            stop_count: 0,
        }
    }

    /// Create a sensor that reports missing hardware and never activates
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Deliver a sample; ignored while the sensor is stopped
    pub fn push_sample(&mut self, sample: MotionSample) {
        if self.active {
            self.latest = Some(sample);
        }
    }

    /// Interval most recently configured by the owner
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Number of `start` calls received
    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    /// Number of `stop` calls received
    pub fn stop_count(&self) -> u32 {
        self.stop_count
    }
}

impl Default for SimulatedMotionSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensor for SimulatedMotionSensor {
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    fn start(&mut self) {
        self.start_count += 1;
        self.active = self.available;
    }

    fn stop(&mut self) {
        self.stop_count += 1;
        self.active = false;
        self.latest = None;
    }

    fn latest_sample(&self) -> Option<MotionSample> {
        self.latest
    }
}
