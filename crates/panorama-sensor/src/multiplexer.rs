use std::collections::HashMap;
use std::time::Duration;

use panorama_core::MotionSample;
use tracing::{debug, info, warn};

use crate::backend::{MotionSensor, SimulatedMotionSensor};
use crate::error::SensorError;
use crate::subscription::{SensorSubscription, SubscriptionToken};

/// Update interval used when no subscription is live (60 Hz)
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Owns the physical motion sensor and arbitrates it among subscribers.
///
/// The sensor runs iff at least one subscription is live, and its interval
/// is always the smallest one requested. Mutate from a single control
/// thread only; callers on other threads must marshal onto it.
///
/// Every `start_updating` should be balanced by a `stop_updating`, otherwise
/// the sensor keeps running for as long as the multiplexer lives.
pub struct SensorMultiplexer<S: MotionSensor> {
    sensor: S,
    subscriptions: HashMap<SubscriptionToken, SensorSubscription>,
    update_interval: Duration,
}

impl<S: MotionSensor> SensorMultiplexer<S> {
    /// Take ownership of a sensor. It is configured for the default interval
    /// but not started.
    pub fn new(mut sensor: S) -> Self {
        sensor.set_update_interval(DEFAULT_UPDATE_INTERVAL);
        Self {
            sensor,
            subscriptions: HashMap::new(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Register a consumer wanting updates at `preferred_interval`.
    ///
    /// Starts the sensor if this is the first live subscription.
    pub fn start_updating(
        &mut self,
        preferred_interval: Duration,
    ) -> Result<SubscriptionToken, SensorError> {
        if preferred_interval.is_zero() {
            return Err(SensorError::InvalidInterval(preferred_interval));
        }

        let previous_count = self.subscriptions.len();
        let subscription = SensorSubscription::new(preferred_interval);
        let token = subscription.token;
        self.subscriptions.insert(token, subscription);
        self.apply_resolved_interval();

        debug!(
            "Sensor subscription {} registered at {:?}, resolved interval {:?}",
            token, preferred_interval, self.update_interval
        );

        if previous_count == 0 {
            if !self.sensor.is_available() {
                warn!("Starting motion updates but no motion hardware is available");
            }
            self.sensor.start();
            info!("Motion sensor started");
        }

        Ok(token)
    }

    /// Remove a subscription.
    ///
    /// Stops the sensor once the last subscription is gone. An unknown token
    /// leaves everything untouched.
    pub fn stop_updating(&mut self, token: SubscriptionToken) -> Result<(), SensorError> {
        if self.subscriptions.remove(&token).is_none() {
            warn!("Stop requested for unknown sensor subscription {}", token);
            return Err(SensorError::UnknownToken(token));
        }

        self.apply_resolved_interval();
        debug!(
            "Sensor subscription {} removed, resolved interval {:?}",
            token, self.update_interval
        );

        if self.subscriptions.is_empty() {
            self.sensor.stop();
            info!("Motion sensor stopped");
        }

        Ok(())
    }

    /// Latest reading, or `None` while the sensor is not delivering
    pub fn current_sample(&self) -> Option<MotionSample> {
        if !self.sensor.is_active() {
            return None;
        }
        self.sensor.latest_sample()
    }

    /// Smallest requested interval among live subscriptions, or the default
    pub fn resolved_update_interval(&self) -> Duration {
        self.subscriptions
            .values()
            .map(|s| s.requested_interval)
            .min()
            .unwrap_or(DEFAULT_UPDATE_INTERVAL)
    }

    /// Interval the sensor is currently configured with
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Whether motion hardware is present
    pub fn is_available(&self) -> bool {
        self.sensor.is_available()
    }

    /// Whether the sensor is currently delivering samples
    pub fn is_active(&self) -> bool {
        self.sensor.is_active()
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check whether `token` belongs to a live subscription
    pub fn is_subscribed(&self, token: SubscriptionToken) -> bool {
        self.subscriptions.contains_key(&token)
    }

    /// Get a reference to the owned sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    fn apply_resolved_interval(&mut self) {
        self.update_interval = self.resolved_update_interval();
        self.sensor.set_update_interval(self.update_interval);
    }
}

impl SensorMultiplexer<SimulatedMotionSensor> {
    /// Feed the simulated sensor; dropped while nobody is subscribed
    pub fn push_sample(&mut self, sample: MotionSample) {
        self.sensor.push_sample(sample);
    }
}
