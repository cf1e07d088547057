//! Panorama Sensor - Shared access to the device motion sensor
//!
//! A device has one physical motion sensor but many parts of an application
//! may want rotation-rate updates at different rates. [`SensorMultiplexer`]
//! owns the sensor, hands out subscription tokens, runs the sensor only while
//! at least one subscription is live and resolves the update interval to the
//! fastest one requested.

mod backend;
mod error;
mod multiplexer;
mod subscription;

pub use backend::{MotionSensor, SimulatedMotionSensor};
pub use error::SensorError;
pub use multiplexer::{SensorMultiplexer, DEFAULT_UPDATE_INTERVAL};
pub use subscription::{SensorSubscription, SubscriptionToken};
