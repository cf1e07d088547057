//! Panorama Camera - Camera control for a 360° video viewer
//!
//! Turns finger drags and gyroscope samples into one axis-constrained
//! yaw/pitch orientation and derives the compass heading and field of view
//! a renderer needs.

mod config;
mod controller;
mod detector;
mod error;
mod gesture;
mod motion;
mod orientation;
mod reorient;

pub use config::CameraConfig;
pub use controller::{CameraController, CameraUpdate};
pub use detector::InitialMovementDetector;
pub use error::CameraError;
pub use gesture::{GestureState, PanGestureIntegrator, PanTracker};
pub use motion::GyroscopeIntegrator;
pub use orientation::OrientationState;
pub use reorient::ReorientationAnimation;
