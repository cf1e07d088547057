//! Panorama Core - Orientation types and angle math for the Panorama viewer
//!
//! This crate provides the vocabulary shared by every other crate:
//! - The 2-DOF yaw/pitch orientation and the axis masks that restrict it
//! - Raw input types (motion samples, screen orientation, viewport size)
//! - Pure derivations: axis constraint, pitch clamping, compass heading and
//!   optimal field of view

pub mod angles;
pub mod types;

pub use angles::{
    clamp_pitch, compass_angle, constrain_to_axes, optimal_field_of_view, unit_rotation,
    DEFAULT_REFERENCE_COMPASS_ANGLE, FOV_DEFAULT_DEGREES, FOV_MAX_DEGREES, FOV_MIN_DEGREES,
    ONE_ROTATION, PITCH_LIMIT,
};
pub use glam::{Quat, Vec2, Vec3};
pub use types::{
    AxisMask, InteractionMethod, MotionSample, Orientation, ScreenOrientation, ViewportSize,
};
