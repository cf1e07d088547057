//! Pure angle derivations shared by every camera update path
//!
//! Nothing in here holds state. The gesture path, the motion path and
//! mask-change re-projection all go through [`constrain_to_axes`] and
//! [`clamp_pitch`] so they agree on what a masked orientation looks like.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::types::{AxisMask, Orientation, ViewportSize};

/// One full rotation in radians
pub const ONE_ROTATION: f32 = TAU;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`
pub const PITCH_LIMIT: f32 = FRAC_PI_2;

/// Compass heading reported when the camera yaw is zero
pub const DEFAULT_REFERENCE_COMPASS_ANGLE: f32 = PI;

/// Results closer than this to a full rotation are reported as zero
const WRAP_ACCURACY: f32 = 0.0001;

/// Vertical field of view used when the viewport has no height
pub const FOV_DEFAULT_DEGREES: f32 = 60.0;
/// Narrowest vertical field of view
pub const FOV_MIN_DEGREES: f32 = 40.0;
/// Widest vertical field of view
pub const FOV_MAX_DEGREES: f32 = 120.0;

// Linear fit of a comfortable vertical field of view against aspect ratio.
const FOV_SLOPE: f32 = -33.013_658_820_110_44;
const FOV_INTERCEPT: f32 = 118.599_244_406;

/// Zero every component of `orientation` whose axis is missing from `mask`
#[inline]
pub fn constrain_to_axes(orientation: Orientation, mask: AxisMask) -> Orientation {
    let mut orientation = orientation;
    if !mask.allows_horizontal() {
        orientation.yaw = 0.0;
    }
    if !mask.allows_vertical() {
        orientation.pitch = 0.0;
    }
    orientation
}

/// Clamp pitch to `[-π/2, π/2]`, leaving yaw untouched
#[inline]
pub fn clamp_pitch(orientation: Orientation) -> Orientation {
    Orientation {
        yaw: orientation.yaw,
        pitch: orientation.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
    }
}

/// Reduce a rotation modulo one full turn.
///
/// The remainder keeps the sign of the input, so the result lies in
/// `(-2π, 2π)`. A remainder within `0.0001` of a full turn is snapped to 0
/// so values hovering at the seam do not flicker between ±2π and 0.
#[inline]
pub fn unit_rotation(rotation: f32) -> f32 {
    let raw = rotation % ONE_ROTATION;
    if ONE_ROTATION - raw.abs() < WRAP_ACCURACY {
        0.0
    } else {
        raw
    }
}

/// Compass heading in radians for a camera yaw
pub fn compass_angle(yaw: f32) -> f32 {
    unit_rotation(-yaw + DEFAULT_REFERENCE_COMPASS_ANGLE)
}

/// Vertical field of view in degrees that fills a viewport of this size.
///
/// Narrow (portrait) viewports get a wider angle than wide (landscape)
/// ones. The result always lies in `[40°, 120°]`; a viewport without height
/// yields the 60° default.
pub fn optimal_field_of_view(viewport: ViewportSize) -> f32 {
    match viewport.aspect_ratio() {
        Some(ratio) => (FOV_SLOPE * ratio + FOV_INTERCEPT).clamp(FOV_MIN_DEGREES, FOV_MAX_DEGREES),
        None => FOV_DEFAULT_DEGREES,
    }
}
