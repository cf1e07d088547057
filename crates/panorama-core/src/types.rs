//! Core types used throughout the Panorama viewer

use std::ops::{BitAnd, BitOr, Not};

use glam::{EulerRot, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Set of panning axes an input path is allowed to drive.
///
/// An axis missing from the mask is zeroed on every write through the path
/// governed by that mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisMask(u8);

impl AxisMask {
    /// No axis allowed
    pub const NONE: Self = Self(0);
    /// Yaw (left/right panning)
    pub const HORIZONTAL: Self = Self(1 << 0);
    /// Pitch (up/down panning)
    pub const VERTICAL: Self = Self(1 << 1);
    /// Both axes allowed
    pub const BOTH: Self = Self(Self::HORIZONTAL.0 | Self::VERTICAL.0);

    /// Build a mask from its raw bits, ignoring unknown bits
    pub fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::BOTH.0)
    }

    /// Raw bit representation
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Check whether every axis of `other` is allowed by this mask
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether yaw is allowed
    pub fn allows_horizontal(&self) -> bool {
        self.contains(Self::HORIZONTAL)
    }

    /// Check whether pitch is allowed
    pub fn allows_vertical(&self) -> bool {
        self.contains(Self::VERTICAL)
    }

    /// Check whether no axis is allowed
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Allow the axes of `other`
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Disallow the axes of `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::BOTH
    }
}

impl BitOr for AxisMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for AxisMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for AxisMask {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & Self::BOTH.0)
    }
}

/// Camera orientation as a yaw/pitch pair, in radians.
///
/// Yaw is never normalized or clamped. Pitch is kept within
/// [-π/2, π/2] by every mutator in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    /// Horizontal rotation around the vertical axis
    pub yaw: f32,
    /// Vertical rotation towards the poles
    pub pitch: f32,
}

impl Orientation {
    /// The origin (yaw 0, pitch 0)
    pub const ZERO: Self = Self { yaw: 0.0, pitch: 0.0 };

    /// Create a new orientation
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Orientation as a plane point (x = yaw, y = pitch)
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.yaw, self.pitch)
    }

    /// Build an orientation from a plane point (x = yaw, y = pitch)
    pub fn from_vec2(v: Vec2) -> Self {
        Self { yaw: v.x, pitch: v.y }
    }

    /// Euclidean distance to another orientation in the yaw/pitch plane
    pub fn distance(&self, other: Orientation) -> f32 {
        self.as_vec2().distance(other.as_vec2())
    }

    /// Renderer rotation triple `(pitch, yaw, 0)` as Euler angles around X, Y, Z
    pub fn euler_angles(&self) -> Vec3 {
        Vec3::new(self.pitch, self.yaw, 0.0)
    }

    /// Renderer rotation as a quaternion (yaw applied before pitch)
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Orientation of the device screen relative to gravity.
///
/// Anything the host cannot classify maps to `Unknown`, which is handled
/// like portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScreenOrientation {
    /// Home button (or equivalent) at the bottom
    #[default]
    Portrait,
    /// Rotated 180° from portrait
    PortraitUpsideDown,
    /// Rotated so the top of the device points left
    LandscapeLeft,
    /// Rotated so the top of the device points right
    LandscapeRight,
    /// Face up/down or not yet determined
    Unknown,
}

impl ScreenOrientation {
    /// Check if this is one of the two landscape orientations
    pub fn is_landscape(&self) -> bool {
        matches!(
            self,
            ScreenOrientation::LandscapeLeft | ScreenOrientation::LandscapeRight
        )
    }
}

/// The input path that moved the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionMethod {
    /// Finger drag on the view
    Touch,
    /// Device rotation reported by the motion sensor
    Gyroscope,
}

/// One reading of the device motion sensor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    /// Rotation rate around the device x, y, z axes in radians per second
    pub rotation_rate: Vec3,
    /// Sensor timestamp in seconds
    pub timestamp: f64,
}

impl MotionSample {
    /// Create a sample from a rotation rate
    pub fn new(rotation_rate: Vec3, timestamp: f64) -> Self {
        Self {
            rotation_rate,
            timestamp,
        }
    }
}

/// Size of the view the panorama is rendered into, in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    /// Create a new viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for a zero-height viewport
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }

    /// Check whether both dimensions are strictly positive
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Check whether both dimensions are finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}
