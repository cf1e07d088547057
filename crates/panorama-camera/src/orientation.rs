use panorama_core::{clamp_pitch, constrain_to_axes, AxisMask, Orientation};

/// Current camera orientation plus the axis restrictions of each input path.
///
/// Pitch stays within [-π/2, π/2] after every mutation. Changing a mask
/// re-projects the stored orientation through it straight away.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientationState {
    position: Orientation,
    gesture_axes: AxisMask,
    motion_axes: AxisMask,
}

impl OrientationState {
    /// Create a state at `initial` with both paths allowed on both axes
    pub fn new(initial: Orientation) -> Self {
        Self {
            position: clamp_pitch(initial),
            gesture_axes: AxisMask::BOTH,
            motion_axes: AxisMask::BOTH,
        }
    }

    /// Current yaw/pitch
    pub fn position(&self) -> Orientation {
        self.position
    }

    /// Replace the orientation, clamping pitch
    pub fn set_position(&mut self, position: Orientation) {
        self.position = clamp_pitch(position);
    }

    /// Axes the pan gesture may drive
    pub fn gesture_axes(&self) -> AxisMask {
        self.gesture_axes
    }

    /// Axes the motion sensor may drive
    pub fn motion_axes(&self) -> AxisMask {
        self.motion_axes
    }

    /// Change the gesture mask. Returns `false` (and does nothing) when the
    /// mask is unchanged.
    pub fn set_gesture_axes(&mut self, mask: AxisMask) -> bool {
        if self.gesture_axes == mask {
            return false;
        }
        self.gesture_axes = mask;
        self.position = constrain_to_axes(self.position, mask);
        true
    }

    /// Change the motion mask. Returns `false` (and does nothing) when the
    /// mask is unchanged.
    pub fn set_motion_axes(&mut self, mask: AxisMask) -> bool {
        if self.motion_axes == mask {
            return false;
        }
        self.motion_axes = mask;
        self.position = constrain_to_axes(self.position, mask);
        true
    }
}
