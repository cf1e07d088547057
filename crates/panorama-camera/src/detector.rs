use panorama_core::InteractionMethod;
use tracing::info;

/// Fires once, the first time the user moves the camera.
///
/// Edge-triggered: after the first qualifying call every later call is a
/// no-op, whichever input caused it.
#[derive(Debug, Clone, Default)]
pub struct InitialMovementDetector {
    fired: Option<InteractionMethod>,
}

impl InitialMovementDetector {
    /// Create a detector that has not fired
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a qualifying movement. Returns the method only on the call
    /// that fires.
    pub fn evaluate(&mut self, method: InteractionMethod) -> Option<InteractionMethod> {
        if self.fired.is_some() {
            return None;
        }
        self.fired = Some(method);
        info!("User first moved the camera via {:?}", method);
        Some(method)
    }

    /// Whether the detector has fired
    pub fn has_fired(&self) -> bool {
        self.fired.is_some()
    }

    /// The method that fired the detector, if it has
    pub fn method(&self) -> Option<InteractionMethod> {
        self.fired
    }
}
