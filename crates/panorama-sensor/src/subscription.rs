use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle returned by `start_updating`, used to balance it with
/// `stop_updating`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionToken(Uuid);

impl SubscriptionToken {
    /// Create a new random token
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriptionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One consumer's request for motion updates
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSubscription {
    pub token: SubscriptionToken,
    pub requested_interval: Duration,
}

impl SensorSubscription {
    /// Create a subscription with a fresh token
    pub fn new(requested_interval: Duration) -> Self {
        Self {
            token: SubscriptionToken::new(),
            requested_interval,
        }
    }
}
