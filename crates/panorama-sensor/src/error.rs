use std::time::Duration;

use crate::subscription::SubscriptionToken;

/// Errors that can occur when managing sensor subscriptions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("no live subscription for token {0}")]
    UnknownToken(SubscriptionToken),

    #[error("requested update interval must be non-zero, got {0:?}")]
    InvalidInterval(Duration),
}
