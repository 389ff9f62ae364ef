//! Event publisher port for broadcasting task domain events.

use crate::task::domain::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event publisher operations.
pub type EventPublisherResult<T> = Result<T, EventPublisherError>;

/// Domain event publication contract.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes events in order.
    ///
    /// An empty batch must be accepted as a no-op.
    async fn publish(&self, events: Vec<DomainEvent>) -> EventPublisherResult<()>;
}

/// Errors returned by event publisher implementations.
#[derive(Debug, Clone, Error)]
pub enum EventPublisherError {
    /// The event could not be encoded for the transport.
    #[error("failed to encode {event_type} event: {source}")]
    Serialization {
        /// Discriminant of the event that failed to encode.
        event_type: &'static str,
        /// Underlying encoder error.
        source: Arc<serde_json::Error>,
    },

    /// The transport rejected or failed to deliver the event.
    #[error("event delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventPublisherError {
    /// Wraps a transport error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
