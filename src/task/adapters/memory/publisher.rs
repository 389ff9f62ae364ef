//! In-memory event publisher that records every published batch.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::DomainEvent,
    ports::{EventPublisher, EventPublisherError, EventPublisherResult},
};

/// Thread-safe publisher that keeps published batches for inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    batches: Arc<RwLock<Vec<Vec<DomainEvent>>>>,
}

impl InMemoryEventPublisher {
    /// Creates a publisher with no recorded batches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every published batch in publication order, including empty
    /// ones.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublisherError::Delivery`] when the state lock is
    /// poisoned.
    pub fn batches(&self) -> EventPublisherResult<Vec<Vec<DomainEvent>>> {
        let batches = self.batches.read().map_err(poisoned)?;
        Ok(batches.clone())
    }

    /// Returns all published events flattened in publication order.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublisherError::Delivery`] when the state lock is
    /// poisoned.
    pub fn events(&self) -> EventPublisherResult<Vec<DomainEvent>> {
        let batches = self.batches.read().map_err(poisoned)?;
        Ok(batches.iter().flatten().cloned().collect())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> EventPublisherError {
    EventPublisherError::delivery(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> EventPublisherResult<()> {
        let mut batches = self.batches.write().map_err(poisoned)?;
        batches.push(events);
        Ok(())
    }
}
