//! Notification-topic event publisher.
//!
//! Each domain event becomes one [`TopicMessage`] on a broadcast channel.
//! Subscribers receive every message published after they subscribe.

use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::task::{
    domain::DomainEvent,
    ports::{EventPublisher, EventPublisherError, EventPublisherResult},
};

/// Largest number of messages a topic buffers per lagging subscriber.
pub const MAX_TOPIC_CAPACITY: usize = 65_536;

/// Message delivered to topic subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMessage {
    /// Topic the message was published on.
    pub topic: String,
    /// Human-readable subject, `Domain Event: <event_type>`.
    pub subject: String,
    /// Event discriminant, usable for subscriber-side filtering.
    pub event_type: String,
    /// JSON-encoded [`EventEnvelope`].
    pub body: String,
}

impl TopicMessage {
    /// Decodes the message body.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the body is not a valid envelope.
    pub fn envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// JSON body carried by each [`TopicMessage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event discriminant.
    pub event_type: String,
    /// Event identifier.
    pub event_id: String,
    /// Identifier of the task the event describes.
    pub aggregate_id: String,
    /// ISO-8601 timestamp of the event.
    pub timestamp: String,
    /// Flat key-value form of the event.
    pub data: Map<String, Value>,
}

impl From<&DomainEvent> for EventEnvelope {
    fn from(event: &DomainEvent) -> Self {
        Self {
            event_type: event.event_type().to_owned(),
            event_id: event.event_id().as_str().to_owned(),
            aggregate_id: event.aggregate_id().to_owned(),
            timestamp: event
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            data: event.to_map(),
        }
    }
}

/// Publisher broadcasting task events on a named in-process topic.
#[derive(Debug, Clone)]
pub struct TopicEventPublisher {
    topic: String,
    sender: broadcast::Sender<TopicMessage>,
}

impl TopicEventPublisher {
    /// Creates a publisher whose channel buffers up to `capacity` messages
    /// per lagging subscriber.
    ///
    /// `capacity` is clamped to `1..=MAX_TOPIC_CAPACITY`.
    #[must_use]
    pub fn new(topic: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_TOPIC_CAPACITY));
        Self {
            topic: topic.into(),
            sender,
        }
    }

    /// Returns the topic name.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Subscribes to messages published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TopicMessage> {
        self.sender.subscribe()
    }

    fn encode(&self, event: &DomainEvent) -> EventPublisherResult<TopicMessage> {
        let event_type = event.event_type();
        let body = serde_json::to_string(&EventEnvelope::from(event)).map_err(|err| {
            EventPublisherError::Serialization {
                event_type,
                source: Arc::new(err),
            }
        })?;
        Ok(TopicMessage {
            topic: self.topic.clone(),
            subject: format!("Domain Event: {event_type}"),
            event_type: event_type.to_owned(),
            body,
        })
    }
}

#[async_trait]
impl EventPublisher for TopicEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> EventPublisherResult<()> {
        for event in &events {
            let message = self.encode(event)?;
            // A send error only means nobody is subscribed right now.
            match self.sender.send(message) {
                Ok(receivers) => tracing::debug!(
                    topic = %self.topic,
                    event_type = event.event_type(),
                    event_id = %event.event_id(),
                    receivers,
                    "published domain event"
                ),
                Err(_) => tracing::debug!(
                    topic = %self.topic,
                    event_type = event.event_type(),
                    event_id = %event.event_id(),
                    "no subscribers for domain event"
                ),
            }
        }
        Ok(())
    }
}
