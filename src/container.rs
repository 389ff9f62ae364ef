//! Wiring of the production adapters into a [`TaskService`].

use crate::config::{ConfigError, TaskTrackConfig};
use crate::task::{
    adapters::{
        TopicEventPublisher, TopicMessage,
        postgres::{PostgresTaskRepository, TaskPgPool},
    },
    services::TaskService,
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Task service backed by `PostgreSQL` and the in-process topic.
pub type PostgresTaskService =
    TaskService<PostgresTaskRepository, TopicEventPublisher, DefaultClock>;

/// Owns the production adapters and the service built on them.
#[derive(Clone)]
pub struct TaskContainer {
    service: PostgresTaskService,
    publisher: Arc<TopicEventPublisher>,
}

impl TaskContainer {
    /// Builds the adapters described by `config`.
    ///
    /// The connection pool is created lazily, so no database connection is
    /// attempted until the first repository call.
    #[must_use]
    pub fn from_config(config: &TaskTrackConfig) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
        let pool: TaskPgPool = Pool::builder()
            .max_size(config.db_pool_size)
            .min_idle(Some(0))
            .build_unchecked(manager);

        let repository = Arc::new(PostgresTaskRepository::new(pool));
        let publisher = Arc::new(TopicEventPublisher::new(
            config.event_topic.as_str(),
            config.event_capacity,
        ));
        let service = TaskService::new(repository, Arc::clone(&publisher), Arc::new(DefaultClock));

        tracing::info!(
            event_topic = %config.event_topic,
            db_pool_size = config.db_pool_size,
            "task container ready"
        );
        Self { service, publisher }
    }

    /// Reads [`TaskTrackConfig`] from the environment and builds the adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the environment is incomplete or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = TaskTrackConfig::from_env()?;
        Ok(Self::from_config(&config))
    }

    /// Returns the wired task service.
    #[must_use]
    pub const fn service(&self) -> &PostgresTaskService {
        &self.service
    }

    /// Returns the topic that domain events are published to.
    #[must_use]
    pub fn event_topic(&self) -> &str {
        self.publisher.topic()
    }

    /// Subscribes to domain event notifications published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TopicMessage> {
        self.publisher.subscribe()
    }
}
