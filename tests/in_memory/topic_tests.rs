//! Integration tests for notifications emitted through the topic publisher.

use rstest::rstest;
use serde_json::Value;
use tasktrack::task::{
    adapters::{TopicEventPublisher, TopicMessage},
    services::CreateTaskRequest,
};
use tokio::sync::broadcast;

use super::helpers::{TopicService, topic_service};

async fn next_message(
    receiver: &mut broadcast::Receiver<TopicMessage>,
) -> eyre::Result<TopicMessage> {
    Ok(receiver.recv().await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_emits_status_change_then_completion(
    topic_service: (TopicService, TopicEventPublisher),
) -> eyre::Result<()> {
    let (service, topic) = topic_service;
    let mut receiver = topic.subscribe();

    let created = service
        .create_task(CreateTaskRequest::new("user-4", "Ship it"))
        .await?;
    service.complete_task(&created.task_id).await?;

    let subjects = [
        next_message(&mut receiver).await?.subject,
        next_message(&mut receiver).await?.subject,
        next_message(&mut receiver).await?.subject,
    ];
    assert_eq!(
        subjects,
        [
            "Domain Event: TaskCreated",
            "Domain Event: TaskStatusChanged",
            "Domain Event: TaskCompleted",
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn message_body_is_an_event_envelope(
    topic_service: (TopicService, TopicEventPublisher),
) -> eyre::Result<()> {
    let (service, topic) = topic_service;
    let mut receiver = topic.subscribe();

    let created = service
        .create_task(CreateTaskRequest::new("user-4", "Ship it"))
        .await?;
    let message = next_message(&mut receiver).await?;
    let envelope = message.envelope()?;

    assert_eq!(message.topic, "task-events");
    assert_eq!(message.event_type, "TaskCreated");
    assert_eq!(envelope.event_type, "TaskCreated");
    assert_eq!(envelope.aggregate_id, created.task_id);
    assert_eq!(envelope.data.get("task_title"), Some(&Value::from("Ship it")));
    assert_eq!(envelope.data.get("user_id"), Some(&Value::from("user-4")));
    assert_eq!(
        envelope.data.get("event_id"),
        Some(&Value::from(envelope.event_id.as_str()))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publishing_without_subscribers_succeeds(
    topic_service: (TopicService, TopicEventPublisher),
) -> eyre::Result<()> {
    let (service, _topic) = topic_service;
    let created = service
        .create_task(CreateTaskRequest::new("user-4", "Quiet"))
        .await?;
    assert!(service.get_task(&created.task_id).await?.is_some());
    Ok(())
}
