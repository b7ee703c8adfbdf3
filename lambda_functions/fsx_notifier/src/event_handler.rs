use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

use crate::event::InputEvent;
use crate::notification::{HandlerResult, NotificationMessage};
use crate::publisher::Publisher;

/// Classifies one event and publishes a notification when it announces a new
/// FSx file system. Unqualified events yield a 400 result; publish failures
/// are returned to the runtime.
pub(crate) async fn function_handler<P: Publisher>(
    event: LambdaEvent<Value>,
    publisher: &P,
    topic_arn: &str,
) -> Result<HandlerResult, Error> {
    let (payload, context) = event.into_parts();
    let request_id = context.request_id;
    tracing::info!(%request_id, event = %payload, "received event");

    let input = InputEvent::from_value(payload);
    let shape = input.shape();

    let created = match input.qualify() {
        Ok(created) => created,
        Err(rejection) => {
            tracing::warn!(%request_id, shape, reason = %rejection, "event rejected");
            return Ok(HandlerResult::rejected(&rejection));
        }
    };

    tracing::info!(
        %request_id,
        source = created.source.as_str(),
        file_system_id = %created.file_system_id,
        file_system_type = ?created.file_system_type,
        storage_capacity = ?created.storage_capacity,
        "file system creation detected"
    );

    let message = NotificationMessage::from_created(&created);
    if let Err(e) = publisher.publish(topic_arn, message.subject, &message.body).await {
        tracing::error!(%request_id, error = %e, "failed to publish notification");
        return Err(e.into());
    }

    Ok(HandlerResult::ok())
}
