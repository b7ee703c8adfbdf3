use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::error::NotifierError;

/// Destination for formatted notifications.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic_arn: &str, subject: &str, body: &str) -> Result<(), NotifierError>;
}

#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
}

impl SnsPublisher {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }

    /// Builds the client from the standard provider chain (fed by AWS Lambda).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(aws_sdk_sns::Client::new(&config))
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, topic_arn: &str, subject: &str, body: &str) -> Result<(), NotifierError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| NotifierError::Publish(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(
            message_id = output.message_id().unwrap_or_default(),
            "published notification"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Published {
        pub topic_arn: String,
        pub subject: String,
        pub body: String,
    }

    /// Keeps every publish call in memory.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPublisher {
        published: Mutex<Vec<Published>>,
    }

    impl RecordingPublisher {
        pub(crate) fn published(&self) -> Vec<Published> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(&self, topic_arn: &str, subject: &str, body: &str) -> Result<(), NotifierError> {
            self.published.lock().unwrap().push(Published {
                topic_arn: topic_arn.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
            Ok(())
        }
    }

    pub(crate) struct FailingPublisher;

    #[async_trait]
    impl Publisher for FailingPublisher {
        async fn publish(&self, _topic_arn: &str, _subject: &str, _body: &str) -> Result<(), NotifierError> {
            Err(NotifierError::Publish("service unavailable".to_string()))
        }
    }
}
