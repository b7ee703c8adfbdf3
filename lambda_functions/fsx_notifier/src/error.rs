use thiserror::Error;

/// Failures that are not turned into a 400 result and surface to the Lambda runtime.
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Environment variable not found: {0}")]
    EnvVar(String),
    #[error("SNS publish failed: {0}")]
    Publish(String),
}
