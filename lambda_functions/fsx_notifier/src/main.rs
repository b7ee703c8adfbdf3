mod config;
mod error;
mod event;
mod event_handler;
mod notification;
mod publisher;

use lambda_runtime::{run, service_fn, Error};
use tokio::sync::OnceCell;

use config::NotifierConfig;
use error::NotifierError;
use event_handler::function_handler;
use publisher::SnsPublisher;

// Shared across invocations, never mutated after cold start
#[derive(Debug)]
struct SharedResources {
    publisher: SnsPublisher,
    topic_arn: String,
}

static RESOURCES: OnceCell<SharedResources> = OnceCell::const_new();

async fn initialize_resources() -> Result<SharedResources, NotifierError> {
    let config = NotifierConfig::from_env()?;
    let publisher = SnsPublisher::from_env().await;

    Ok(SharedResources {
        publisher,
        topic_arn: config.topic_arn,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .init();

    let resources = RESOURCES.get_or_try_init(initialize_resources).await?;
    tracing::info!(topic_arn = %resources.topic_arn, "shared resources initialized");

    run(service_fn(|event| {
        function_handler(event, &resources.publisher, &resources.topic_arn)
    }))
    .await
}
