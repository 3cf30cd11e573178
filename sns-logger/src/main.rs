//! SNS Logger Lambda
//!
//! Logs the message of every record in an SNS batch and acknowledges the
//! whole batch with a 200.

use async_trait::async_trait;
use aws_lambda_events::event::sns::SnsEvent;
use bootcamp_core::{dispatch, Envelope, Error, Handler, Outcome};
use lambda_runtime::{run, service_fn, Context, Error as LambdaError, LambdaEvent};
use serde_json::json;
use tracing::info;

struct SnsLogger;

#[async_trait]
impl Handler for SnsLogger {
    type Event = SnsEvent;

    async fn handle(&self, event: SnsEvent, _ctx: &Context) -> Result<Outcome, Error> {
        info!(record_count = event.records.len(), "Received SNS batch");

        for record in &event.records {
            info!(
                message_id = %record.sns.message_id,
                topic_arn = %record.sns.topic_arn,
                message = %record.sns.message,
                "SNS message"
            );
        }

        Ok(json!({
            "message": format!("Processed {} records", event.records.len())
        })
        .into())
    }
}

async fn handler(event: LambdaEvent<SnsEvent>) -> Result<Envelope, LambdaError> {
    let (payload, context) = event.into_parts();
    Ok(dispatch(&SnsLogger, payload, &context).await)
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    run(service_fn(handler)).await
}
