//! SQS Logger Lambda
//!
//! Logs the body of every message in an SQS batch and acknowledges the
//! whole batch with a 200. A record with no body is logged as empty rather
//! than aborting the remaining batch.

use async_trait::async_trait;
use aws_lambda_events::event::sqs::SqsEvent;
use bootcamp_core::{dispatch, Envelope, Error, Handler, Outcome};
use lambda_runtime::{run, service_fn, Context, Error as LambdaError, LambdaEvent};
use serde_json::json;
use tracing::info;

struct SqsLogger;

#[async_trait]
impl Handler for SqsLogger {
    type Event = SqsEvent;

    async fn handle(&self, event: SqsEvent, _ctx: &Context) -> Result<Outcome, Error> {
        info!(record_count = event.records.len(), "Received SQS batch");

        for record in &event.records {
            info!(
                message_id = record.message_id.as_deref().unwrap_or(""),
                body = record.body.as_deref().unwrap_or(""),
                "SQS message"
            );
        }

        Ok(json!({
            "message": format!("Processed {} records", event.records.len())
        })
        .into())
    }
}

async fn handler(event: LambdaEvent<SqsEvent>) -> Result<Envelope, LambdaError> {
    let (payload, context) = event.into_parts();
    Ok(dispatch(&SqsLogger, payload, &context).await)
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
