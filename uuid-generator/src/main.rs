//! UUID Generator Lambda
//!
//! Scheduled function: generates a batch of unique identifiers and writes
//! them as one JSON object to the target bucket, keyed by the invocation
//! timestamp.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use bootcamp_core::{config, dispatch, Envelope, Error, Handler, IdBatch, Outcome};
use chrono::Utc;
use lambda_runtime::{run, service_fn, Context, Error as LambdaError, LambdaEvent};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

const BATCH_SIZE: usize = 10;

/// Storage keys are the invocation time, millisecond precision
fn storage_key() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn generate_batch() -> IdBatch {
    IdBatch {
        ids: (0..BATCH_SIZE).map(|_| Uuid::new_v4().to_string()).collect(),
    }
}

struct UuidGenerator {
    s3: aws_sdk_s3::Client,
    bucket: String,
}

impl UuidGenerator {
    fn new(s3: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { s3, bucket }
    }
}

#[async_trait]
impl Handler for UuidGenerator {
    type Event = serde_json::Value;

    async fn handle(&self, _event: serde_json::Value, _ctx: &Context) -> Result<Outcome, Error> {
        let batch = generate_batch();
        info!(count = batch.ids.len(), "Generated identifiers");

        let body = serde_json::to_string(&batch)?;
        let key = storage_key();

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body.into_bytes()))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| Error::ObjectStore(e.to_string()))?;

        info!(bucket = %self.bucket, key = %key, "Stored identifier batch");

        Ok(Envelope::json(
            200,
            &json!({
                "message": format!("Stored identifier batch in '{key}'"),
                "key": key,
            }),
        )?
        .into())
    }
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3 = aws_sdk_s3::Client::new(&config);
    let generator = UuidGenerator::new(s3, config::uuid_bucket());

    run(service_fn(|event: LambdaEvent<serde_json::Value>| {
        let generator = &generator;
        async move {
            let (payload, context) = event.into_parts();
            Ok::<Envelope, LambdaError>(dispatch(generator, payload, &context).await)
        }
    }))
    .await
}
