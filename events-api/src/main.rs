//! Events API Lambda
//!
//! Handles:
//! - GET /status - liveness probe
//! - POST /events - persist a client event under a generated id

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use bootcamp_core::{
    config, dispatch, CreateEventRequest, DynamoStore, Envelope, Error, Handler, Outcome,
    StoredEvent,
};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, RequestExt};
use lambda_runtime::Context;
use serde_json::json;
use tracing::info;

struct EventsApi {
    store: DynamoStore,
}

impl EventsApi {
    fn new(store: DynamoStore) -> Self {
        Self { store }
    }

    async fn create_event(&self, body: &Body) -> Result<Outcome, Error> {
        let body = std::str::from_utf8(body)
            .map_err(|_| Error::Validation("request body is not valid UTF-8".into()))?;
        let request: CreateEventRequest = serde_json::from_str(body)?;

        let event = StoredEvent::new(request.principal_id, request.content);
        self.store.put(&event).await?;

        // Read the item back so the response reflects what was persisted
        let persisted: StoredEvent = self
            .store
            .get_item("id", AttributeValue::S(event.id.clone()))
            .await?
            .ok_or_else(|| Error::Database(format!("event {} missing after write", event.id)))?;

        info!(id = %persisted.id, principal_id = persisted.principal_id, "Stored event");

        Ok(Envelope::json(201, &persisted)?.into())
    }
}

#[async_trait]
impl Handler for EventsApi {
    type Event = Request;

    async fn handle(&self, event: Request, _ctx: &Context) -> Result<Outcome, Error> {
        let method = event.method().as_str().to_string();
        let path = event.uri().path().to_string();

        info!(method = %method, path = %path, "Processing request");

        match (method.as_str(), path.as_str()) {
            ("GET", "/status") => Ok(json!({"message": "All good"}).into()),
            ("POST", "/events") => self.create_event(event.body()).await,
            _ => Err(Error::BadRoute { method, path }),
        }
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
    let client = aws_sdk_dynamodb::Client::new(&config);
    let api = EventsApi::new(DynamoStore::new(client, config::events_table()));

    run(service_fn(|event: Request| {
        let api = &api;
        async move {
            let ctx = event.lambda_context();
            Ok::<_, LambdaError>(dispatch(api, event, &ctx).await.into_response())
        }
    }))
    .await
}
