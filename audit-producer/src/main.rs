//! Audit Producer Lambda
//!
//! Triggered by the configuration table's DynamoDB Stream. For every insert
//! it records the new value; for every modify it compares the monitored
//! attribute between the old and new image and, when the value changed,
//! records which attribute changed along with the previous value. One audit
//! item is written per processed record.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use bootcamp_core::{
    config, dispatch, AuditItem, AuditedValue, DynamoStore, Envelope, Error, Handler, Outcome,
};
use chrono::Utc;
use lambda_runtime::{run, service_fn, Context, Error as LambdaError, LambdaEvent};
use serde_dynamo::AttributeValue;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

/// The single value field whose changes are tracked between images
const MONITORED_ATTRIBUTE: &str = "value";

/// Extract string value from AttributeValue
fn get_string(av: &AttributeValue) -> Option<&str> {
    match av {
        AttributeValue::S(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Extract a numeric value as i64 from AttributeValue
fn get_number(av: &AttributeValue) -> Option<i64> {
    match av {
        AttributeValue::N(n) => n.parse().ok(),
        _ => None,
    }
}

/// Derive the audit item for one stream record
///
/// Returns `None` for records that produce no audit entry (removes and
/// unknown event kinds).
fn derive_audit_item(record: &EventRecord) -> Result<Option<AuditItem>, Error> {
    let event_name = record.event_name.as_str();
    if event_name != "INSERT" && event_name != "MODIFY" {
        return Ok(None);
    }

    let item_key = record
        .change
        .keys
        .get("key")
        .and_then(get_string)
        .ok_or_else(|| Error::Validation("stream record carries no item key".into()))?
        .to_string();

    let new_image = &record.change.new_image;
    let new_value = AuditedValue {
        key: new_image
            .get("key")
            .and_then(get_string)
            .map(str::to_string)
            .or_else(|| Some(item_key.clone())),
        value: new_image.get(MONITORED_ATTRIBUTE).and_then(get_number),
    };

    let mut item = AuditItem {
        id: Uuid::new_v4().to_string(),
        item_key,
        modification_time: Utc::now(),
        new_value,
        updated_attribute: None,
        old_value: None,
    };

    if event_name == "MODIFY" {
        let old_value = record
            .change
            .old_image
            .get(MONITORED_ATTRIBUTE)
            .and_then(get_number);
        if old_value != item.new_value.value {
            item.updated_attribute = Some(MONITORED_ATTRIBUTE.to_string());
            item.old_value = old_value;
        }
    }

    Ok(Some(item))
}

struct AuditProducer {
    store: DynamoStore,
}

impl AuditProducer {
    fn new(store: DynamoStore) -> Self {
        Self { store }
    }

    async fn process_record(&self, record: &EventRecord) -> Result<(), Error> {
        let Some(item) = derive_audit_item(record)? else {
            return Ok(());
        };

        self.store.put(&item).await?;

        info!(
            item_key = %item.item_key,
            updated_attribute = item.updated_attribute.as_deref().unwrap_or(""),
            "Stored audit item"
        );

        Ok(())
    }
}

#[async_trait]
impl Handler for AuditProducer {
    type Event = Event;

    async fn handle(&self, event: Event, _ctx: &Context) -> Result<Outcome, Error> {
        info!(record_count = event.records.len(), "Processing stream batch");

        for record in &event.records {
            if let Err(e) = self.process_record(record).await {
                error!(error = %e, "Failed to process record");
                // Continue processing other records
            }
        }

        Ok(Envelope::json(200, &json!({"message": "Processed stream events successfully"}))?.into())
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
    let producer = AuditProducer::new(DynamoStore::new(client, config::audit_table()));

    run(service_fn(|event: LambdaEvent<Event>| {
        let producer = &producer;
        async move {
            let (payload, context) = event.into_parts();
            Ok::<Envelope, LambdaError>(dispatch(producer, payload, &context).await)
        }
    }))
    .await
}
