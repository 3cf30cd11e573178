//! Weather Ingest Lambda
//!
//! Fetches the Open-Meteo forecast for a coordinate (Kyiv by default) and
//! persists it under a generated identifier. Floating-point forecast fields
//! are stored as DynamoDB numbers.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use bootcamp_core::{
    config, dispatch, DynamoStore, Envelope, Error, Handler, MeteoClient, Outcome, WeatherRecord,
};
use lambda_http::{run, service_fn, Error as LambdaError, Request, RequestExt};
use lambda_runtime::Context;
use serde::Serialize;
use tracing::info;

const DEFAULT_LATITUDE: f64 = 50.4375;
const DEFAULT_LONGITUDE: f64 = 30.5;

#[derive(Serialize)]
struct IngestResponse {
    message: &'static str,
    data: WeatherRecord,
}

fn parse_coordinate(raw: Option<&str>, default: f64, field: &str) -> Result<f64, Error> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| Error::Validation(format!("{field} must be a number, got '{value}'"))),
    }
}

struct WeatherIngest {
    meteo: MeteoClient,
    store: DynamoStore,
}

impl WeatherIngest {
    fn new(meteo: MeteoClient, store: DynamoStore) -> Self {
        Self { meteo, store }
    }
}

#[async_trait]
impl Handler for WeatherIngest {
    type Event = Request;

    async fn handle(&self, event: Request, _ctx: &Context) -> Result<Outcome, Error> {
        let params = event.query_string_parameters();
        let latitude = parse_coordinate(params.first("latitude"), DEFAULT_LATITUDE, "latitude")?;
        let longitude =
            parse_coordinate(params.first("longitude"), DEFAULT_LONGITUDE, "longitude")?;

        info!(latitude, longitude, "Fetching forecast for ingestion");

        let forecast = self.meteo.forecast(latitude, longitude).await?;
        let record = WeatherRecord::new(forecast);

        // A persistence failure here is a server-side fault, not a client error
        self.store.put(&record).await.map_err(|e| match e {
            Error::Database(message) => Error::Internal(format!("failed to store forecast: {message}")),
            other => other,
        })?;

        info!(id = %record.id, "Stored forecast");

        Ok(Envelope::json(
            200,
            &IngestResponse {
                message: "Weather data retrieved and stored successfully",
                data: record,
            },
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
    let client = aws_sdk_dynamodb::Client::new(&config);
    let ingest = WeatherIngest::new(
        MeteoClient::new(),
        DynamoStore::new(client, config::weather_table()),
    );

    run(service_fn(|event: Request| {
        let ingest = &ingest;
        async move {
            let ctx = event.lambda_context();
            Ok::<_, LambdaError>(dispatch(ingest, event, &ctx).await.into_response())
        }
    }))
    .await
}
