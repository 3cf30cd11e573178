//! Weather API Lambda
//!
//! Proxies the Open-Meteo forecast API: reads optional latitude/longitude
//! query parameters (Berlin by default) and reshapes the upstream payload
//! into the fixed forecast schema.

use async_trait::async_trait;
use bootcamp_core::{dispatch, Envelope, Error, Forecast, Handler, MeteoClient, Outcome};
use lambda_http::{run, service_fn, Error as LambdaError, Request, RequestExt};
use lambda_runtime::Context;
use serde::Serialize;
use tracing::info;

const DEFAULT_LATITUDE: f64 = 52.52;
const DEFAULT_LONGITUDE: f64 = 13.405;

#[derive(Serialize)]
struct WeatherResponse {
    message: &'static str,
    data: Forecast,
}

fn parse_coordinate(raw: Option<&str>, default: f64, field: &str) -> Result<f64, Error> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| Error::Validation(format!("{field} must be a number, got '{value}'"))),
    }
}

struct WeatherApi {
    meteo: MeteoClient,
}

impl WeatherApi {
    fn new(meteo: MeteoClient) -> Self {
        Self { meteo }
    }
}

#[async_trait]
impl Handler for WeatherApi {
    type Event = Request;

    async fn handle(&self, event: Request, _ctx: &Context) -> Result<Outcome, Error> {
        let params = event.query_string_parameters();
        let latitude = parse_coordinate(params.first("latitude"), DEFAULT_LATITUDE, "latitude")?;
        let longitude =
            parse_coordinate(params.first("longitude"), DEFAULT_LONGITUDE, "longitude")?;

        info!(latitude, longitude, "Fetching forecast");

        let forecast = self.meteo.forecast(latitude, longitude).await?;

        Ok(Envelope::json(
            200,
            &WeatherResponse {
                message: "Weather data retrieved successfully!",
                data: forecast,
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

    let api = WeatherApi::new(MeteoClient::new());

    run(service_fn(|event: Request| {
        let api = &api;
        async move {
            let ctx = event.lambda_context();
            Ok::<_, LambdaError>(dispatch(api, event, &ctx).await.into_response())
        }
    }))
    .await
}
