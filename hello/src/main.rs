//! Hello Lambda
//!
//! Static responder: GET /hello answers with a fixed payload, anything else
//! is a 400 naming the offending path and method.

use async_trait::async_trait;
use bootcamp_core::{dispatch, Envelope, Error, Handler, Outcome};
use lambda_http::{run, service_fn, Error as LambdaError, Request, RequestExt};
use lambda_runtime::Context;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HelloResponse {
    status_code: u16,
    message: &'static str,
}

struct HelloWorld;

#[async_trait]
impl Handler for HelloWorld {
    type Event = Request;

    async fn handle(&self, event: Request, _ctx: &Context) -> Result<Outcome, Error> {
        let method = event.method().as_str().to_string();
        let path = event.uri().path().to_string();

        info!(method = %method, path = %path, "Processing request");

        if method == "GET" && path == "/hello" {
            let body = HelloResponse {
                status_code: 200,
                message: "Hello from Lambda",
            };
            Ok(Envelope::json(200, &body)?.into())
        } else {
            Err(Error::BadRoute { method, path })
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

    let handler = HelloWorld;

    run(service_fn(|event: Request| {
        let handler = &handler;
        async move {
            let ctx = event.lambda_context();
            Ok::<_, LambdaError>(dispatch(handler, event, &ctx).await.into_response())
        }
    }))
    .await
}
