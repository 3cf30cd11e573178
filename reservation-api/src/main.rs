//! Reservation API Lambda
//!
//! Handles the restaurant booking surface:
//! - POST /signup, POST /signin - Cognito-backed account management
//! - GET/POST /tables, GET /tables/{id} - table catalog
//! - GET/POST /reservations - bookings, with overlap rejection

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use bootcamp_core::{
    config, dispatch, CreateReservationRequest, DynamoStore, Envelope, Error, Handler, Outcome,
    Reservation, SigninRequest, SignupRequest, Table,
};
use lambda_http::{run, service_fn, Body, Error as LambdaError, Request, RequestExt};
use lambda_runtime::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::info;

mod auth;
use auth::CognitoAuth;

#[derive(Serialize)]
struct TablesResponse {
    tables: Vec<Table>,
}

#[derive(Serialize)]
struct ReservationsResponse {
    reservations: Vec<Reservation>,
}

#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Signup,
    Signin,
    ListTables,
    CreateTable,
    GetTable(&'a str),
    CreateReservation,
    ListReservations,
}

fn route<'a>(method: &str, path: &'a str) -> Result<Route<'a>, Error> {
    match (method, path) {
        ("POST", "/signup") => Ok(Route::Signup),
        ("POST", "/signin") => Ok(Route::Signin),
        ("GET", "/tables") => Ok(Route::ListTables),
        ("POST", "/tables") => Ok(Route::CreateTable),
        ("GET", p) if p.starts_with("/tables/") => Ok(Route::GetTable(&p["/tables/".len()..])),
        ("POST", "/reservations") => Ok(Route::CreateReservation),
        ("GET", "/reservations") => Ok(Route::ListReservations),
        (method, path) => Err(Error::BadRoute {
            method: method.to_string(),
            path: path.to_string(),
        }),
    }
}

fn parse_body<T: DeserializeOwned>(body: &Body) -> Result<T, Error> {
    let body = std::str::from_utf8(body)
        .map_err(|_| Error::Validation("request body is not valid UTF-8".into()))?;
    Ok(serde_json::from_str(body)?)
}

struct ReservationApi {
    auth: CognitoAuth,
    tables: DynamoStore,
    reservations: DynamoStore,
}

impl ReservationApi {
    fn new(auth: CognitoAuth, tables: DynamoStore, reservations: DynamoStore) -> Self {
        Self {
            auth,
            tables,
            reservations,
        }
    }

    async fn signup(&self, body: &Body) -> Result<Outcome, Error> {
        let request: SignupRequest = parse_body(body)?;
        if request.email.is_empty() {
            return Err(Error::MissingField("email".into()));
        }
        if request.password.is_empty() {
            return Err(Error::MissingField("password".into()));
        }
        self.auth.sign_up(&request).await?;
        Ok(json!({"message": "User created"}).into())
    }

    async fn signin(&self, body: &Body) -> Result<Outcome, Error> {
        let request: SigninRequest = parse_body(body)?;
        if request.email.is_empty() {
            return Err(Error::MissingField("email".into()));
        }
        if request.password.is_empty() {
            return Err(Error::MissingField("password".into()));
        }
        let token = self.auth.sign_in(&request).await?;
        Ok(json!({"accessToken": token}).into())
    }

    async fn list_tables(&self) -> Result<Outcome, Error> {
        let tables: Vec<Table> = self.tables.scan_all().await?;
        Ok(Envelope::json(200, &TablesResponse { tables })?.into())
    }

    async fn create_table(&self, body: &Body) -> Result<Outcome, Error> {
        let table: Table = parse_body(body)?;
        self.tables.put(&table).await?;
        Ok(json!({"id": table.id}).into())
    }

    async fn get_table(&self, raw_id: &str) -> Result<Outcome, Error> {
        let id: u32 = raw_id.parse().map_err(|_| {
            Error::Validation(format!("tableId must be an integer, got '{raw_id}'"))
        })?;

        let table: Table = self
            .tables
            .get_item("id", AttributeValue::N(id.to_string()))
            .await?
            .ok_or_else(|| Error::NotFound(format!("Table {id}")))?;

        Ok(Envelope::json(200, &table)?.into())
    }

    async fn create_reservation(&self, body: &Body) -> Result<Outcome, Error> {
        let request: CreateReservationRequest = parse_body(body)?;
        request.validate()?;

        let tables: Vec<Table> = self.tables.scan_all().await?;
        if !tables.iter().any(|t| t.number == request.table_number) {
            return Err(Error::Validation(format!(
                "table {} does not exist",
                request.table_number
            )));
        }

        let reservation = Reservation::new(request);
        let existing: Vec<Reservation> = self.reservations.scan_all().await?;
        if let Some(conflict) = existing.iter().find(|r| r.overlaps(&reservation)) {
            return Err(Error::ReservationConflict(format!(
                "table {} is already reserved on {} from {} to {}",
                conflict.table_number, conflict.date, conflict.slot_time_start, conflict.slot_time_end
            )));
        }

        self.reservations.put(&reservation).await?;

        info!(id = %reservation.id, table_number = reservation.table_number, "Created reservation");

        Ok(json!({"reservationId": reservation.id}).into())
    }

    async fn list_reservations(&self) -> Result<Outcome, Error> {
        let reservations: Vec<Reservation> = self.reservations.scan_all().await?;
        Ok(Envelope::json(200, &ReservationsResponse { reservations })?.into())
    }
}

#[async_trait]
impl Handler for ReservationApi {
    type Event = Request;

    async fn handle(&self, event: Request, _ctx: &Context) -> Result<Outcome, Error> {
        let method = event.method().as_str().to_string();
        let path = event.uri().path().to_string();

        info!(method = %method, path = %path, "Processing request");

        match route(&method, &path)? {
            Route::Signup => self.signup(event.body()).await,
            Route::Signin => self.signin(event.body()).await,
            Route::ListTables => self.list_tables().await,
            Route::CreateTable => self.create_table(event.body()).await,
            Route::GetTable(id) => self.get_table(id).await,
            Route::CreateReservation => self.create_reservation(event.body()).await,
            Route::ListReservations => self.list_reservations().await,
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
    let dynamo = aws_sdk_dynamodb::Client::new(&config);
    let cognito = aws_sdk_cognitoidentityprovider::Client::new(&config);

    let api = ReservationApi::new(
        CognitoAuth::new(
            cognito,
            config::user_pool_id()?,
            config::user_pool_client_id()?,
        ),
        DynamoStore::new(dynamo.clone(), config::tables_table()),
        DynamoStore::new(dynamo, config::reservations_table()),
    );

    run(service_fn(|event: Request| {
        let api = &api;
        async move {
            let ctx = event.lambda_context();
            Ok::<_, LambdaError>(dispatch(api, event, &ctx).await.into_response())
        }
    }))
    .await
}
