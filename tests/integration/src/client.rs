//! HTTP client for exercising deployed bootcamp APIs

use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// API client bound to one deployed endpoint
pub struct BootcampClient {
    client: Client,
    base_url: String,
}

// Request/Response types

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloResponse {
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub principal_id: i64,
    pub content: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub id: String,
    pub principal_id: i64,
    pub created_at: String,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub message: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: u32,
    pub number: u32,
    pub places: u32,
    pub is_vip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableResponse {
    pub id: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub table_number: u32,
    pub client_name: String,
    pub phone_number: String,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub reservation_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub table_number: u32,
    pub client_name: String,
    pub phone_number: String,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Result type for API responses
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// HTTP error with status code and body
    Http { status: StatusCode, body: String },
    /// Network or serialization error
    Request(String),
}

impl ApiError {
    /// Status code of an HTTP error, `None` for transport failures
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Request(_) => None,
        }
    }

    /// Body of an HTTP error
    pub fn body(&self) -> &str {
        match self {
            ApiError::Http { body, .. } => body,
            ApiError::Request(_) => "",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ApiError::Request(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl BootcampClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from an environment variable, `None` when unset
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().map(|url| Self::new(&url))
    }

    // =========================================================================
    // Hello API
    // =========================================================================

    pub async fn hello(&self) -> ApiResult<HelloResponse> {
        self.get("/hello").await
    }

    pub async fn raw_get(&self, path: &str) -> ApiResult<serde_json::Value> {
        self.get(path).await
    }

    // =========================================================================
    // Events API
    // =========================================================================

    pub async fn status(&self) -> ApiResult<serde_json::Value> {
        self.get("/status").await
    }

    pub async fn create_event(&self, req: &CreateEventRequest) -> ApiResult<StoredEvent> {
        self.post("/events", req).await
    }

    // =========================================================================
    // Weather API
    // =========================================================================

    pub async fn weather(&self, latitude: Option<f64>, longitude: Option<f64>) -> ApiResult<WeatherResponse> {
        let path = match (latitude, longitude) {
            (Some(lat), Some(lon)) => format!("/?latitude={lat}&longitude={lon}"),
            _ => "/".to_string(),
        };
        self.get(&path).await
    }

    // =========================================================================
    // Reservation API
    // =========================================================================

    pub async fn signup(&self, req: &SignupRequest) -> ApiResult<serde_json::Value> {
        self.post("/signup", req).await
    }

    pub async fn signin(&self, req: &SigninRequest) -> ApiResult<SigninResponse> {
        self.post("/signin", req).await
    }

    pub async fn get_tables(&self) -> ApiResult<TablesResponse> {
        self.get("/tables").await
    }

    pub async fn create_table(&self, table: &Table) -> ApiResult<CreateTableResponse> {
        self.post("/tables", table).await
    }

    pub async fn get_table(&self, id: u32) -> ApiResult<Table> {
        self.get(&format!("/tables/{}", id)).await
    }

    pub async fn create_reservation(
        &self,
        req: &CreateReservationRequest,
    ) -> ApiResult<CreateReservationResponse> {
        self.post("/reservations", req).await
    }

    pub async fn get_reservations(&self) -> ApiResult<ReservationsResponse> {
        self.get("/reservations").await
    }

    // =========================================================================
    // HTTP Helpers
    // =========================================================================

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        self.handle_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|e| ApiError::Request(e.to_string()))
        } else {
            Err(ApiError::Http { status, body })
        }
    }
}
