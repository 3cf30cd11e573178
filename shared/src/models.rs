//! Domain models for the bootcamp Lambda functions
//!
//! These types represent the entities the handlers move around:
//! - Stored events: client payloads persisted with a generated id
//! - Audit items: change records derived from table stream images
//! - Tables and reservations: the restaurant booking domain
//! - Forecasts: the Open-Meteo response tree

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Request to store an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub principal_id: i64,
    pub content: serde_json::Value,
}

/// A persisted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    /// Generated unique identifier
    pub id: String,
    pub principal_id: i64,
    /// When the event was accepted, UTC
    pub created_at: DateTime<Utc>,
    /// The client payload
    pub body: serde_json::Value,
}

impl StoredEvent {
    pub fn new(principal_id: i64, content: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            principal_id,
            created_at: Utc::now(),
            body: content,
        }
    }
}

/// Snapshot of the monitored configuration item inside an audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditedValue {
    pub key: Option<String>,
    pub value: Option<i64>,
}

/// One audit-trail record, derived from a table stream image pair
///
/// `updated_attribute` and `old_value` are present only when a prior image
/// exists and the monitored attribute actually changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditItem {
    pub id: String,
    pub item_key: String,
    pub modification_time: DateTime<Utc>,
    pub new_value: AuditedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<i64>,
}

/// A restaurant table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: u32,
    pub number: u32,
    /// Seat count
    pub places: u32,
    pub is_vip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_order: Option<u32>,
}

/// Request to reserve a table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub table_number: u32,
    pub client_name: String,
    pub phone_number: String,
    /// `yyyy-MM-dd`
    pub date: String,
    /// `HH:MM`
    pub slot_time_start: String,
    /// `HH:MM`
    pub slot_time_end: String,
}

impl CreateReservationRequest {
    /// Reject time windows that do not parse as `HH:MM`
    pub fn validate(&self) -> crate::errors::Result<()> {
        for (field, value) in [
            ("slotTimeStart", &self.slot_time_start),
            ("slotTimeEnd", &self.slot_time_end),
        ] {
            if NaiveTime::parse_from_str(value, "%H:%M").is_err() {
                return Err(crate::errors::Error::Validation(format!(
                    "{field} must be HH:MM, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

/// A stored reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

impl Reservation {
    pub fn new(req: CreateReservationRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            table_number: req.table_number,
            client_name: req.client_name,
            phone_number: req.phone_number,
            date: req.date,
            slot_time_start: req.slot_time_start,
            slot_time_end: req.slot_time_end,
        }
    }

    fn slot(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = NaiveTime::parse_from_str(&self.slot_time_start, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(&self.slot_time_end, "%H:%M").ok()?;
        Some((start, end))
    }

    /// Whether two reservations collide: same table, same date, and the
    /// windows intersect. Touching windows (one ends when the other starts)
    /// do not overlap.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        if self.table_number != other.table_number || self.date != other.date {
            return false;
        }
        match (self.slot(), other.slot()) {
            (Some((start, end)), Some((other_start, other_end))) => {
                start < other_end && end > other_start
            }
            _ => false,
        }
    }
}

/// Request to create a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Request to authenticate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Open-Meteo forecast payload, reshaped into a fixed schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub generationtime_ms: f64,
    pub utc_offset_seconds: i64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub hourly: Hourly,
    pub hourly_units: HourlyUnits,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hourly {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyUnits {
    pub time: String,
    pub temperature_2m: String,
}

/// A forecast persisted under a generated identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub id: String,
    pub forecast: Forecast,
}

impl WeatherRecord {
    pub fn new(forecast: Forecast) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            forecast,
        }
    }
}

/// A batch of generated identifiers, serialized to object storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdBatch {
    pub ids: Vec<String>,
}
