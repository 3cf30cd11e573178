//! Integration tests for the bootcamp APIs
//!
//! Each section targets one deployed endpoint and is skipped unless the
//! matching *_API_URL environment variable is set.

use bootcamp_integration_tests::{
    client::{
        BootcampClient, CreateEventRequest, CreateReservationRequest, SigninRequest,
        SignupRequest, Table,
    },
    fixtures::{unique_client_name, unique_email, unique_table_number},
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn get_client(var: &str) -> Option<BootcampClient> {
    match BootcampClient::from_env(var) {
        Some(client) => Some(client),
        None => {
            eprintln!("Skipping: {var} not set");
            None
        }
    }
}

// ============================================================================
// Hello API
// ============================================================================

#[tokio::test]
async fn test_hello_returns_fixed_payload() {
    let Some(client) = get_client("HELLO_API_URL") else { return };

    let response = client.hello().await.expect("GET /hello failed");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.message, "Hello from Lambda");
}

#[tokio::test]
async fn test_hello_is_idempotent() {
    let Some(client) = get_client("HELLO_API_URL") else { return };

    let first = client.hello().await.expect("GET /hello failed");
    let second = client.hello().await.expect("GET /hello failed");
    assert_eq!(first.message, second.message);
    assert_eq!(first.status_code, second.status_code);
}

#[tokio::test]
async fn test_hello_unknown_path_is_rejected() {
    let Some(client) = get_client("HELLO_API_URL") else { return };

    let err = client
        .raw_get("/unknown")
        .await
        .expect_err("GET /unknown must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert!(err.body().contains("/unknown"));
    assert!(err.body().contains("GET"));
}

// ============================================================================
// Events API
// ============================================================================

#[tokio::test]
async fn test_status_endpoint() {
    let Some(client) = get_client("EVENTS_API_URL") else { return };

    let body = client.status().await.expect("GET /status failed");
    assert_eq!(body["message"], "All good");
}

#[tokio::test]
async fn test_event_round_trip() {
    let Some(client) = get_client("EVENTS_API_URL") else { return };

    let content = json!({"k": "v", "n": 2});
    let stored = client
        .create_event(&CreateEventRequest {
            principal_id: 1,
            content: content.clone(),
        })
        .await
        .expect("POST /events failed");

    assert!(!stored.id.is_empty());
    assert_eq!(stored.principal_id, 1);
    assert_eq!(stored.body, content);
    assert!(stored.created_at.contains('T'));
}

#[tokio::test]
async fn test_events_unknown_route_is_rejected() {
    let Some(client) = get_client("EVENTS_API_URL") else { return };

    let err = client
        .raw_get("/nowhere")
        .await
        .expect_err("unknown route must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

// ============================================================================
// Weather API
// ============================================================================

#[tokio::test]
async fn test_weather_default_coordinates() {
    let Some(client) = get_client("WEATHER_API_URL") else { return };

    let response = client.weather(None, None).await.expect("forecast failed");
    assert_eq!(response.message, "Weather data retrieved successfully!");
    assert!(response.data["hourly"]["temperature_2m"].is_array());
}

#[tokio::test]
async fn test_weather_explicit_coordinates() {
    let Some(client) = get_client("WEATHER_API_URL") else { return };

    let response = client
        .weather(Some(50.4375), Some(30.5))
        .await
        .expect("forecast failed");
    assert!(response.data["latitude"].is_number());
}

// ============================================================================
// Reservation API
// ============================================================================

#[tokio::test]
async fn test_signup_and_signin() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let email = unique_email();
    let password = "Str0ngPassw0rd!".to_string();

    client
        .signup(&SignupRequest {
            first_name: "Test".into(),
            last_name: "User".into(),
            email: email.clone(),
            password: password.clone(),
        })
        .await
        .expect("signup failed");

    let signin = client
        .signin(&SigninRequest {
            email: email.clone(),
            password,
        })
        .await
        .expect("signin failed");
    assert!(!signin.access_token.is_empty());

    // Second signup with the same email must be rejected
    let err = client
        .signup(&SignupRequest {
            first_name: "Test".into(),
            last_name: "User".into(),
            email,
            password: "AnotherPassw0rd!".into(),
        })
        .await
        .expect_err("duplicate signup must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}

#[tokio::test]
async fn test_signin_with_bad_credentials() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let err = client
        .signin(&SigninRequest {
            email: unique_email(),
            password: "WrongPassw0rd!".into(),
        })
        .await
        .expect_err("signin with unknown user must fail");
    assert!(matches!(err.status().map(|s| s.as_u16()), Some(400) | Some(401)));
}

#[tokio::test]
async fn test_table_round_trip() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let number = unique_table_number();
    let table = Table {
        id: number,
        number,
        places: 4,
        is_vip: false,
        min_order: Some(500),
    };

    let created = client.create_table(&table).await.expect("create failed");
    assert_eq!(created.id, number);

    let fetched = client.get_table(number).await.expect("get failed");
    assert_eq!(fetched.number, number);
    assert_eq!(fetched.places, 4);
    assert_eq!(fetched.min_order, Some(500));

    let listed = client.get_tables().await.expect("list failed");
    assert!(listed.tables.iter().any(|t| t.number == number));
}

#[tokio::test]
async fn test_missing_table_is_404() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let err = client
        .get_table(999_999_999)
        .await
        .expect_err("unknown table must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn test_reservation_overlap_is_rejected() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let number = unique_table_number();
    let table = Table {
        id: number,
        number,
        places: 2,
        is_vip: false,
        min_order: None,
    };
    client.create_table(&table).await.expect("create failed");

    let base = CreateReservationRequest {
        table_number: number,
        client_name: unique_client_name(),
        phone_number: "+10000000000".into(),
        date: "2026-09-01".into(),
        slot_time_start: "10:00".into(),
        slot_time_end: "11:00".into(),
    };
    client
        .create_reservation(&base)
        .await
        .expect("first reservation failed");

    // Overlapping window on the same table and date
    let overlapping = CreateReservationRequest {
        slot_time_start: "10:30".into(),
        slot_time_end: "11:30".into(),
        ..base.clone()
    };
    let err = client
        .create_reservation(&overlapping)
        .await
        .expect_err("overlapping reservation must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

    // Touching window is allowed
    let touching = CreateReservationRequest {
        slot_time_start: "11:00".into(),
        slot_time_end: "12:00".into(),
        ..base
    };
    let created = client
        .create_reservation(&touching)
        .await
        .expect("touching reservation failed");
    assert!(!created.reservation_id.is_empty());

    let listed = client.get_reservations().await.expect("list failed");
    assert!(listed
        .reservations
        .iter()
        .any(|r| r.table_number == number && r.slot_time_start == "11:00"));
}

#[tokio::test]
async fn test_reservation_for_unknown_table_is_rejected() {
    let Some(client) = get_client("RESERVATION_API_URL") else { return };

    let err = client
        .create_reservation(&CreateReservationRequest {
            table_number: 999_999_998,
            client_name: unique_client_name(),
            phone_number: "+10000000000".into(),
            date: "2026-09-01".into(),
            slot_time_start: "10:00".into(),
            slot_time_end: "11:00".into(),
        })
        .await
        .expect_err("reservation for unknown table must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
}
