use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, put};
use axum::{Json, Router};
use blockseat_core::{
    AuthToken, BlockSeatRepository, BookingRepository, CoreError, VisaRepository,
};
use blockseat_order::{BookingKind, BookingStatus, VisaStatus};
use blockseat_shared::Masked;
use blockseat_store::{BackendClient, HttpBlockSeatRepository, HttpBookingRepository, HttpVisaRepository};
use serde_json::{json, Value};

const TOKEN: &str = "test-token";

#[derive(Clone, Default)]
struct MockBackend {
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockBackend {
    fn record(&self, label: &str, body: Value) {
        self.requests.lock().unwrap().push((label.to_string(), body));
    }

    fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

fn record_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "airline": { "code": "EK", "name": "Emirates" },
        "route": { "tripType": "ONE_WAY", "originAirports": ["DXB"], "destinationAirports": ["LHR"] },
        "availableDates": [
            { "id": "d1", "departure": "2025-11-02T09:00:00.000Z", "arrival": "2025-11-02T13:00:00.000Z", "deadline": "2025-10-25" }
        ],
        "classes": {
            "ECONOMY": { "fare": { "adult": 45000 }, "currency": "USD", "totalSeats": 40, "availableSeats": 12 }
        },
        "status": status
    })
}

async fn list_block_seats(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid token" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": [record_json("bs-1", "ACTIVE")] })),
    )
}

async fn update_block_seat(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record(&format!("PUT {}", id), body.clone());
    if id == "locked" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Block seat has confirmed bookings" })),
        );
    }
    let status = body["status"].as_str().unwrap_or("ACTIVE").to_string();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": record_json(&id, &status) })),
    )
}

async fn delete_block_seat(State(mock): State<MockBackend>, Path(id): Path<String>) -> StatusCode {
    mock.record(&format!("DELETE {}", id), Value::Null);
    StatusCode::NO_CONTENT
}

async fn list_package_bookings() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "bookings": [{
            "_id": "pk-1",
            "reference": "PK-001",
            "status": "PENDING",
            "travelers": [{ "firstName": "Sara", "lastName": "Khan" }],
            "package": { "title": "Baku Getaway", "nights": 4 },
            "pricing": { "currency": "AED", "fare": { "adult": 250000 } }
        }] }
    }))
}

async fn patch_package_booking(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record(&format!("PATCH booking {}", id), body);
    Json(json!({ "success": true, "data": null }))
}

async fn list_visas() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": [{
            "_id": "va-1",
            "reference": "VA-1",
            "applicant": { "firstName": "Omar", "lastName": "Haddad" },
            "destinationCountry": "United Kingdom",
            "status": "PENDING"
        }]
    }))
}

async fn patch_visa(
    State(mock): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record(&format!("PATCH visa {}", id), body);
    Json(json!({ "success": true }))
}

async fn failing_envelope() -> Json<Value> {
    Json(json!({ "success": false, "message": "Wholesaler account suspended" }))
}

async fn spawn_backend() -> (String, MockBackend) {
    let mock = MockBackend::default();
    let app = Router::new()
        .route("/block-seats", get(list_block_seats))
        .route("/block-seats/{id}", put(update_block_seat).delete(delete_block_seat))
        .route("/block-seats/bookings", get(failing_envelope))
        .route("/packages/bookings", get(list_package_bookings))
        .route("/packages/bookings/{id}", patch(patch_package_booking))
        .route("/visa-appointment/wholesaler", get(list_visas))
        .route("/visa-appointment/{id}/status", patch(patch_visa))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), mock)
}

fn token(value: &str) -> AuthToken {
    Masked::new(value.to_string())
}

#[tokio::test]
async fn test_block_seat_list_and_update() {
    let (url, mock) = spawn_backend().await;
    let repo = HttpBlockSeatRepository::new(BackendClient::new(format!("{}/", url)));

    let records = repo.list(&token(TOKEN)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "bs-1");

    let changes = json!({ "status": "INACTIVE" });
    let updated = repo
        .update(&token(TOKEN), "bs-1", changes.as_object().unwrap())
        .await
        .unwrap();
    assert_eq!(updated.id, "bs-1");
    assert_eq!(mock.requests(), vec![("PUT bs-1".to_string(), changes)]);

    repo.delete(&token(TOKEN), "bs-1").await.unwrap();
    assert_eq!(mock.requests().len(), 2);
}

#[tokio::test]
async fn test_error_messages_come_from_body() {
    let (url, _) = spawn_backend().await;
    let repo = HttpBlockSeatRepository::new(BackendClient::new(url.clone()));

    match repo.list(&token("wrong")).await {
        Err(CoreError::Backend { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid token");
        }
        other => panic!("expected backend error, got {:?}", other.map(|r| r.len())),
    }

    let changes = json!({ "status": "INACTIVE" });
    let err = repo
        .update(&token(TOKEN), "locked", changes.as_object().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Block seat has confirmed bookings");

    let bookings = HttpBookingRepository::new(BackendClient::new(url));
    let err = bookings.list(&token(TOKEN), BookingKind::Flight).await.unwrap_err();
    assert_eq!(err.to_string(), "Wholesaler account suspended");
}

#[tokio::test]
async fn test_missing_route_uses_generic_message() {
    let (url, _) = spawn_backend().await;
    let client = BackendClient::new(url);
    let err = client
        .get::<Value>(&token(TOKEN), "/does-not-exist")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 404");
}

#[tokio::test]
async fn test_bookings_and_visas() {
    let (url, mock) = spawn_backend().await;
    let bookings = HttpBookingRepository::new(BackendClient::new(url.clone()));
    let visas = HttpVisaRepository::new(BackendClient::new(url));

    let list = bookings.list(&token(TOKEN), BookingKind::Package).await.unwrap();
    assert_eq!(list[0].reference, "PK-001");

    bookings
        .update_status(&token(TOKEN), BookingKind::Package, "pk-1", BookingStatus::Confirmed)
        .await
        .unwrap();

    let appointments = visas.list(&token(TOKEN)).await.unwrap();
    assert_eq!(appointments[0].status, VisaStatus::Pending);
    visas
        .update_status(&token(TOKEN), "va-1", VisaStatus::InReview)
        .await
        .unwrap();

    assert_eq!(
        mock.requests(),
        vec![
            ("PATCH booking pk-1".to_string(), json!({ "status": "CONFIRMED" })),
            ("PATCH visa va-1".to_string(), json!({ "status": "IN_REVIEW" })),
        ]
    );
}
