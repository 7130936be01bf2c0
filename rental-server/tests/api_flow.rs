//! HTTP-level flow tests against the assembled router.
//!
//! Each test drives the real application (state store on a temp dir, full
//! middleware stack) through one-shot requests, the same way the admin
//! console and mobile client would.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::Service;

use rental_server::core::server::build_app;
use rental_server::{Config, ServerState};
use shared::models::User;
use shared::util::now_millis;

struct TestApp {
    app: Router,
    state: ServerState,
    // Keeps the work dir alive for the test's duration
    _work_dir: tempfile::TempDir,
}

fn spawn_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("temp work dir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config).expect("server state");
    TestApp {
        app: build_app(state.clone()),
        state,
        _work_dir: work_dir,
    }
}

/// Register a user directly in the store; registration itself happens on the
/// mobile client and arrives via state sync.
fn seed_user(state: &ServerState, id: &str, username: &str) {
    let result: Result<(), ()> = state.store.commit(|s| {
        s.users.push(User {
            id: id.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "+381601234567".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: "x".to_string(),
            password_salt: "y".to_string(),
            created_at: now_millis(),
        });
        Ok(())
    });
    result.expect("seed user");
}

async fn request(
    app: &mut Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.call(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &mut Router) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().expect("token").to_string()
}

#[tokio::test]
async fn admin_routes_require_a_valid_token() {
    let mut t = spawn_app();

    let (status, _) = request(&mut t.app, "GET", "/api/bikes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&mut t.app, "GET", "/api/bikes", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&mut t.app).await;
    let (status, body) = request(&mut t.app, "GET", "/api/bikes", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().expect("bike list").len(), 10);
}

#[tokio::test]
async fn bad_admin_credentials_are_rejected_uniformly() {
    let mut t = spawn_app();

    for payload in [
        json!({ "username": "admin", "password": "wrong" }),
        json!({ "username": "ghost", "password": "admin123" }),
    ] {
        let (status, body) =
            request(&mut t.app, "POST", "/api/auth/login", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid username or password");
    }
}

#[tokio::test]
async fn full_rental_cycle_over_http() {
    let mut t = spawn_app();
    seed_user(&t.state, "usr_1", "milan");

    // Start on bike_1
    let (status, rental) = request(
        &mut t.app,
        "POST",
        "/api/rentals",
        None,
        Some(json!({
            "userId": "usr_1",
            "bikeId": "bike_1",
            "startLat": 44.8158,
            "startLng": 20.4600
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rental["status"], "active");
    let rental_id = rental["id"].as_str().expect("rental id").to_string();

    // Second rental for the same user conflicts
    let (status, body) = request(
        &mut t.app,
        "POST",
        "/api/rentals",
        None,
        Some(json!({ "userId": "usr_1", "bikeId": "bike_2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().expect("error").contains("active rental"));

    // The active endpoint sees it
    let (status, active) = request(
        &mut t.app,
        "GET",
        "/api/rentals/active?userId=usr_1",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["id"], rental_id.as_str());

    // Return far outside every zone: 400 with actionable guidance
    let (status, body) = request(
        &mut t.app,
        "POST",
        &format!("/api/rentals/{rental_id}/end"),
        None,
        Some(json!({
            "endLat": 44.9,
            "endLng": 20.9,
            "returnPhotoUri": "photos/return_1.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["nearestZone"]["distanceMeters"].as_f64().expect("distance") > 0.0);

    // Return without a photo: still blocked
    let (status, _) = request(
        &mut t.app,
        "POST",
        &format!("/api/rentals/{rental_id}/end"),
        None,
        Some(json!({ "endLat": 44.8166, "endLng": 20.4602 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Valid return at the Trg Republike center
    let (status, finished) = request(
        &mut t.app,
        "POST",
        &format!("/api/rentals/{rental_id}/end"),
        None,
        Some(json!({
            "endLat": 44.8166,
            "endLng": 20.4602,
            "returnPhotoUri": "photos/return_1.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["status"], "finished");
    assert!(finished["totalPrice"].is_number());

    // Ending again conflicts and changes nothing
    let (status, _) = request(
        &mut t.app,
        "POST",
        &format!("/api/rentals/{rental_id}/end"),
        None,
        Some(json!({
            "endLat": 44.8166,
            "endLng": 20.4602,
            "returnPhotoUri": "photos/other.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The bike rests at the return location, available again
    let token = login(&mut t.app).await;
    let (status, bike) = request(&mut t.app, "GET", "/api/bikes/bike_1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bike["status"], "available");
    assert_eq!(bike["lat"].as_f64().expect("lat"), 44.8166);

    // Admin rental view is enriched with the user
    let (status, rentals) = request(&mut t.app, "GET", "/api/rentals", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &rentals.as_array().expect("rentals")[0];
    assert_eq!(listed["user"]["username"], "milan");
    assert_eq!(listed["bike"]["label"], "BG-001");
}

#[tokio::test]
async fn fleet_guards_hold_over_http() {
    let mut t = spawn_app();
    seed_user(&t.state, "usr_1", "milan");
    let token = login(&mut t.app).await;

    // Rent bike_1, then try to disable and delete it
    let (status, _) = request(
        &mut t.app,
        "POST",
        "/api/rentals",
        None,
        Some(json!({ "userId": "usr_1", "bikeId": "bike_1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &mut t.app,
        "PATCH",
        "/api/bikes/bike_1/status",
        Some(&token),
        Some(json!({ "status": "disabled" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = request(&mut t.app, "DELETE", "/api/bikes/bike_1", Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Duplicate label is rejected
    let (status, _) = request(
        &mut t.app,
        "POST",
        "/api/bikes",
        Some(&token),
        Some(json!({
            "label": "BG-002",
            "type": "CITY",
            "pricePerHour": 120.0,
            "lat": 44.8,
            "lng": 20.46
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A valid new bike lands in the fleet
    let (status, bike) = request(
        &mut t.app,
        "POST",
        "/api/bikes",
        Some(&token),
        Some(json!({
            "label": "BG-011",
            "type": "E-BIKE",
            "pricePerHour": 220.0,
            "lat": 44.81,
            "lng": 20.46
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bike["status"], "available");
}

#[tokio::test]
async fn zone_crud_enforces_name_and_radius_rules() {
    let mut t = spawn_app();
    let token = login(&mut t.app).await;

    // Case-insensitive duplicate name
    let (status, _) = request(
        &mut t.app,
        "POST",
        "/api/parking-zones",
        Some(&token),
        Some(json!({
            "name": "kalemegdan",
            "lat": 44.82,
            "lng": 20.45,
            "radiusMeters": 100.0,
            "capacity": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Radius out of range
    let (status, _) = request(
        &mut t.app,
        "POST",
        "/api/parking-zones",
        Some(&token),
        Some(json!({
            "name": "Novi Beograd",
            "lat": 44.81,
            "lng": 20.40,
            "radiusMeters": 1500.0,
            "capacity": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, zone) = request(
        &mut t.app,
        "POST",
        "/api/parking-zones",
        Some(&token),
        Some(json!({
            "name": "Novi Beograd",
            "lat": 44.81,
            "lng": 20.40,
            "radiusMeters": 250.0,
            "capacity": 30
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(zone["id"].as_str().expect("zone id").starts_with("pz_"));
}

#[tokio::test]
async fn state_sync_round_trip_and_duplicate_rejection() {
    let mut t = spawn_app();

    let (status, mut snapshot) = request(&mut t.app, "GET", "/api/state", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["bikes"].as_array().expect("bikes").len(), 10);

    // Push back with one user — accepted
    snapshot["users"] = json!([{
        "id": "usr_1", "username": "mira", "email": "mira@example.com",
        "phone": "+381601111111", "firstName": "Mira", "lastName": "M",
        "passwordHash": "h", "passwordSalt": "s", "createdAt": 1
    }]);
    let (status, body) = request(&mut t.app, "PUT", "/api/state", None, Some(snapshot.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Duplicate email (case-insensitive) — rejected
    snapshot["users"] = json!([
        {
            "id": "usr_1", "username": "mira", "email": "mira@example.com",
            "phone": "1", "firstName": "Mira", "lastName": "M",
            "passwordHash": "h", "passwordSalt": "s", "createdAt": 1
        },
        {
            "id": "usr_2", "username": "other", "email": "MIRA@example.com",
            "phone": "2", "firstName": "O", "lastName": "O",
            "passwordHash": "h", "passwordSalt": "s", "createdAt": 2
        }
    ]);
    let (status, body) = request(&mut t.app, "PUT", "/api/state", None, Some(snapshot)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("Duplicate email"));

    // The rejected push did not replace the state
    let (_, current) = request(&mut t.app, "GET", "/api/state", None, None).await;
    assert_eq!(current["users"].as_array().expect("users").len(), 1);
}

#[tokio::test]
async fn issue_report_and_triage() {
    let mut t = spawn_app();
    seed_user(&t.state, "usr_1", "milan");

    let (status, issue) = request(
        &mut t.app,
        "POST",
        "/api/issues",
        None,
        Some(json!({
            "userId": "usr_1",
            "description": "Zadnja kočnica ne radi",
            "photoUri": "photos/issue_1.jpg",
            "bikeId": "bike_3"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issue["status"], "open");
    let issue_id = issue["id"].as_str().expect("issue id").to_string();

    // Missing photo is rejected
    let (status, _) = request(
        &mut t.app,
        "POST",
        "/api/issues",
        None,
        Some(json!({ "userId": "usr_1", "description": "x", "photoUri": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Admin resolves it and pulls the bike into maintenance
    let token = login(&mut t.app).await;
    let (status, updated) = request(
        &mut t.app,
        "PUT",
        &format!("/api/issues/{issue_id}"),
        Some(&token),
        Some(json!({
            "status": "resolved",
            "adminNote": "Servisirano",
            "bikeAction": "maintenance"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "resolved");
    assert!(updated["resolvedAt"].is_number());
    assert_eq!(updated["bike"]["status"], "maintenance");

    // Stats reflect the triage
    let (status, stats) = request(&mut t.app, "GET", "/api/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["issues"]["total"], 1);
    assert_eq!(stats["issues"]["open"], 0);
    assert_eq!(stats["bikes"]["maintenance"], 2);
}

#[tokio::test]
async fn health_is_public() {
    let mut t = spawn_app();
    let (status, body) = request(&mut t.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sync_configured"], false);
}
