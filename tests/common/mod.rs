// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{extract::Query, http::StatusCode, routing::post, Json, Router};
use firebase_services::config::Config;
use firebase_services::db::FirestoreDb;
use firebase_services::firebase::{
    ExecutionContext, FirebaseApp, FirebaseAuth, FirebaseServices, InitPolicy, MissingConfig,
};
use firebase_services::routes::create_router;
use firebase_services::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// ID token accepted by the fake Identity Toolkit.
#[allow(dead_code)]
pub const GOOD_TOKEN: &str = "good-token";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Initialize Firebase against the emulator.
#[allow(dead_code)]
pub async fn test_services() -> FirebaseServices {
    let policy = InitPolicy {
        on_missing_config: MissingConfig::Fail,
        context: ExecutionContext::Server,
    };
    FirebaseServices::initialize(&Config::test_default().firebase, policy)
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Unique collection name for test isolation.
#[allow(dead_code)]
pub fn unique_collection(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// Serve a minimal Identity Toolkit `accounts:lookup` on a random port.
/// Only the API key of [`Config::test_default`] is accepted.
/// Returns the base URL to hand to [`FirebaseAuth::with_base_url`].
#[allow(dead_code)]
pub async fn spawn_fake_identity_toolkit() -> String {
    async fn lookup(
        Query(params): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        if params.get("key").map(String::as_str) != Some("test-api-key") {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                } })),
            )
        } else if body["idToken"] == GOOD_TOKEN {
            (
                StatusCode::OK,
                Json(json!({
                    "users": [{ "localId": "uid-1", "email": "ada@example.com", "emailVerified": true }]
                })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "code": 400, "message": "INVALID_ID_TOKEN" } })),
            )
        }
    }

    let app = Router::new().route("/v1/accounts:lookup", post(lookup));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/v1", addr)
}

/// Create a test app where every Firebase handle is unset.
#[allow(dead_code)]
pub fn create_uninitialized_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        services: FirebaseServices::uninitialized(Some(
            "Missing Firebase env vars: FIREBASE_API_KEY".to_string(),
        )),
    });
    (create_router(state.clone()), state)
}

/// Create a test app with working auth (fake Identity Toolkit) and the given database.
#[allow(dead_code)]
pub async fn create_test_app(db: FirestoreDb) -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let app = FirebaseApp::initialize(&config.firebase).unwrap();
    let auth = FirebaseAuth::with_base_url(&app, spawn_fake_identity_toolkit().await);

    let state = Arc::new(AppState {
        config,
        services: FirebaseServices::from_parts(app, db, auth),
    });
    (create_router(state.clone()), state)
}
