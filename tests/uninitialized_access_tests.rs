// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Document operations on an unset database handle.
//!
//! Every operation must fail with the fixed uninitialized error. These run
//! offline: any attempt at network I/O would need a client that does not exist.

use firebase_services::db::FirestoreDb;
use firebase_services::error::AppError;
use firebase_services::models::{Document, WithId};
use serde_json::json;

fn assert_not_initialized<T: std::fmt::Debug>(result: Result<T, AppError>) {
    match result {
        Err(err @ AppError::NotInitialized) => {
            assert_eq!(
                err.to_string(),
                "Firestore is not initialized. Ensure Firebase env variables are set."
            );
        }
        other => panic!("expected NotInitialized, got {:?}", other),
    }
}

fn sample() -> Document {
    json!({ "title": "hello" }).as_object().unwrap().clone()
}

#[tokio::test]
async fn test_create_without_id_fails() {
    let db = FirestoreDb::disconnected();
    assert_not_initialized(db.add_document("notes", &sample(), None).await);
}

#[tokio::test]
async fn test_create_with_id_fails() {
    let db = FirestoreDb::disconnected();
    assert_not_initialized(db.add_document("notes", &sample(), Some("n1")).await);
}

#[tokio::test]
async fn test_read_all_fails() {
    let db = FirestoreDb::disconnected();
    let result: Result<Vec<WithId<Document>>, _> = db.get_collection("notes").await;
    assert_not_initialized(result);
}

#[tokio::test]
async fn test_read_one_fails() {
    let db = FirestoreDb::disconnected();
    let result: Result<Option<Document>, _> = db.get_document("notes", "n1").await;
    assert_not_initialized(result);
}

#[tokio::test]
async fn test_update_fails() {
    let db = FirestoreDb::disconnected();
    assert_not_initialized(db.update_document("notes", "n1", &sample()).await);
}

#[tokio::test]
async fn test_delete_fails() {
    let db = FirestoreDb::disconnected();
    assert_not_initialized(db.delete_document("notes", "n1").await);
}
