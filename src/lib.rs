// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase services: initialization and generic document access.
//!
//! This crate configures Firebase (Firestore, Auth, Analytics) from the
//! environment and provides generic create/read/update/delete helpers over
//! named Firestore collections, plus a small HTTP API exposing them.

pub mod config;
pub mod db;
pub mod error;
pub mod firebase;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use firebase::FirebaseServices;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub services: FirebaseServices,
}
