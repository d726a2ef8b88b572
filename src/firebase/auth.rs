// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Auth handle backed by the Identity Toolkit REST API.
//!
//! For local development with the Auth emulator, set
//! FIREBASE_AUTH_EMULATOR_HOST (e.g. `localhost:9099`).

use crate::error::AppError;
use crate::firebase::FirebaseApp;
use reqwest::StatusCode;
use serde::Deserialize;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// A signed-in Firebase user, as resolved from an ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
}

/// Auth client bound to one app's API key.
#[derive(Clone)]
pub struct FirebaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FirebaseAuth {
    /// Create the auth handle for an initialized app.
    pub fn for_app(app: &FirebaseApp) -> Self {
        let base_url = match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => {
                tracing::info!(host = %host, "Using Firebase Auth Emulator");
                format!("http://{}/identitytoolkit.googleapis.com/v1", host)
            }
            Err(_) => IDENTITY_TOOLKIT_URL.to_string(),
        };
        Self::with_base_url(app, base_url)
    }

    /// Create the auth handle against an explicit Identity Toolkit base URL.
    pub fn with_base_url(app: &FirebaseApp, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: app.api_key().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an ID token to the account it belongs to.
    ///
    /// Rejected or expired tokens yield [`AppError::InvalidToken`].
    pub async fn lookup_account(&self, id_token: &str) -> Result<AuthUser, AppError> {
        let url = format!("{}/accounts:lookup", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(lookup_error(status, &body));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Invalid lookup response: {}", e)))?;

        lookup
            .users
            .into_iter()
            .next()
            .map(AuthUser::from)
            .ok_or(AppError::InvalidToken)
    }
}

/// Identity Toolkit error codes that mean the token itself was rejected.
const TOKEN_REJECTED_CODES: [&str; 2] = ["INVALID_ID_TOKEN", "TOKEN_EXPIRED"];

/// Map a failed `accounts:lookup` response to an error.
///
/// Only a rejected token is the caller's fault; anything else (bad API key,
/// disabled project, server errors) is surfaced as an Auth API error.
fn lookup_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_default();

    // Messages look like "TOKEN_EXPIRED" or "INVALID_ID_TOKEN : detail"
    let code = message.split([' ', ':']).next().unwrap_or_default();

    if status == StatusCode::BAD_REQUEST && TOKEN_REJECTED_CODES.contains(&code) {
        AppError::InvalidToken
    } else {
        AppError::Auth(format!("{} - {}", status, body))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountInfo {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    display_name: Option<String>,
}

impl From<AccountInfo> for AuthUser {
    fn from(info: AccountInfo) -> Self {
        Self {
            uid: info.local_id,
            email: info.email,
            email_verified: info.email_verified,
            display_name: info.display_name,
        }
    }
}
