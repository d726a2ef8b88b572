// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Firebase settings are read verbatim: no defaults and no trimming. Whether
//! a missing setting is fatal is decided later by the initialization policy,
//! so loading itself never fails on absent Firebase values.

use std::env;

/// Environment variable names for the Firebase settings.
pub mod vars {
    pub const API_KEY: &str = "FIREBASE_API_KEY";
    pub const AUTH_DOMAIN: &str = "FIREBASE_AUTH_DOMAIN";
    pub const PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
    pub const STORAGE_BUCKET: &str = "FIREBASE_STORAGE_BUCKET";
    pub const MESSAGING_SENDER_ID: &str = "FIREBASE_MESSAGING_SENDER_ID";
    pub const APP_ID: &str = "FIREBASE_APP_ID";
    pub const MEASUREMENT_ID: &str = "FIREBASE_MEASUREMENT_ID";

    /// Settings without which the app handle is never constructed.
    pub const REQUIRED: [&str; 3] = [API_KEY, PROJECT_ID, APP_ID];
}

/// Firebase web-app settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Read all Firebase settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read all Firebase settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup(vars::API_KEY),
            auth_domain: lookup(vars::AUTH_DOMAIN),
            project_id: lookup(vars::PROJECT_ID),
            storage_bucket: lookup(vars::STORAGE_BUCKET),
            messaging_sender_id: lookup(vars::MESSAGING_SENDER_ID),
            app_id: lookup(vars::APP_ID),
            measurement_id: lookup(vars::MEASUREMENT_ID),
        }
    }

    fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            vars::API_KEY => &self.api_key,
            vars::AUTH_DOMAIN => &self.auth_domain,
            vars::PROJECT_ID => &self.project_id,
            vars::STORAGE_BUCKET => &self.storage_bucket,
            vars::MESSAGING_SENDER_ID => &self.messaging_sender_id,
            vars::APP_ID => &self.app_id,
            vars::MEASUREMENT_ID => &self.measurement_id,
            _ => return None,
        };
        // Set-but-empty counts as missing.
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Names of required variables that are unset or empty, in declaration order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        vars::REQUIRED
            .into_iter()
            .filter(|name| self.value(name).is_none())
            .collect()
    }

    /// Measurement ID, if present and non-empty.
    pub fn measurement_id(&self) -> Option<&str> {
        self.value(vars::MEASUREMENT_ID)
    }
}

/// Deployment mode, taken from `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Production,
    Development,
}

impl RuntimeMode {
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase web-app settings
    pub firebase: FirebaseConfig,
    /// Production or development
    pub mode: RuntimeMode,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            firebase: FirebaseConfig::from_env(),
            mode: RuntimeMode::from_env_value(env::var("APP_ENV").ok().as_deref()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }

    /// Config for tests: complete Firebase settings, development mode.
    pub fn test_default() -> Self {
        Self {
            firebase: FirebaseConfig {
                api_key: Some("test-api-key".to_string()),
                auth_domain: Some("test-project.firebaseapp.com".to_string()),
                project_id: Some("test-project".to_string()),
                storage_bucket: None,
                messaging_sender_id: None,
                app_id: Some("1:1234567890:web:abcdef".to_string()),
                measurement_id: None,
            },
            mode: RuntimeMode::Development,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing Firebase env vars: {}", .0.join(", "))]
    MissingFirebase(Vec<&'static str>),
}
