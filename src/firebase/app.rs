// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Primary Firebase app handle.

use crate::config::{ConfigError, FirebaseConfig};
use std::sync::Arc;

/// Validated app options. Required settings are guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub api_key: String,
    pub project_id: String,
    pub app_id: String,
    pub auth_domain: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub measurement_id: Option<String>,
}

/// Initialized Firebase app. Database, auth and analytics handles derive from it.
#[derive(Debug, Clone)]
pub struct FirebaseApp {
    options: Arc<AppOptions>,
}

impl FirebaseApp {
    /// Build the app from configuration.
    ///
    /// Fails only when a required setting is missing or empty.
    pub fn initialize(config: &FirebaseConfig) -> Result<Self, ConfigError> {
        let missing = config.missing_required();
        if !missing.is_empty() {
            return Err(ConfigError::MissingFirebase(missing));
        }

        // missing_required() guarantees these are non-empty
        let required = |v: &Option<String>| v.clone().unwrap_or_default();

        let options = AppOptions {
            api_key: required(&config.api_key),
            project_id: required(&config.project_id),
            app_id: required(&config.app_id),
            auth_domain: config.auth_domain.clone(),
            storage_bucket: config.storage_bucket.clone(),
            messaging_sender_id: config.messaging_sender_id.clone(),
            measurement_id: config.measurement_id().map(str::to_string),
        };

        tracing::debug!(
            project = %options.project_id,
            app_id = %options.app_id,
            "Firebase app initialized"
        );

        Ok(Self {
            options: Arc::new(options),
        })
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn project_id(&self) -> &str {
        &self.options.project_id
    }

    pub fn api_key(&self) -> &str {
        &self.options.api_key
    }

    pub fn app_id(&self) -> &str {
        &self.options.app_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::vars;

    #[test]
    fn test_initialize_from_complete_config() {
        let config = crate::config::Config::test_default().firebase;
        let app = FirebaseApp::initialize(&config).unwrap();

        assert_eq!(app.project_id(), "test-project");
        assert_eq!(app.api_key(), "test-api-key");
        assert_eq!(
            app.options().auth_domain.as_deref(),
            Some("test-project.firebaseapp.com")
        );
    }

    #[test]
    fn test_initialize_rejects_missing_required() {
        let mut config = crate::config::Config::test_default().firebase;
        config.app_id = None;

        match FirebaseApp::initialize(&config) {
            Err(ConfigError::MissingFirebase(missing)) => assert_eq!(missing, vec![vars::APP_ID]),
            other => panic!("expected missing config error, got {:?}", other),
        }
    }
}
