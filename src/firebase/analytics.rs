// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Analytics handle. Best effort only: it never gates startup.

use crate::error::AppError;
use crate::firebase::FirebaseApp;

/// Analytics bound to a GA4 measurement ID.
#[derive(Debug, Clone)]
pub struct Analytics {
    measurement_id: String,
    app_id: String,
}

impl Analytics {
    /// Create the analytics handle for an initialized app.
    ///
    /// The measurement ID must look like `G-XXXXXXX`.
    pub fn new(app: &FirebaseApp, measurement_id: &str) -> Result<Self, AppError> {
        let valid = measurement_id
            .strip_prefix("G-")
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()));

        if !valid {
            return Err(AppError::Analytics(format!(
                "Invalid measurement ID: {:?}",
                measurement_id
            )));
        }

        Ok(Self {
            measurement_id: measurement_id.to_string(),
            app_id: app.app_id().to_string(),
        })
    }

    pub fn measurement_id(&self) -> &str {
        &self.measurement_id
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> FirebaseApp {
        FirebaseApp::initialize(&crate::config::Config::test_default().firebase).unwrap()
    }

    #[test]
    fn test_valid_measurement_id() {
        let analytics = Analytics::new(&app(), "G-ABC123XYZ").unwrap();
        assert_eq!(analytics.measurement_id(), "G-ABC123XYZ");
        assert_eq!(analytics.app_id(), "1:1234567890:web:abcdef");
    }

    #[test]
    fn test_invalid_measurement_ids() {
        for id in ["", "G-", "UA-12345-1", "G-abc def", "ABC123"] {
            assert!(
                matches!(Analytics::new(&app(), id), Err(AppError::Analytics(_))),
                "{:?} should be rejected",
                id
            );
        }
    }
}
