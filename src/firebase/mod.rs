// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase initialization.
//!
//! Builds a [`FirebaseServices`] context from configuration under an explicit
//! [`InitPolicy`]. The context owns the app, database, auth and analytics
//! handles; any of them may be unset, and none is ever re-initialized.

pub mod analytics;
pub mod app;
pub mod auth;

pub use analytics::Analytics;
pub use app::{AppOptions, FirebaseApp};
pub use auth::{AuthUser, FirebaseAuth};

use crate::config::{ConfigError, FirebaseConfig, RuntimeMode};
use crate::db::FirestoreDb;
use crate::error::AppError;

/// What to do when required Firebase settings are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingConfig {
    /// Return a configuration error.
    Fail,
    /// Log a warning and leave every handle unset.
    Warn,
}

/// Where the process runs. Analytics is only attempted on clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Client,
    Server,
}

/// Initialization policy, chosen by the composition root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitPolicy {
    pub on_missing_config: MissingConfig,
    pub context: ExecutionContext,
}

impl InitPolicy {
    /// Warn in production, fail everywhere else.
    pub fn for_mode(mode: RuntimeMode, context: ExecutionContext) -> Self {
        let on_missing_config = match mode {
            RuntimeMode::Production => MissingConfig::Warn,
            RuntimeMode::Development => MissingConfig::Fail,
        };
        Self {
            on_missing_config,
            context,
        }
    }
}

/// Result of checking configuration before any handle is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// All required settings present.
    Ready,
    /// Settings missing under the warn policy; handles stay unset.
    Inert { warning: String },
}

/// Check required settings against the policy.
pub fn preflight(config: &FirebaseConfig, policy: &InitPolicy) -> Result<Preflight, ConfigError> {
    let missing = config.missing_required();
    if missing.is_empty() {
        return Ok(Preflight::Ready);
    }

    let err = ConfigError::MissingFirebase(missing);
    match policy.on_missing_config {
        MissingConfig::Fail => Err(err),
        MissingConfig::Warn => Ok(Preflight::Inert {
            warning: err.to_string(),
        }),
    }
}

/// How analytics initialization went.
#[derive(Debug)]
pub enum AnalyticsOutcome {
    Enabled,
    Skipped(&'static str),
    Failed(AppError),
}

/// Build the analytics handle if the app, context and measurement ID allow it.
pub fn init_analytics(
    app: Option<&FirebaseApp>,
    config: &FirebaseConfig,
    context: ExecutionContext,
) -> (Option<Analytics>, AnalyticsOutcome) {
    if context != ExecutionContext::Client {
        return (None, AnalyticsOutcome::Skipped("not a client context"));
    }
    let Some(measurement_id) = config.measurement_id() else {
        return (None, AnalyticsOutcome::Skipped("no measurement ID"));
    };
    let Some(app) = app else {
        return (None, AnalyticsOutcome::Skipped("app not initialized"));
    };

    match Analytics::new(app, measurement_id) {
        Ok(analytics) => (Some(analytics), AnalyticsOutcome::Enabled),
        Err(e) => (None, AnalyticsOutcome::Failed(e)),
    }
}

/// Initialized Firebase handles.
pub struct FirebaseServices {
    app: Option<FirebaseApp>,
    db: FirestoreDb,
    auth: Option<FirebaseAuth>,
    analytics: Option<Analytics>,
    analytics_outcome: AnalyticsOutcome,
    init_warning: Option<String>,
}

impl FirebaseServices {
    /// Initialize Firebase under the given policy.
    ///
    /// Under [`MissingConfig::Fail`], missing settings are an error and nothing
    /// is constructed. Under [`MissingConfig::Warn`], a warning is logged and
    /// the returned context has every handle unset. Analytics problems are
    /// recorded in [`FirebaseServices::analytics_outcome`] and never fail this call.
    pub async fn initialize(config: &FirebaseConfig, policy: InitPolicy) -> Result<Self, AppError> {
        if let Preflight::Inert { warning } = preflight(config, &policy)? {
            tracing::warn!("{}", warning);
            return Ok(Self::uninitialized(Some(warning)));
        }

        let app = FirebaseApp::initialize(config)?;
        let db = FirestoreDb::for_app(&app).await?;
        let auth = FirebaseAuth::for_app(&app);
        let (analytics, analytics_outcome) = init_analytics(Some(&app), config, policy.context);

        tracing::info!(project = app.project_id(), "Firebase services initialized");

        Ok(Self {
            app: Some(app),
            db,
            auth: Some(auth),
            analytics,
            analytics_outcome,
            init_warning: None,
        })
    }

    /// A context with every handle unset.
    pub fn uninitialized(init_warning: Option<String>) -> Self {
        Self {
            app: None,
            db: FirestoreDb::disconnected(),
            auth: None,
            analytics: None,
            analytics_outcome: AnalyticsOutcome::Skipped("app not initialized"),
            init_warning,
        }
    }

    /// A context built from already-constructed handles.
    pub fn from_parts(app: FirebaseApp, db: FirestoreDb, auth: FirebaseAuth) -> Self {
        Self {
            app: Some(app),
            db,
            auth: Some(auth),
            analytics: None,
            analytics_outcome: AnalyticsOutcome::Skipped("not a client context"),
            init_warning: None,
        }
    }

    pub fn app(&self) -> Option<&FirebaseApp> {
        self.app.as_ref()
    }

    /// Database handle. When unset, every operation on it fails with
    /// [`AppError::NotInitialized`].
    pub fn db(&self) -> &FirestoreDb {
        &self.db
    }

    pub fn auth(&self) -> Option<&FirebaseAuth> {
        self.auth.as_ref()
    }

    pub fn analytics(&self) -> Option<&Analytics> {
        self.analytics.as_ref()
    }

    pub fn analytics_outcome(&self) -> &AnalyticsOutcome {
        &self.analytics_outcome
    }

    /// The warning logged when initialization was skipped, if it was.
    pub fn init_warning(&self) -> Option<&str> {
        self.init_warning.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.app.is_some() && self.db.is_connected()
    }
}
