// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with generic document operations.
//!
//! Every operation is a single round trip against a named collection:
//! - create (with a caller-supplied or generated id)
//! - read one / read all
//! - partial update
//! - delete
//!
//! A wrapper with no client behaves as the unset handle: every operation
//! fails with [`AppError::NotInitialized`] before touching the network.

use crate::error::AppError;
use crate::firebase::FirebaseApp;
use crate::models::document::{from_document, split_meta};
use crate::models::{Document, WithId};
use firestore::FirestoreWritePrecondition;
use ring::rand::{SecureRandom, SystemRandom};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Alphabet and length used by the Firestore client SDKs for auto ids.
const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const AUTO_ID_LENGTH: usize = 20;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create the database handle for an initialized app.
    pub async fn for_app(app: &FirebaseApp) -> Result<Self, AppError> {
        Self::new(app.project_id()).await
    }

    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator accepts any token; skip credential discovery entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// The unset handle. All operations fail with [`AppError::NotInitialized`].
    pub fn disconnected() -> Self {
        Self { client: None }
    }

    /// Whether this handle has a live client.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or(AppError::NotInitialized)
    }

    // ─── Create ──────────────────────────────────────────────────

    /// Write a document and return its id.
    ///
    /// With an id, the document at that id is overwritten (upsert). Without
    /// one (or with an empty one), a fresh auto id is generated and the
    /// document is created there.
    pub async fn add_document<T>(
        &self,
        collection: &str,
        data: &T,
        document_id: Option<&str>,
    ) -> Result<String, AppError>
    where
        T: Serialize + DeserializeOwned + Sync + Send,
    {
        let client = self.get_client()?;

        match document_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collection)
                    .document_id(id)
                    .object(data)
                    .execute()
                    .await?;

                tracing::debug!(collection, id, "Document set");
                Ok(id.to_string())
            }
            None => {
                let id = auto_id()?;
                let _: () = client
                    .fluent()
                    .insert()
                    .into(collection)
                    .document_id(&id)
                    .object(data)
                    .execute()
                    .await?;

                tracing::debug!(collection, id = %id, "Document created");
                Ok(id)
            }
        }
    }

    // ─── Read ────────────────────────────────────────────────────

    /// Read every document in a collection, each tagged with its id.
    ///
    /// No pagination, filtering or ordering is applied.
    pub async fn get_collection<T>(&self, collection: &str) -> Result<Vec<WithId<T>>, AppError>
    where
        T: DeserializeOwned,
    {
        let raw: Vec<Document> = self
            .get_client()?
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await?;

        raw.into_iter()
            .map(|doc| -> Result<WithId<T>, AppError> {
                let (id, fields) = split_meta(doc);
                let id = id.ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "Document in {} returned without an id",
                        collection
                    ))
                })?;
                Ok(WithId {
                    id,
                    data: from_document(fields)?,
                })
            })
            .collect()
    }

    /// Read a single document. `None` means it does not exist.
    pub async fn get_document<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let raw: Option<Document> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await?;

        raw.map(|doc| from_document(split_meta(doc).1)).transpose()
    }

    // ─── Update ──────────────────────────────────────────────────

    /// Merge the given top-level fields into an existing document.
    ///
    /// Fields not present in `data` are left untouched. Fails if the
    /// document does not exist.
    pub async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: &Document,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let fields: Vec<String> = data.keys().map(|key| quote_field(key)).collect();

        let _: () = client
            .fluent()
            .update()
            .fields(fields)
            .in_col(collection)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(id)
            .object(data)
            .execute()
            .await?;

        tracing::debug!(collection, id, "Document updated");
        Ok(())
    }

    // ─── Delete ──────────────────────────────────────────────────

    /// Delete a document. Deleting a missing document is not an error.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await?;

        tracing::debug!(collection, id, "Document deleted");
        Ok(())
    }
}

/// Quote a field name as a single Firestore field path segment.
///
/// Unquoted segments must be plain identifiers, and dots would split them
/// into nested paths.
fn quote_field(name: &str) -> String {
    format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
}

/// Generate a 20-character document id from the Firestore auto-id alphabet.
fn auto_id() -> Result<String, AppError> {
    // Largest multiple of the alphabet size that fits in a byte; bytes at or
    // above it are rejected to keep the distribution uniform.
    let limit = (256 / AUTO_ID_ALPHABET.len() * AUTO_ID_ALPHABET.len()) as u8;
    let rng = SystemRandom::new();
    let mut id = String::with_capacity(AUTO_ID_LENGTH);
    let mut buf = [0u8; 32];

    while id.len() < AUTO_ID_LENGTH {
        rng.fill(&mut buf)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;

        for &b in buf.iter().filter(|&&b| b < limit) {
            if id.len() == AUTO_ID_LENGTH {
                break;
            }
            id.push(AUTO_ID_ALPHABET[b as usize % AUTO_ID_ALPHABET.len()] as char);
        }
    }

    Ok(id)
}
