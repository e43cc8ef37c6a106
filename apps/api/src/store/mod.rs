//! Document store client — the single point of entry for all Appwrite calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Appwrite API directly.
//! Handlers see only the `CareerStore` trait, carried in `AppState` as
//! `Arc<dyn CareerStore>` so tests can substitute a double.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::career::CareerPath;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A raw career-path document as returned by the Appwrite Databases API.
/// System fields are `$`-prefixed on the wire; user fields beyond `title`
/// are retained in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct CareerPathDoc {
    #[serde(rename = "$id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "$createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "$updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CareerPathDoc {
    /// The identifying slice echoed back to callers.
    pub fn career_path(&self) -> CareerPath {
        CareerPath {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Read-only access to career-path documents.
#[async_trait]
pub trait CareerStore: Send + Sync {
    async fn get_career_path(&self, career_path_id: &str) -> Result<CareerPathDoc, StoreError>;
}

#[derive(Debug, Deserialize)]
struct AppwriteError {
    message: String,
}

/// Appwrite-backed implementation of `CareerStore`.
pub struct AppwriteStore {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
}

impl AppwriteStore {
    pub fn new(
        endpoint: String,
        project_id: String,
        api_key: String,
        database_id: String,
        collection_id: String,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            project_id,
            api_key,
            database_id,
            collection_id,
        }
    }

    fn document_url(&self, document_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.endpoint.trim_end_matches('/'),
            self.database_id,
            self.collection_id,
            document_id
        )
    }
}

#[async_trait]
impl CareerStore for AppwriteStore {
    async fn get_career_path(&self, career_path_id: &str) -> Result<CareerPathDoc, StoreError> {
        let response = self
            .client
            .get(self.document_url(career_path_id))
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .header("content-type", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 404 {
            return Err(StoreError::NotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the server's error message
            let message = serde_json::from_str::<AppwriteError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let doc: CareerPathDoc = serde_json::from_str(&body)?;

        debug!("Fetched career path {} ({})", doc.id, doc.title);

        Ok(doc)
    }
}
