use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextModel;
use crate::store::CareerStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both external collaborators live behind trait objects so handlers and
/// tests never depend on a concrete client.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CareerStore>,
    pub llm: Arc<dyn TextModel>,
    #[allow(dead_code)]
    pub config: Config,
}
