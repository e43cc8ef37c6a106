//! Recommendation pipeline — orchestrates fetch → prompt → model call →
//! recovery → normalization → response assembly.
//!
//! Guarantee: once the input validates and the career path resolves, the
//! caller receives a well-formed three-project response. Generation-layer
//! failures are absorbed into deterministic fallback, never propagated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationOptions, TextModel};
use crate::models::career::{CareerPath, Difficulty};
use crate::models::project::ProjectSet;
use crate::recommend::fallback::fallback_projects;
use crate::recommend::normalize::{normalize_project, reconcile};
use crate::recommend::prompts::build_recommendation_prompt;
use crate::recommend::recovery::{is_valid_project, recover_projects};
use crate::store::{CareerStore, StoreError};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Request body for project recommendations.
///
/// `difficulty` is kept as a raw string so the handler can answer with a
/// specific message instead of a generic deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub career_path_id: String,
    #[serde(default)]
    pub difficulty: String,
}

/// Success envelope. `warning` is present only when a hard model error
/// forced the full fallback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub success: bool,
    pub status_code: u16,
    #[serde(flatten)]
    pub set: ProjectSet,
    pub career_path: CareerPath,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full recommendation pipeline.
///
/// Steps:
/// 1. validate input (400 on bad careerPathId / difficulty)
/// 2. fetch the career-path document (404 when missing)
/// 3. build the prompt and call the model — a single attempt
/// 4. recover / validate / normalize the output into exactly 3 projects
/// 5. assemble the success envelope
pub async fn recommend_projects(
    store: &dyn CareerStore,
    llm: &dyn TextModel,
    request: RecommendRequest,
) -> Result<RecommendResponse, AppError> {
    let career_path_id = request.career_path_id.trim();
    if career_path_id.is_empty() {
        return Err(AppError::Validation("careerPathId is required".to_string()));
    }

    let difficulty: Difficulty = request.difficulty.parse().map_err(|_| {
        AppError::Validation(
            "Invalid difficulty. Expected one of: beginner, intermediate, advanced".to_string(),
        )
    })?;

    let doc = match store.get_career_path(career_path_id).await {
        Ok(doc) => doc,
        Err(StoreError::NotFound) => {
            return Err(AppError::NotFound("Career path not found".to_string()))
        }
        Err(e) => return Err(AppError::Store(e.to_string())),
    };
    let career_path = doc.career_path();

    info!(
        "Generating {difficulty} projects for career path {} ({})",
        career_path.id, career_path.title
    );

    let prompt = build_recommendation_prompt(&career_path.title, difficulty);

    // Single attempt; every failure from here on degrades to fallback
    // instead of surfacing as an error (the career path is known-good).
    let (set, warning) = match llm.generate(&prompt, &GenerationOptions::default()).await {
        Ok(text) => (assemble_projects(&text, &career_path.title, difficulty), None),
        Err(e) => {
            warn!("Model call failed, serving fallback projects: {e}");
            (
                ProjectSet {
                    projects: fallback_projects(&career_path.title, difficulty),
                    used_fallback: true,
                },
                Some("AI generation failed; returning fallback projects".to_string()),
            )
        }
    };

    info!(
        "Returning {} projects for {} (fallback: {})",
        set.projects.len(),
        career_path.id,
        set.used_fallback
    );

    Ok(RecommendResponse {
        success: true,
        status_code: 200,
        set,
        career_path,
        difficulty,
        warning,
    })
}

/// Recovers, validates, normalizes, and reconciles model output into exactly
/// three projects. Never fails: unusable output degrades to full fallback.
fn assemble_projects(raw: &str, career_title: &str, difficulty: Difficulty) -> ProjectSet {
    let recovered = match recover_projects(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!("Response recovery failed: {e}");
            return ProjectSet {
                projects: fallback_projects(career_title, difficulty),
                used_fallback: true,
            };
        }
    };

    let total = recovered.len();
    let valid: Vec<Value> = recovered
        .into_iter()
        .filter(|item| is_valid_project(item))
        .collect();

    if valid.is_empty() {
        warn!("Recovery yielded {total} objects but none were valid projects");
        return ProjectSet {
            projects: fallback_projects(career_title, difficulty),
            used_fallback: true,
        };
    }
    if valid.len() < total {
        debug!("Dropped {} malformed projects", total - valid.len());
    }

    let normalized = valid
        .iter()
        .enumerate()
        .map(|(index, item)| normalize_project(item, index, career_title, difficulty))
        .collect();

    let (projects, padded) = reconcile(normalized, career_title, difficulty);

    ProjectSet {
        projects,
        used_fallback: padded,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
