//! Normalization — forces every recovered object into the `ProjectRecord`
//! shape. Applied unconditionally, including to objects that already passed
//! validation: every canonical field is re-derived or defaulted so nothing
//! leaves the pipeline missing or mis-shaped. Idempotent.

use serde_json::{Map, Value};

use crate::models::career::Difficulty;
use crate::models::project::{ProjectRecord, PROJECT_FIELDS};
use crate::recommend::fallback::fallback_projects;
use crate::recommend::TARGET_PROJECT_COUNT;

/// Normalizes one recovered object into slot `index` (0-based).
///
/// Unrecognized source fields ride along in `extra`; the six canonical
/// fields always take the normalized value, even when the source carries a
/// conflicting duplicate.
pub fn normalize_project(
    source: &Value,
    index: usize,
    career_title: &str,
    difficulty: Difficulty,
) -> ProjectRecord {
    let empty = Map::new();
    let obj = source.as_object().unwrap_or(&empty);

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{career_title} Project {}", index + 1));

    let mut objectives = string_items(obj.get("objectives"));
    if objectives.is_empty() {
        objectives = default_objectives();
    }
    objectives.truncate(3);

    let mut steps = string_items(obj.get("steps"));
    if steps.is_empty() {
        steps = default_steps();
    }
    steps.truncate(5);

    let mut tools = string_items(obj.get("tools"));
    if tools.is_empty() {
        tools = default_tools(career_title);
    }

    let time_commitment = obj
        .get("timeCommitment")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| difficulty.duration().to_string());

    let real_world_relevance = obj
        .get("realWorldRelevance")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!("Builds practical skills that {career_title} roles use every day.")
        });

    let extra: Map<String, Value> = obj
        .iter()
        .filter(|(key, _)| !PROJECT_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ProjectRecord {
        title,
        objectives,
        steps,
        tools,
        time_commitment,
        real_world_relevance,
        extra,
    }
}

/// Count reconciliation: exactly three records, padding with fallback
/// projects when recovery came up short and truncating when it overshot.
/// Returns the records and whether any synthetic padding was added.
pub fn reconcile(
    mut projects: Vec<ProjectRecord>,
    career_title: &str,
    difficulty: Difficulty,
) -> (Vec<ProjectRecord>, bool) {
    projects.truncate(TARGET_PROJECT_COUNT);

    let padded = projects.len() < TARGET_PROJECT_COUNT;
    if padded {
        let fillers = fallback_projects(career_title, difficulty);
        let have = projects.len();
        projects.extend(fillers.into_iter().skip(have));
    }

    (projects, padded)
}

/// Coerces an optional JSON array into owned strings. Non-string items are
/// rendered compactly rather than dropped.
fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn default_objectives() -> Vec<String> {
    vec![
        "Understand the core concepts behind the project".to_string(),
        "Build a working implementation from scratch".to_string(),
        "Document and present the finished result".to_string(),
    ]
}

fn default_steps() -> Vec<String> {
    vec![
        "Research the problem space".to_string(),
        "Plan the work and gather materials".to_string(),
        "Build the core of the project".to_string(),
        "Test and iterate on the result".to_string(),
        "Publish or present what you made".to_string(),
    ]
}

fn default_tools(career_title: &str) -> Vec<String> {
    vec![
        format!("Standard tools used in {career_title} work"),
        "Online documentation and tutorials".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(source: Value) -> ProjectRecord {
        normalize_project(&source, 0, "Data Scientist", Difficulty::Intermediate)
    }

    #[test]
    fn test_complete_object_passes_through() {
        let record = normalize(json!({
            "title": "Churn model",
            "objectives": ["a", "b", "c"],
            "steps": ["1", "2", "3", "4", "5"],
            "tools": ["python"],
            "timeCommitment": "2 weeks",
            "realWorldRelevance": "r"
        }));
        assert_eq!(record.title, "Churn model");
        assert_eq!(record.objectives, vec!["a", "b", "c"]);
        assert_eq!(record.time_commitment, "2 weeks");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_empty_object_gets_all_defaults() {
        let record = normalize(json!({}));
        assert_eq!(record.title, "Data Scientist Project 1");
        assert_eq!(record.objectives.len(), 3);
        assert_eq!(record.steps.len(), 5);
        assert_eq!(record.tools.len(), 2);
        assert_eq!(record.time_commitment, "2-3 weeks");
        assert!(record.real_world_relevance.contains("Data Scientist"));
    }

    #[test]
    fn test_slot_index_is_one_based_in_synthesized_titles() {
        let record = normalize_project(&json!({}), 2, "UX Designer", Difficulty::Beginner);
        assert_eq!(record.title, "UX Designer Project 3");
    }

    #[test]
    fn test_long_lists_are_truncated() {
        let record = normalize(json!({
            "objectives": ["a", "b", "c", "d", "e"],
            "steps": ["1", "2", "3", "4", "5", "6", "7"]
        }));
        assert_eq!(record.objectives, vec!["a", "b", "c"]);
        assert_eq!(record.steps, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_non_string_list_items_are_rendered() {
        let record = normalize(json!({"objectives": [1, true, "x"]}));
        assert_eq!(record.objectives, vec!["1", "true", "x"]);
    }

    #[test]
    fn test_null_title_falls_back_to_synthesized() {
        let record = normalize(json!({"title": null}));
        assert_eq!(record.title, "Data Scientist Project 1");
    }

    #[test]
    fn test_time_commitment_defaults_from_difficulty() {
        let beginner = normalize_project(&json!({}), 0, "X", Difficulty::Beginner);
        assert_eq!(beginner.time_commitment, "1-2 weeks");
        let advanced = normalize_project(&json!({}), 0, "X", Difficulty::Advanced);
        assert_eq!(advanced.time_commitment, "3-4 weeks");
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let record = normalize(json!({
            "title": "A",
            "prerequisites": ["stats"],
            "estimatedCost": 0
        }));
        assert_eq!(record.extra.get("prerequisites").unwrap(), &json!(["stats"]));
        assert_eq!(record.extra.get("estimatedCost").unwrap(), &json!(0));
    }

    #[test]
    fn test_canonical_fields_are_not_duplicated_into_extra() {
        let record = normalize(json!({
            "title": "A",
            "objectives": ["a", "b", "c", "d"],
            "timeCommitment": "1 day"
        }));
        // the normalized values win; no shadow copies ride along
        assert!(record.extra.is_empty());
        assert_eq!(record.objectives.len(), 3);
        assert_eq!(record.time_commitment, "1 day");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let source = json!({
            "title": "A",
            "objectives": ["a", "b", "c", "d", "e"],
            "tools": ["x"],
            "bonus": {"nested": true}
        });
        let once = normalize(source);
        let twice = normalize(serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reconcile_pads_to_exactly_three() {
        for have in [0usize, 1, 2] {
            let seed: Vec<ProjectRecord> = (0..have)
                .map(|i| normalize_project(&json!({"title": format!("P{i}")}), i, "X", Difficulty::Beginner))
                .collect();
            let (projects, padded) = reconcile(seed, "X", Difficulty::Beginner);
            assert_eq!(projects.len(), 3);
            assert!(padded);
        }
    }

    #[test]
    fn test_reconcile_truncates_overlong_batches() {
        let seed: Vec<ProjectRecord> = (0..5)
            .map(|i| normalize_project(&json!({"title": format!("P{i}")}), i, "X", Difficulty::Beginner))
            .collect();
        let (projects, padded) = reconcile(seed, "X", Difficulty::Beginner);
        assert_eq!(projects.len(), 3);
        assert!(!padded);
        assert_eq!(projects[0].title, "P0");
        assert_eq!(projects[2].title, "P2");
    }

    #[test]
    fn test_reconcile_keeps_recovered_slots_ahead_of_padding() {
        let seed = vec![normalize_project(&json!({"title": "Real"}), 0, "X", Difficulty::Beginner)];
        let (projects, _) = reconcile(seed, "X", Difficulty::Beginner);
        assert_eq!(projects[0].title, "Real");
        // padding comes from the later fallback slots
        assert_eq!(projects[1].title, "X Case Study");
        assert_eq!(projects[2].title, "X Skill Builder");
    }
}
