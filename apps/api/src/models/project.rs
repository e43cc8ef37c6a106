use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire names of the six canonical project fields. Anything else recovered
/// from model output rides along in `ProjectRecord::extra`.
pub const PROJECT_FIELDS: [&str; 6] = [
    "title",
    "objectives",
    "steps",
    "tools",
    "timeCommitment",
    "realWorldRelevance",
];

/// One structured project recommendation.
///
/// Invariant: every canonical field is present and shaped before a record
/// leaves the pipeline — normalization replaces anything missing or
/// malformed with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    pub objectives: Vec<String>,
    pub steps: Vec<String>,
    pub tools: Vec<String>,
    pub time_commitment: String,
    pub real_world_relevance: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated batch of exactly three projects plus its provenance flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSet {
    pub projects: Vec<ProjectRecord>,
    pub used_fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_record_uses_camel_case_on_the_wire() {
        let record = ProjectRecord {
            title: "Build a dashboard".to_string(),
            objectives: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            steps: vec!["1".to_string(); 5],
            tools: vec!["x".to_string()],
            time_commitment: "1-2 weeks".to_string(),
            real_world_relevance: "r".to_string(),
            extra: Map::new(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("timeCommitment").is_some());
        assert!(json.get("realWorldRelevance").is_some());
        assert!(json.get("time_commitment").is_none());
    }

    #[test]
    fn test_project_record_round_trips_extra_fields() {
        let json = serde_json::json!({
            "title": "A",
            "objectives": ["a", "b", "c"],
            "steps": ["1", "2", "3", "4", "5"],
            "tools": ["x"],
            "timeCommitment": "1 week",
            "realWorldRelevance": "r",
            "difficulty": "advanced",
            "estimatedCost": 0
        });

        let record: ProjectRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.extra.get("difficulty").unwrap(), "advanced");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json);
    }
}
