// All model prompt constants for the recommendation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ARRAY_ONLY_INSTRUCTION;
use crate::models::career::Difficulty;

/// Project recommendation prompt template.
/// Replace: {format_instruction}, {career_title}, {difficulty}, {duration}
pub const RECOMMEND_PROMPT_TEMPLATE: &str = r#"{format_instruction}

Generate exactly 3 hands-on learning projects for someone pursuing a career as a {career_title}.

The person is at the {difficulty} level, and each project should take around {duration} of part-time effort.

Return a JSON ARRAY of exactly 3 objects with this EXACT schema (no extra prose):
[
  {
    "title": "Short, concrete project name",
    "objectives": ["objective 1", "objective 2", "objective 3"],
    "steps": ["step 1", "step 2", "step 3", "step 4", "step 5"],
    "tools": ["tool or resource", "tool or resource"],
    "timeCommitment": "{duration}",
    "realWorldRelevance": "One sentence on how this mirrors real {career_title} work"
  }
]

HARD RULES:
1. `objectives` must contain exactly 3 items; `steps` exactly 5; `tools` at least 1
2. Every project must be achievable by a {difficulty}-level learner with free or cheap tools
3. Projects must be distinct from each other — no three variations of the same idea
4. Keep every string on a single line; do not embed raw newlines inside strings"#;

/// Builds the recommendation prompt for one career path and difficulty.
pub fn build_recommendation_prompt(career_title: &str, difficulty: Difficulty) -> String {
    RECOMMEND_PROMPT_TEMPLATE
        .replace("{format_instruction}", JSON_ARRAY_ONLY_INSTRUCTION)
        .replace("{career_title}", career_title)
        .replace("{difficulty}", difficulty.as_str())
        .replace("{duration}", difficulty.duration())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fills_every_placeholder() {
        let prompt = build_recommendation_prompt("Data Scientist", Difficulty::Beginner);
        assert!(prompt.contains("Data Scientist"));
        assert!(prompt.contains("beginner"));
        assert!(prompt.contains("1-2 weeks"));
        assert!(!prompt.contains("{career_title}"));
        assert!(!prompt.contains("{difficulty}"));
        assert!(!prompt.contains("{duration}"));
        assert!(!prompt.contains("{format_instruction}"));
    }

    #[test]
    fn test_prompt_demands_json_array_only() {
        let prompt = build_recommendation_prompt("UX Designer", Difficulty::Advanced);
        assert!(prompt.contains("JSON array only"));
    }
}
