use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The slice of a career-path document echoed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub id: String,
    pub title: String,
}

/// Requested project difficulty. Drives the duration lookup and prompt wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid difficulty: {0}")]
pub struct ParseDifficultyError(String);

impl Difficulty {
    /// Expected time range for one project at this difficulty.
    pub fn duration(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "1-2 weeks",
            Difficulty::Intermediate => "2-3 weeks",
            Difficulty::Advanced => "3-4 weeks",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}
