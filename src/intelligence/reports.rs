//! Practice feedback.

use serde::{Deserialize, Serialize};

use crate::{
    intelligence::schema::{SchemaError, Validate, clean_list, require_text},
    questions::QuestionStatus,
};

/// Highest score an answer evaluation can give.
pub const MAX_ANSWER_SCORE: u8 = 10;

/// Highest score a simulation report can give.
pub const MAX_SIMULATION_SCORE: u8 = 100;

/// Feedback on one written answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    /// 0 to 10.
    pub score: u8,
    pub feedback: String,
    #[serde(default)]
    pub improvements: Vec<String>,
    pub status: QuestionStatus,
}

impl Validate for AnswerEvaluation {
    fn validate(self) -> Result<Self, SchemaError> {
        if self.score > MAX_ANSWER_SCORE {
            return Err(SchemaError::OutOfRange {
                field: "score",
                value: i64::from(self.score),
            });
        }

        Ok(Self {
            score: self.score,
            feedback: require_text("feedback", self.feedback)?,
            improvements: clean_list(self.improvements),
            status: self.status,
        })
    }
}

/// Assessment of a full interview simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// 0 to 100. Below 60 is a fail.
    pub score: u8,
    pub feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl SimulationReport {
    /// Lowest passing score.
    pub const PASS_MARK: u8 = 60;

    #[must_use]
    pub fn passed(&self) -> bool {
        self.score >= Self::PASS_MARK
    }
}

impl Validate for SimulationReport {
    fn validate(self) -> Result<Self, SchemaError> {
        if self.score > MAX_SIMULATION_SCORE {
            return Err(SchemaError::OutOfRange {
                field: "score",
                value: i64::from(self.score),
            });
        }

        Ok(Self {
            score: self.score,
            feedback: require_text("feedback", self.feedback)?,
            strengths: clean_list(self.strengths),
            improvements: clean_list(self.improvements),
            red_flags: clean_list(self.red_flags),
        })
    }
}
