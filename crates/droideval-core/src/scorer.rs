//! Response parsing and exact-match scoring.
//!
//! A malformed model answer is a scoring failure, never an error: producing
//! the requested format is part of what the benchmark measures.

use serde::{Deserialize, Serialize};

use crate::prompt::format_full_answer;
use crate::task::{IndexTask, Task};

/// Element id and input text parsed from a full-style answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedAction {
    pub index: i64,
    pub input: String,
}

impl std::fmt::Display for PredictedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_full_answer(self.index, &self.input))
    }
}

/// How one record fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Parsed cleanly but disagrees with the ground truth.
    Mismatch { predicted: String },
    /// The answer did not have the requested shape.
    Unparsable { response: String },
    /// The model call itself failed (transport, timeout, API error).
    ServiceError { message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn service_error(message: impl Into<String>) -> Self {
        Self::ServiceError { message: message.into() }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Mismatch { predicted } => write!(f, "mismatch (predicted {predicted})"),
            Outcome::Unparsable { response } => write!(f, "unparsable ({response:?})"),
            Outcome::ServiceError { message } => write!(f, "service_error ({message})"),
        }
    }
}

// ── Parsing ────────────────────────────────────────────────────────────────

/// Parse `<id>, '<input>'`.
///
/// Splits on the first `", "` only, so input text may itself contain commas.
/// The text token is trimmed of whitespace, then of single quotes, then of
/// double quotes.
pub fn parse_full_response(response: &str) -> Option<PredictedAction> {
    let (index, input) = response.trim().split_once(", ")?;
    let index = index.trim().parse().ok()?;
    let input = input.trim().trim_matches('\'').trim_matches('"');
    Some(PredictedAction { index, input: input.to_string() })
}

/// Parse a bare integer id. `"5.0"` and `"five"` are rejected.
pub fn parse_index_response(response: &str) -> Option<i64> {
    response.trim().parse().ok()
}

// ── Scoring ────────────────────────────────────────────────────────────────

pub fn score_full(task: &Task, response: &str) -> Outcome {
    match parse_full_response(response) {
        None => Outcome::Unparsable { response: response.to_string() },
        Some(p) if p.index == task.action_index && p.input == task.action_param => Outcome::Success,
        Some(p) => Outcome::Mismatch { predicted: p.to_string() },
    }
}

pub fn score_index(task: &IndexTask, response: &str) -> Outcome {
    match parse_index_response(response) {
        None => Outcome::Unparsable { response: response.to_string() },
        Some(index) if index == task.action_index => Outcome::Success,
        Some(index) => Outcome::Mismatch { predicted: index.to_string() },
    }
}

/// Boolean form of [`score_full`].
pub fn extract_and_compare(response: &str, task: &Task) -> bool {
    score_full(task, response).is_success()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(index: i64, param: &str) -> Task {
        Task {
            task_description: "t".into(),
            ui_representation: "<button id=0>a</button>".into(),
            action_index: index,
            action_param: param.into(),
        }
    }

    fn index_task(index: i64, total: i64) -> IndexTask {
        IndexTask {
            task_description: "t".into(),
            ui_representation: "<button id=0>a</button>".into(),
            action_index: index,
            total_index: total,
        }
    }

    #[test]
    fn full_exact_match_succeeds() {
        assert!(extract_and_compare("3, 'hello'", &task(3, "hello")));
    }

    #[test]
    fn full_wrong_text_fails() {
        assert!(!extract_and_compare("3, 'hello'", &task(3, "world")));
        assert_eq!(
            score_full(&task(3, "world"), "3, 'hello'"),
            Outcome::Mismatch { predicted: "3, 'hello'".into() }
        );
    }

    #[test]
    fn full_wrong_index_fails() {
        assert!(!extract_and_compare("4, 'hello'", &task(3, "hello")));
    }

    #[test]
    fn full_non_numeric_index_is_unparsable() {
        let outcome = score_full(&task(3, "x"), "not-a-number, 'x'");
        assert!(matches!(outcome, Outcome::Unparsable { .. }));
        assert!(!extract_and_compare("not-a-number, 'x'", &task(3, "x")));
    }

    #[test]
    fn full_missing_separator_is_unparsable() {
        assert!(parse_full_response("3 'hello'").is_none());
        assert!(parse_full_response("3,'hello'").is_none());
        assert!(parse_full_response("").is_none());
        assert!(!extract_and_compare("3", &task(3, "null")));
    }

    #[test]
    fn either_quote_style_matches_unquoted_truth() {
        let t = task(6, "123456");
        assert!(extract_and_compare("6, '123456'", &t));
        assert!(extract_and_compare("6, \"123456\"", &t));
        assert!(extract_and_compare("6, 123456", &t));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(extract_and_compare("  1, 'null'\n", &task(1, "null")));
        assert!(extract_and_compare("1,  'null' ", &task(1, "null")));
    }

    #[test]
    fn input_may_contain_the_separator() {
        let p = parse_full_response("2, 'Hello, world'").unwrap();
        assert_eq!(p, PredictedAction { index: 2, input: "Hello, world".into() });
    }

    #[test]
    fn null_marker_compares_as_text() {
        assert!(extract_and_compare("0, 'null'", &task(0, "null")));
        assert!(!extract_and_compare("0, ''", &task(0, "null")));
    }

    #[test]
    fn index_exact_match() {
        assert!(score_index(&index_task(5, 9), "5").is_success());
        assert!(score_index(&index_task(5, 9), " 5\n").is_success());
    }

    #[test]
    fn index_rejects_non_integers() {
        for bad in ["5.0", "five", "5, 'null'", ""] {
            assert!(
                matches!(score_index(&index_task(5, 9), bad), Outcome::Unparsable { .. }),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn index_done_sentinel_compares_against_total() {
        // Loader has remapped -1 to the total index.
        let done = index_task(9, 9);
        assert!(score_index(&done, "9").is_success());
        assert!(!score_index(&done, "-1").is_success());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Success.to_string(), "success");
        assert_eq!(
            Outcome::service_error("timed out").to_string(),
            "service_error (timed out)"
        );
        assert!(!Outcome::service_error("x").is_success());
    }
}
