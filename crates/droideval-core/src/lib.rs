//! droideval-core: library half of the DroidTask evaluation harness.
//!
//! Loads annotated UI traces, renders prompts, queries a chat model and
//! scores the predicted element/input against the recorded ground truth.
//! The `droideval` binary crate wires these pieces to a command line.

pub mod client;
pub mod config;
pub mod corpus;
pub mod harness;
pub mod prompt;
pub mod scorer;
pub mod snapshot;
pub mod task;

pub use client::{create_client, ApiKey, ChatClient, ClientConfig, MockClient};
pub use config::{Config, CorpusConfig, FailurePolicy, HarnessConfig, ModelConfig};
pub use harness::{EvalRecord, Harness, RecordResult, Report};
pub use prompt::{PromptStyle, Shots, WorkedExample};
pub use scorer::{Outcome, PredictedAction};
pub use task::{IndexTask, Task};

// ── Fixture conventions ────────────────────────────────────────────────────

/// Marker stored in a record's `Input` field when the action types no text.
pub const NO_INPUT: &str = "null";

/// Ground-truth `Choice` meaning "the task is complete, no further action".
pub const NO_ACTION: i64 = -1;
