//! Harness: wires records → prompt → client → scorer, one record at a time.

use std::io::Write;

use crate::client::ChatClient;
use crate::config::{FailurePolicy, HarnessConfig};
use crate::prompt::{self, Shots};
use crate::scorer::{self, Outcome};
use crate::task::{IndexTask, Task};

/// A record the harness can prompt for and score.
pub trait EvalRecord {
    fn prompt(&self, shots: Shots) -> String;
    fn score(&self, response: &str) -> Outcome;
}

impl EvalRecord for Task {
    fn prompt(&self, shots: Shots) -> String {
        prompt::build_prompt(self, shots)
    }

    fn score(&self, response: &str) -> Outcome {
        scorer::score_full(self, response)
    }
}

impl EvalRecord for IndexTask {
    fn prompt(&self, shots: Shots) -> String {
        prompt::build_index_prompt(self, shots)
    }

    fn score(&self, response: &str) -> Outcome {
        scorer::score_index(self, response)
    }
}

/// Outcome of one record, keyed by its position in the evaluation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResult {
    pub position: usize,
    pub outcome: Outcome,
}

/// Per-record results of a run, in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<RecordResult>,
}

impl Report {
    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn passed(&self) -> usize {
        self.count(Outcome::is_success)
    }
}

pub struct Harness<'a> {
    client: &'a dyn ChatClient,
    shots: Shots,
    cfg: HarnessConfig,
}

impl<'a> Harness<'a> {
    pub fn new(client: &'a dyn ChatClient, shots: Shots, cfg: HarnessConfig) -> Self {
        log::info!(
            "Harness: client={}, shots={:?}, limit={:?}, on_service_error={:?}",
            client.name(),
            shots,
            cfg.limit,
            cfg.on_service_error,
        );
        Self { client, shots, cfg }
    }

    /// Evaluate one record. `Err` only for a failed model call.
    pub fn evaluate<R: EvalRecord>(&self, record: &R) -> anyhow::Result<Outcome> {
        let prompt = record.prompt(self.shots);
        let response = self.client.complete(&prompt)?;
        log::debug!("Model response: {response:?}");
        Ok(record.score(&response))
    }

    /// Run over the (possibly truncated) set, printing a line per record to stdout.
    pub fn run<R: EvalRecord>(&self, records: &[R]) -> anyhow::Result<Report> {
        let stdout = std::io::stdout();
        self.run_with_output(records, &mut stdout.lock())
    }

    /// Same as [`Harness::run`], writing result lines to `out`.
    pub fn run_with_output<R: EvalRecord, W: Write>(
        &self,
        records: &[R],
        out: &mut W,
    ) -> anyhow::Result<Report> {
        let mut report = Report::default();

        for (position, record) in selected(records, self.cfg.limit).iter().enumerate() {
            let outcome = match self.evaluate(record) {
                Ok(outcome) => outcome,
                Err(e) => match self.cfg.on_service_error {
                    FailurePolicy::Isolate => {
                        log::warn!("task-{position}: model call failed: {e:#}");
                        Outcome::service_error(format!("{e:#}"))
                    }
                    FailurePolicy::Abort => {
                        return Err(e.context(format!("model call failed on task-{position}")));
                    }
                },
            };

            if !outcome.is_success() {
                log::debug!("task-{position}: {outcome}");
            }
            writeln!(out, "task-{position}, success: {}", success_label(outcome.is_success()))?;
            report.results.push(RecordResult { position, outcome });
        }

        Ok(report)
    }
}

/// `True` / `False`, the spelling existing result-line tally scripts grep for.
fn success_label(success: bool) -> &'static str {
    if success {
        "True"
    } else {
        "False"
    }
}

/// The evaluation prefix: the first `limit` records, or all of them.
pub fn selected<R>(records: &[R], limit: Option<usize>) -> &[R] {
    match limit {
        Some(n) if n < records.len() => &records[..n],
        _ => records,
    }
}
