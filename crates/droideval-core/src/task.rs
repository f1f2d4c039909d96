//! Task records and the fixture-file loaders.
//!
//! A fixture is one YAML document per task:
//!
//! ```yaml
//! task_name: Sort apps by title in descending order
//! records:
//!   - State: "<button id=0>...</button>\n<button id=1>...</button>"
//!     Choice: 1
//!     Input: "null"
//! ```
//!
//! Every record becomes an independent evaluation record carrying the
//! shared task name.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Deserializer};

use crate::snapshot;
use crate::{NO_ACTION, NO_INPUT};

/// One UI-state / ground-truth-action pair, scored on element and input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub task_description: String,
    pub ui_representation: String,
    /// Ground-truth element id. `-1` is kept as-is in this shape.
    pub action_index: i64,
    /// Ground-truth input text, or [`NO_INPUT`].
    pub action_param: String,
}

/// One navigation-only record, scored on element index alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTask {
    pub task_description: String,
    pub ui_representation: String,
    /// Ground-truth element id; a "done" choice is already remapped to `total_index`.
    pub action_index: i64,
    /// Number of addressable elements in `ui_representation`.
    pub total_index: i64,
}

// ── Fixture document ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Fixture {
    task_name: String,
    records: Vec<FixtureRecord>,
}

#[derive(Debug, Deserialize)]
struct FixtureRecord {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "Choice")]
    choice: i64,
    #[serde(rename = "Input", deserialize_with = "input_text", default = "no_input")]
    input: String,
}

fn no_input() -> String {
    NO_INPUT.into()
}

/// Annotators sometimes leave `Input` unquoted, so accept any YAML scalar.
fn input_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    use serde::de::Error;

    match serde_yaml::Value::deserialize(de)? {
        serde_yaml::Value::Null => Ok(no_input()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "Input must be a scalar, got {other:?}"
        ))),
    }
}

fn read_fixture(path: &Path) -> anyhow::Result<Fixture> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    let fixture: Fixture = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse fixture {}", path.display()))?;

    for (i, record) in fixture.records.iter().enumerate() {
        snapshot::ensure_has_element(&record.state)
            .with_context(|| format!("record {i} in {}", path.display()))?;
    }
    Ok(fixture)
}

// ── Loaders ────────────────────────────────────────────────────────────────

/// Load every record of one fixture file as a full-scoring [`Task`].
pub fn load_tasks_from_file(path: &Path) -> anyhow::Result<Vec<Task>> {
    let fixture = read_fixture(path)?;
    let task_description = fixture.task_name;

    Ok(fixture
        .records
        .into_iter()
        .map(|r| Task {
            task_description: task_description.clone(),
            ui_representation: r.state,
            action_index: r.choice,
            action_param: r.input,
        })
        .collect())
}

/// Load the navigation-only records of one fixture file as [`IndexTask`]s.
///
/// Records that type text are skipped: index-only scoring cannot judge them.
pub fn load_index_tasks_from_file(path: &Path) -> anyhow::Result<Vec<IndexTask>> {
    let fixture = read_fixture(path)?;
    let task_description = fixture.task_name;
    let mut tasks = Vec::with_capacity(fixture.records.len());

    for (i, record) in fixture.records.into_iter().enumerate() {
        if record.input != NO_INPUT {
            log::debug!(
                "{}: skipping record {i}, text entry {:?}",
                path.display(),
                record.input
            );
            continue;
        }
        debug_assert_eq!(record.input, NO_INPUT);

        let total_index = snapshot::total_index(&record.state)
            .with_context(|| format!("record {i} in {}", path.display()))?;
        let action_index = if record.choice == NO_ACTION {
            total_index
        } else {
            record.choice
        };

        tasks.push(IndexTask {
            task_description: task_description.clone(),
            ui_representation: record.state,
            action_index,
            total_index,
        });
    }

    Ok(tasks)
}
