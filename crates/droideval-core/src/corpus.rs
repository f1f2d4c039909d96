//! Corpus walker: find fixture files under each app directory and load them.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::CorpusConfig;
use crate::task::{self, IndexTask, Task};

/// Fixture files under `root`, app by app in configured order, sorted by
/// file name within each app.
///
/// Every configured app directory must exist; a missing one means the
/// corpus root is wrong, not that the app has no tasks.
pub fn find_task_files(root: &Path, cfg: &CorpusConfig) -> anyhow::Result<Vec<PathBuf>> {
    let suffix = format!(".{}", cfg.extension);
    let mut task_files = Vec::new();

    for app in &cfg.apps {
        let app_path = root.join(app);
        anyhow::ensure!(
            app_path.is_dir(),
            "expected app directory {} is missing from corpus {}",
            app,
            root.display()
        );

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&app_path)
            .with_context(|| format!("failed to list {}", app_path.display()))?
        {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.ends_with(&suffix) && name.contains(&cfg.marker) && entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        log::debug!("{app}: {} task files", files.len());
        task_files.extend(files);
    }

    Ok(task_files)
}

/// Load every fixture in the corpus with `loader` and concatenate the records.
pub fn load_corpus<R>(
    root: &Path,
    cfg: &CorpusConfig,
    loader: impl Fn(&Path) -> anyhow::Result<Vec<R>>,
) -> anyhow::Result<Vec<R>> {
    let task_files = find_task_files(root, cfg)?;
    log::info!("{} task files detected", task_files.len());

    let mut all_tasks = Vec::new();
    for tf in &task_files {
        all_tasks.extend(loader(tf)?);
    }

    log::info!("{} tasks loaded", all_tasks.len());
    Ok(all_tasks)
}

/// Full-scoring records for the whole corpus.
pub fn load_all_tasks(cfg: &CorpusConfig) -> anyhow::Result<Vec<Task>> {
    load_corpus(&cfg.root, cfg, task::load_tasks_from_file)
}

/// Index-only records for the whole corpus.
pub fn load_all_index_tasks(cfg: &CorpusConfig) -> anyhow::Result<Vec<IndexTask>> {
    load_corpus(&cfg.root, cfg, task::load_index_tasks_from_file)
}
