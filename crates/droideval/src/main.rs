//! droideval: DroidTask element-selection benchmark
//!
//! Corpus → Prompt → Model → Score, one record at a time.
//!
//! Credentials come from `OPENAI_API_KEY` / `OPENAI_BASE_URL` and are read
//! here only; everything below receives them as explicit configuration.

mod args;

use anyhow::Result;
use clap::Parser;

use droideval_core::config::{self, Config, FailurePolicy};
use droideval_core::harness::{self, EvalRecord, Harness, Report};
use droideval_core::{corpus, ApiKey, ClientConfig, Outcome, Shots};

use args::{Args, Mode};

// ── Config resolution ─────────────────────────────────────────────────────

/// File config with command-line overrides applied.
fn effective_config(args: &Args) -> Result<Config> {
    let mut cfg = config::load_config(&args.config)?;

    if let Some(root) = &args.corpus {
        cfg.corpus.root = root.clone();
    }
    if let Some(backend) = &args.backend {
        cfg.model.backend = backend.clone();
    }
    if let Some(model) = &args.model {
        cfg.model.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        cfg.model.base_url = Some(base_url.clone());
    }
    if let Some(timeout) = args.timeout {
        cfg.model.timeout_secs = timeout;
    }
    if args.all {
        cfg.harness.limit = None;
    } else if args.limit.is_some() {
        cfg.harness.limit = args.limit;
    }
    if args.fail_fast {
        cfg.harness.on_service_error = FailurePolicy::Abort;
    }

    Ok(cfg)
}

fn client_config(args: &Args, cfg: &Config) -> ClientConfig {
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .map(ApiKey::from);
    // --base-url already sits in cfg.model; the environment only fills a gap.
    let base_url = match &args.base_url {
        Some(_) => None,
        None => std::env::var("OPENAI_BASE_URL").ok().filter(|u| !u.is_empty()),
    };

    ClientConfig::from_model_config(&cfg.model, api_key, base_url)
}

// ── Evaluation ────────────────────────────────────────────────────────────

fn evaluate<R: EvalRecord>(args: &Args, cfg: &Config, records: &[R]) -> Result<()> {
    let shots: Shots = args.shots.into();

    if args.dry_run {
        for (i, record) in harness::selected(records, cfg.harness.limit).iter().enumerate() {
            println!("── task-{i} ──\n{}", record.prompt(shots));
        }
        return Ok(());
    }

    let client = droideval_core::create_client(&client_config(args, cfg))?;
    let harness = Harness::new(client.as_ref(), shots, cfg.harness.clone());

    let start = std::time::Instant::now();
    let report = harness.run(records)?;
    log_tally(&report, start.elapsed().as_secs_f64());
    Ok(())
}

fn log_tally(report: &Report, elapsed: f64) {
    let total = report.results.len();
    log::info!(
        "{}/{} passed ({} mismatched, {} unparsable, {} service errors) in {:.1}s",
        report.passed(),
        total,
        report.count(|o| matches!(o, Outcome::Mismatch { .. })),
        report.count(|o| matches!(o, Outcome::Unparsable { .. })),
        report.count(|o| matches!(o, Outcome::ServiceError { .. })),
        elapsed,
    );
}

fn run(args: Args) -> Result<()> {
    let cfg = effective_config(&args)?;

    if let Some(path) = &args.save_config {
        config::save_config(&cfg, path)?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    log::info!(
        "Corpus {} ({} apps), mode={:?}, shots={:?}",
        cfg.corpus.root.display(),
        cfg.corpus.apps.len(),
        args.mode,
        args.shots,
    );

    match args.mode {
        Mode::Full => {
            let tasks = corpus::load_all_tasks(&cfg.corpus)?;
            evaluate(&args, &cfg, &tasks)
        }
        Mode::Index => {
            let tasks = corpus::load_all_index_tasks(&cfg.corpus)?;
            evaluate(&args, &cfg, &tasks)
        }
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        log::error!("Fatal: {e:#}");
        return Err(e);
    }
    Ok(())
}
