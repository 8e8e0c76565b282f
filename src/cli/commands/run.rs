//! Run command - fingerprint assets and rewrite references

use super::map::{print_map, print_table};
use crate::bust::{BustReport, CacheBuster, CleanupOutcome, DryRunFs, LocalFs};
use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::Config;
use crate::discover;
use crate::error::{CachebustError, CachebustResult};
use crate::ui::{self, TaskSpinner, UiContext};
use std::path::Path;
use tracing::debug;

/// Execute the run command
pub async fn execute(args: RunArgs, config: &Config, project_root: &Path) -> CachebustResult<()> {
    let ctx = UiContext::detect();

    let mut config = config.clone();
    args.apply(&mut config);
    let config = config.resolved(project_root);

    if config.assets.is_empty() {
        return Err(CachebustError::User(
            "No asset patterns configured. Add `assets = [...]` to .cachebust.toml or pass --asset"
                .to_string(),
        ));
    }

    debug!("Base directory: {}", config.options.base_dir.display());

    // Spinner output would corrupt machine-readable formats
    let mut spinner = matches!(args.format, OutputFormat::Table).then(|| {
        let mut spinner = TaskSpinner::new(&ctx);
        spinner.start("Fingerprinting assets...");
        spinner
    });

    let dry_run = args.dry_run;
    let consumer_root = config.files.root(project_root);
    let result = tokio::task::spawn_blocking(move || {
        bust(&config, &consumer_root, dry_run)
    })
    .await
    .map_err(|e| CachebustError::Internal(format!("fingerprinting task failed: {}", e)))?;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            if let Some(ref mut spinner) = spinner {
                spinner.stop_error("Fingerprinting failed");
            }
            return Err(e);
        }
    };

    if let Some(ref mut spinner) = spinner {
        spinner.stop(&format!("Fingerprinted {} assets", report.map.len()));
    }

    match args.format {
        OutputFormat::Table => print_summary(&ctx, &report, dry_run),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_map(&ctx, &report.map, OutputFormat::Plain)?,
    }

    Ok(())
}

/// Discover inputs and drive the engine; runs on the blocking pool
fn bust(config: &Config, consumer_root: &Path, dry_run: bool) -> CachebustResult<BustReport> {
    let assets = discover::list_candidate_assets(&config.options.base_dir, &config.assets)?;
    let consumers = discover::list_consumer_files(consumer_root, &config.files.src)?;

    let local = LocalFs;
    if dry_run {
        let fs = DryRunFs::new(&local);
        CacheBuster::new(&fs, &config.options).run(&assets, &consumers)
    } else {
        CacheBuster::new(&local, &config.options).run(&assets, &consumers)
    }
}

fn print_summary(ctx: &UiContext, report: &BustReport, dry_run: bool) {
    if report.map.is_empty() {
        ui::step_warn_hint(ctx, "No assets matched", "Check the assets patterns and base_dir");
    } else {
        print_table(ctx, &report.map);
    }

    match report.cleanup {
        CleanupOutcome::Disabled => {}
        CleanupOutcome::Completed => ui::step_ok(
            ctx,
            &format!("Removed {} stale files", report.removed.len()),
        ),
        CleanupOutcome::Skipped { ref reason } => {
            ui::step_warn_hint(ctx, "Stale file cleanup skipped", reason)
        }
    }

    if let Some(ref path) = report.map_file {
        ui::step_ok_detail(ctx, "Wrote asset map", &path.display().to_string());
    }

    ui::step_ok(
        ctx,
        &format!("Rewrote references in {} files", report.rewritten.len()),
    );
    for path in &report.rewritten {
        ui::remark(ctx, &path.display().to_string());
    }

    if dry_run {
        ui::step_info(ctx, "Dry run: no files were changed");
    }
}
