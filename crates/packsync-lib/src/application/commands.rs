//! Command execution handlers

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::application::{AppConfig, CliConfig, Commands};
use crate::display::Display;
use crate::instance::InstanceManifest;
use crate::networking::{ContentFetcher, HttpContentFetcher, NetworkingConfig};
use crate::plan::{Phase, UpdatePlan};
use crate::primitives::LogContext;
use crate::reconcile::{FileMutator, LiveFileMutator, ReconcileReport, Reconciler};

/// Execute the command resolved from the command line
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let display = Display::new(config.app_config.color.resolve());

    let Some(command) = config.command else {
        display
            .status()
            .message("packsync - modpack update reconciliation");
        display
            .status()
            .subtle("Run 'packsync --help' for usage information");
        return Ok(());
    };

    execute_command_with_config(command, &config.app_config, &display).await
}

/// Execute a specific command with an explicit configuration (for testing)
pub async fn execute_command_with_config(
    command: Commands,
    config: &AppConfig,
    display: &Display,
) -> Result<()> {
    if command.requires_instance() {
        config.require_instance()?;
    }

    match command {
        Commands::Apply { plan } => handle_apply(config, display, &plan).await,
        Commands::Inspect { plan } => handle_inspect(display, &plan),
        Commands::Instance => handle_instance(config, display),
        Commands::Version => handle_version(display),
    }
}

async fn handle_apply(config: &AppConfig, display: &Display, plan_path: &Path) -> Result<()> {
    let instance = config.require_instance()?;
    let plan = UpdatePlan::load(plan_path)
        .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;

    let client = NetworkingConfig::default()
        .with_timeout(config.net_timeout)
        .build_client()
        .context("Failed to build HTTP client")?;
    let reconciler = Reconciler::new(LiveFileMutator::new(), HttpContentFetcher::new(client));

    apply_plan(&reconciler, plan, instance, display).await?;
    Ok(())
}

/// Run `plan` through `reconciler` with a progress bar and print a summary
///
/// # Errors
/// Fatal reconcile failures surface as "update failed" with the cause attached.
pub async fn apply_plan<M, F>(
    reconciler: &Reconciler<M, F>,
    plan: UpdatePlan,
    instance: &Path,
    display: &Display,
) -> Result<ReconcileReport>
where
    M: FileMutator,
    F: ContentFetcher,
{
    crate::log_info!(
        &format!("Applying update plan to {}", instance.display()),
        LogContext::with_progress("apply", plan.total())
    );
    let mut progress = display.progress("Updating modpack");

    let report = match reconciler.apply(plan, instance, &mut progress).await {
        Ok(report) => report,
        Err(e) => {
            crate::log_error!(&format!("update failed: {e}"));
            progress.abandon("update failed");
            return Err(anyhow::Error::new(e).context("update failed"));
        }
    };

    progress.finish("Update applied");
    print_report(display, &report);
    Ok(report)
}

fn print_report(display: &Display, report: &ReconcileReport) {
    let status = display.status();
    status.success(
        "Applied",
        &format!("{}/{} entries ({:.0}%)", report.completed, report.total, report.percent()),
    );

    if report.skipped > 0 {
        status.warning(&format!("{} entries skipped", report.skipped));
    }

    for failure in &report.recoverable {
        status.error(
            &format!("{} {}", failure.phase, failure.entry),
            &failure.message,
        );
    }
}

fn handle_inspect(display: &Display, plan_path: &Path) -> Result<()> {
    let plan = UpdatePlan::load(plan_path)
        .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
    debug!(plan = %plan_path.display(), "Inspecting plan");

    let status = display.status();
    status.emphasis(&format!("Plan {}", plan_path.display()));

    let mut rows: Vec<(&str, String)> = Phase::ALL
        .iter()
        .map(|phase| (phase.label(), plan.phase_len(*phase).to_string()))
        .collect();
    rows.push(("Declared overrides", plan.overrides_total.to_string()));
    rows.push(("Total", plan.total().to_string()));
    status.properties(&rows);

    let skipped = plan.skipped();
    if skipped.is_empty() {
        status.success("No entries will be skipped", "");
    } else {
        status.warning(&format!("{} entries will be skipped", skipped.len()));
        let items: Vec<String> = skipped
            .iter()
            .map(|s| format!("[{}] {} ({})", s.phase, s.entry, s.reason))
            .collect();
        status.list(&items);
    }

    Ok(())
}

fn handle_instance(config: &AppConfig, display: &Display) -> Result<()> {
    let instance = config.require_instance()?;
    let manifest = InstanceManifest::load(instance)?;

    let status = display.status();
    status.emphasis(manifest.name().unwrap_or("(unnamed instance)"));
    status.properties(&[
        ("Path", instance.display().to_string()),
        ("Manifest", manifest.path().display().to_string()),
        (
            "Game version",
            manifest.game_version().unwrap_or("unknown").to_string(),
        ),
        (
            "Mod loader",
            manifest.mod_loader().unwrap_or("unknown").to_string(),
        ),
        (
            "Installed addons",
            manifest.installed_addons().len().to_string(),
        ),
    ]);

    Ok(())
}

fn handle_version(display: &Display) -> Result<()> {
    let status = display.status();
    status.emphasis(&format!("packsync {}", env!("CARGO_PKG_VERSION")));
    status.message("Modpack update reconciliation for local game instances");
    status.properties(&[
        ("Target", std::env::consts::ARCH.to_string()),
        ("OS", std::env::consts::OS.to_string()),
    ]);
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
