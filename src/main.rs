use std::time::Instant;

use anyhow::Context;

use jobdeck::config::DeckConfig;
use jobdeck::editor::{ScriptedUi, render_and_apply};
use jobdeck::jobs::JobRegistry;
use jobdeck::orchestrator::JobOrchestrator;
use jobdeck::panel::Panel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DeckConfig::from_env().context("Invalid JOBDECK_* configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .init();

    let registry = JobRegistry::global();

    if config.list_catalog {
        let catalog = serde_json::to_string_pretty(registry.discover())?;
        println!("{catalog}");
        return Ok(());
    }

    eprintln!("🗂  jobdeck v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Run mode: {}", config.run_mode);
    eprintln!("   Job kinds: {} registered", registry.len());

    let mut panel = Panel::new();
    for (category, descriptors) in panel.catalog(registry) {
        let names: Vec<_> = descriptors.iter().map(|d| d.display_name.as_str()).collect();
        eprintln!("     {category}: {}", names.join(", "));
    }

    // ── Job list ─────────────────────────────────────────────────────────
    let mut orchestrator = JobOrchestrator::new();
    for kind in &config.jobs {
        if let Err(e) = panel.add_kind(&mut orchestrator, registry, kind) {
            tracing::warn!(kind = %kind, error = %e, "Skipping job");
        }
    }
    if orchestrator.is_empty() {
        eprintln!("   No jobs to run. Set JOBDECK_JOBS to a comma-separated list of kinds.");
        return Ok(());
    }

    // One headless edit pass, the same walk a host panel would draw.
    for slot in 0..orchestrator.len() {
        let mut ui = ScriptedUi::new();
        if let Some(job) = orchestrator
            .get_mut(slot)
            .and_then(|s| s.job.as_deref_mut())
        {
            render_and_apply(job, &mut ui);
            tracing::debug!(slot, widgets = ui.rendered().len(), "Rendered slot");
        }
    }

    // ── Run ──────────────────────────────────────────────────────────────
    let started = Instant::now();
    let result = orchestrator.start(config.run_mode).await;
    let elapsed = started.elapsed();

    for summary in orchestrator.summaries() {
        eprintln!(
            "   [{}] {} ({})",
            summary.index,
            summary.name.as_deref().unwrap_or("<empty>"),
            summary.kind.as_deref().unwrap_or("-"),
        );
    }

    match result {
        Ok(()) => {
            tracing::info!(mode = %config.run_mode, elapsed_ms = elapsed.as_millis() as u64, "All jobs finished");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(mode = %config.run_mode, error = %e, "Run failed");
            Err(e.into())
        }
    }
}
