//! Replay command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::pipeline::{load_sample_sets, Pipeline, PipelineConfig, SampleSetSummary};

/// Execute the replay
pub async fn run_replay(cli: &Cli) -> Result<()> {
    let config = PipelineConfig::from_cli(cli)?;

    info!(
        bpm = %config.bpm_path.display(),
        uterus = %config.uterus_path.display(),
        target = %config.target,
        "Loading sample sets"
    );

    // Load errors are fatal and happen before any request is sent
    let (bpm, uterus) = load_sample_sets(&config)?;

    // Dry run - just summarise and exit
    if cli.dry_run {
        info!("Dry run mode - sample sets are valid, exiting");
        let summaries = [
            SampleSetSummary::new(&bpm, config.bpm_path.display().to_string()),
            SampleSetSummary::new(&uterus, config.uterus_path.display().to_string()),
        ];
        print_dry_run_summary(&config, &summaries, cli.json)?;
        return Ok(());
    }

    let pipeline = Pipeline::new(&config, bpm, uterus)?;

    // Setup graceful shutdown handler
    let shutdown_signal = setup_shutdown_signal();

    info!(
        target = %config.target,
        loop_playback = config.replay.loop_playback,
        "Starting replay..."
    );

    // Dropping the replay future aborts both stream tasks
    tokio::select! {
        stats = pipeline.run() => {
            info!(
                cycles = stats.replay.cycles_completed,
                deliveries = stats.replay.total_attempted(),
                failed = stats.replay.total_failed(),
                duration_secs = stats.replay.duration.as_secs_f64(),
                "Replay completed"
            );
            stats.print_summary();
        }
        _ = shutdown_signal => {
            warn!("Received shutdown signal, stopping replay...");
        }
    }

    info!("CTG replay finished");
    Ok(())
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print sample set summary for dry-run mode
fn print_dry_run_summary(
    config: &PipelineConfig,
    summaries: &[SampleSetSummary],
    json: bool,
) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(summaries)
            .context("Failed to serialize dry-run summary")?;
        println!("{output}");
        return Ok(());
    }

    println!("\n=== Replay Summary ===\n");
    println!("Target: {}", config.target);
    println!(
        "Mode: {}",
        match (config.replay.loop_playback, config.replay.max_cycles) {
            (false, _) => "single cycle".to_string(),
            (true, None) => "loop until interrupted".to_string(),
            (true, Some(n)) => format!("loop for {n} cycles"),
        }
    );
    println!("Speed: {}x", config.replay.speed_multiplier);

    for summary in summaries {
        println!("\nStream {} ({})", summary.stream, summary.path);
        println!("  Samples: {}", summary.samples);
        println!("  Span: {:.3}s", summary.span_secs);
        if let (Some(min), Some(max)) = (summary.min_value, summary.max_value) {
            println!("  Values: {min:.3} .. {max:.3}");
        }
        if !summary.offsets_sorted {
            println!("  Note: offsets are not in ascending order; overdue samples send at once");
        }
    }

    println!();
    Ok(())
}
