//! Pipeline wiring - loads both sample sets and drives the replay.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use contracts::{ContractError, SampleSequence, StreamKind};
use dispatcher::{HttpTransport, HttpTransportConfig, ReplayConfig, ReplayOrchestrator};
use tracing::info;

use super::PipelineStats;
use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// bpm sample file
    pub bpm_path: PathBuf,

    /// uterus sample file
    pub uterus_path: PathBuf,

    /// Normalised base URL (`http://host:port`)
    pub target: String,

    /// Cycle / loop / speed settings
    pub replay: ReplayConfig,

    /// HTTP client settings
    pub transport: HttpTransportConfig,
}

impl PipelineConfig {
    /// Validate CLI arguments into a pipeline configuration
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let target = contracts::normalize_base(&cli.url)
            .map_err(|e| CliError::invalid_target(&cli.url, e.to_string()))?;
        reqwest::Url::parse(&target)
            .map_err(|e| CliError::invalid_target(&cli.url, e.to_string()))?;

        let replay = ReplayConfig {
            loop_playback: cli.loop_playback,
            max_cycles: if cli.max_cycles == 0 {
                None
            } else {
                Some(cli.max_cycles)
            },
            speed_multiplier: cli.speed,
        };
        replay.validate().map_err(setting_error)?;

        let transport = HttpTransportConfig {
            timeout: if cli.request_timeout_ms == 0 {
                None
            } else {
                Some(Duration::from_millis(cli.request_timeout_ms))
            },
        };

        Ok(Self {
            bpm_path: cli.bpm.clone(),
            uterus_path: cli.uterus.clone(),
            target,
            replay,
            transport,
        })
    }
}

/// Report a rejected replay setting under the flag that set it
fn setting_error(err: ContractError) -> CliError {
    match err {
        ContractError::InvalidSetting { field, message } => {
            let flag = match field.as_str() {
                "speed_multiplier" => "speed".to_string(),
                other => other.replace('_', "-"),
            };
            CliError::invalid_argument(flag, message)
        }
        other => CliError::invalid_argument("replay", other.to_string()),
    }
}

/// Load both sample sets; any failure aborts before network activity
pub fn load_sample_sets(config: &PipelineConfig) -> Result<(SampleSequence, SampleSequence)> {
    let bpm = load_one(&config.bpm_path, StreamKind::Bpm)?;
    let uterus = load_one(&config.uterus_path, StreamKind::Uterus)?;
    Ok((bpm, uterus))
}

fn load_one(path: &std::path::Path, stream: StreamKind) -> Result<SampleSequence> {
    let sequence =
        ingestion::load_samples(path, stream).map_err(|e| CliError::load(stream, e))?;

    observability::record_samples_loaded(stream, sequence.len());
    info!(
        stream = %stream,
        samples = sequence.len(),
        span_secs = format!("{:.3}", sequence.span()),
        "Loaded {} data points from {} CSV",
        sequence.len(),
        stream
    );

    Ok(sequence)
}

/// Main replay pipeline
pub struct Pipeline {
    orchestrator: ReplayOrchestrator<HttpTransport>,
    bpm_samples: usize,
    uterus_samples: usize,
}

impl Pipeline {
    /// Assemble the HTTP transport and the orchestrator
    pub fn new(
        config: &PipelineConfig,
        bpm: SampleSequence,
        uterus: SampleSequence,
    ) -> Result<Self> {
        let transport = HttpTransport::new(config.transport.clone())?;
        let bpm_samples = bpm.len();
        let uterus_samples = uterus.len();

        let orchestrator = ReplayOrchestrator::new(
            bpm,
            uterus,
            &config.target,
            Arc::new(transport),
            config.replay.clone(),
        )?;

        Ok(Self {
            orchestrator,
            bpm_samples,
            uterus_samples,
        })
    }

    /// Run the replay to completion
    ///
    /// In loop mode without `max_cycles` this only ends when the future is
    /// dropped.
    pub async fn run(&self) -> PipelineStats {
        let replay = self.orchestrator.run().await;

        PipelineStats {
            bpm_samples: self.bpm_samples,
            uterus_samples: self.uterus_samples,
            replay,
        }
    }
}
