//! soulcheck-sim: run one scripted onboarding liveness check.

use std::path::PathBuf;

use clap::Parser;
use soulcheck_camera::CameraResource;
use soulcheck_sim::{
    run_realtime, run_virtual, SessionReport, SimulatedCamera, SimulatorConfig, TerminalPreview,
};
use soulcheck_timer::TimerQueue;
use soulcheck_utils::{format_millis, init_logging, LogFormat};
use soulcheck_verification::{LivenessOrchestrator, TimerKind};

#[derive(Parser)]
#[command(name = "soulcheck-sim", about = "Onboarding liveness check simulator")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "SOULCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "SOULCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "SOULCHECK_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Simulate the user refusing camera permission.
    #[arg(long, env = "SOULCHECK_DENY_CAMERA")]
    deny_camera: bool,

    /// Sleep through every delay instead of running on virtual time.
    #[arg(long, env = "SOULCHECK_REALTIME")]
    realtime: bool,

    /// Capture attempts before giving up.
    #[arg(long, env = "SOULCHECK_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Print the session report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(SimulatorConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::from_toml_file(path)?,
            None => SimulatorConfig::default(),
        };
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(max) = self.max_attempts {
            anyhow::ensure!(max > 0, "--max-attempts must be at least 1");
            config.max_attempts = max;
        }
        config.deny_camera |= self.deny_camera;
        config.realtime |= self.realtime;
        Ok((config, self.json))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, json) = Cli::parse().into_config()?;
    init_logging(config.log_format, &config.log_level);

    let phases = config.liveness.phases.len();
    let gate_ms = config.liveness.timing.time_to_gate_ms(phases);
    tracing::info!(
        phases,
        gate_after = %format_millis(gate_ms),
        realtime = config.realtime,
        "starting simulated onboarding"
    );

    let camera = CameraResource::new(
        SimulatedCamera::new(config.deny_camera),
        TerminalPreview::default(),
    );
    let scheduler = TimerQueue::<TimerKind>::new();
    let orch = LivenessOrchestrator::new(config.liveness.clone(), camera, scheduler)?
        .with_on_verified(|proof| {
            tracing::info!(
                attempts = proof.attempts(),
                at = %proof.verified_at(),
                "profile submission unlocked"
            );
        });

    let report = if config.realtime {
        run_realtime(orch, config.max_attempts).await?
    } else {
        run_virtual(orch, config.max_attempts).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &SessionReport) {
    for recorded in &report.events {
        println!(
            "{:>8}  {}",
            format_millis(recorded.at.as_millis()),
            serde_json::to_string(&recorded.event).unwrap_or_default()
        );
    }
    println!();
    println!("status:     {}", report.status);
    println!("attempts:   {}", report.attempts);
    if let Some(error) = &report.last_error {
        println!("last error: {error}");
    }
    println!(
        "submission: {}",
        if report.submission_unlocked {
            "unlocked"
        } else {
            "locked"
        }
    );
}
