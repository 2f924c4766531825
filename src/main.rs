#![forbid(unsafe_code)]

//! `hostlink` — firmware-side host-link simulator binary.
//!
//! Drives the notifier and prompt engine interactively: protocol output
//! goes to stdout, commands and host acknowledgements are read line by
//! line from stdin, diagnostics go to stderr via `tracing`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use futures_util::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use hostlink::channel::SerialChannel;
use hostlink::gcode::parse_host_response;
use hostlink::hooks::SimPrinter;
use hostlink::notifier::ActionNotifier;
use hostlink::prompt::{PromptEngine, PromptReason};
use hostlink::{AppError, HostConfig, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "hostlink", about = "3D-printer host-link simulator", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("hostlink simulator bootstrap");

    // The protocol core is single-threaded run-to-completion; one worker
    // thread is all the line loop needs.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Io(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries the wire protocol; logs go to stderr.
    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    let config = match args.config {
        Some(path) => HostConfig::load_from_path(path)?,
        None => HostConfig::default(),
    };
    info!(?config, "configuration loaded");

    if !config.host_actions {
        info!("host_actions disabled; nothing to do");
        return Ok(());
    }

    let notifier = ActionNotifier::new(
        Box::new(SerialChannel::new(std::io::stdout())),
        config.actions.clone(),
    );
    let mut engine = PromptEngine::new(notifier, config.clone());
    let mut printer = SimPrinter::new();

    let mut lines = FramedRead::new(tokio::io::stdin(), LinesCodec::new());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                break;
            }

            line = lines.next() => {
                match line {
                    None => {
                        info!("stdin closed, shutting down");
                        break;
                    }
                    Some(Err(err)) => {
                        warn!(%err, "stdin read failed");
                        break;
                    }
                    Some(Ok(line)) => handle_line(&line, &config, &mut engine, &mut printer),
                }
            }
        }
    }

    Ok(())
}

/// Interpret one stdin line as a host acknowledgement or simulator command.
fn handle_line(line: &str, config: &HostConfig, engine: &mut PromptEngine, printer: &mut SimPrinter) {
    if let Some(code) = parse_host_response(line) {
        if config.prompt_support {
            engine.handle_response(code, printer);
        } else {
            warn!(code, "prompt_support disabled; acknowledgement ignored");
        }
        return;
    }

    let trimmed = line.trim();
    let (word, rest) = trimmed
        .split_once(' ')
        .map_or((trimmed, ""), |(word, rest)| (word, rest.trim()));

    match word {
        "" => {}
        "kill" => engine.notifier_mut().kill(),
        "pause" => engine.notifier_mut().pause(),
        "paused" => engine.notifier_mut().paused(),
        "resume" => engine.notifier_mut().resume(),
        "resumed" => engine.notifier_mut().resumed(),
        "cancel" => engine.notifier_mut().cancel(),
        "notify" => engine.notifier_mut().notify(rest),
        "trip" => printer.runout_tripped = true,
        "untrip" => printer.runout_tripped = false,
        "runout" | "pause-resume" | "attention" | "info" if !config.prompt_support => {
            warn!(word, "prompt_support disabled; command ignored");
        }
        "runout" => engine.filament_load_prompt(printer),
        "pause-resume" => {
            engine.do_prompt(PromptReason::PauseResume, "Resume Print", Some("Resume"), None);
        }
        "attention" => {
            engine.do_prompt(PromptReason::UserContinue, "Nozzle Parked", Some("Continue"), None);
        }
        "info" => {
            let text = if rest.is_empty() { "Message" } else { rest };
            engine.do_prompt(PromptReason::Info, text, None, None);
        }
        other => warn!(command = other, "unrecognised simulator command"),
    }
}
