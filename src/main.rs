use anyhow::Result;
use pointer_config::AppConfig;
use pointer_core::PointerCore;
use pointer_input::PointerSession;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Load config from the path given as the first argument, or the default location.
fn load_config() -> AppConfig {
    let loaded = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => pointer_config::load_config_from(&path),
        None => pointer_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries pointer events only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pointer_app=info,pointer_core=info,pointer_input=info,pointer_config=info".into()
            }),
        )
        .init();

    info!(version = pointer_core::PROTOCOL_VERSION, "Universal pointer starting");

    let config = load_config();
    info!(
        width = config.screen.width,
        height = config.screen.height,
        distance = config.screen.distance,
        smoothing = config.screen.smoothing,
        convention = ?config.input.convention,
        "Config loaded"
    );

    let mut core = PointerCore::new();
    core.set_logger(Some(Box::new(|msg: &str| {
        info!(target: "pointer_core::sink", "{msg}");
    })));
    let mut session = PointerSession::with_core(core, &config)?;

    // Raw byte lines: a line that is not UTF-8 is skipped like malformed JSON.
    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut stdout = tokio::io::stdout();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut ticks: u64 = 0;
    // No output until the first message arrives.
    let mut started = false;

    loop {
        tokio::select! {
            line = lines.next_segment() => {
                match line? {
                    Some(line) if line.trim_ascii().is_empty() => {}
                    Some(line) => match session.handle_bytes(&line) {
                        Ok(()) => started = true,
                        Err(e) => warn!(%e, "Skipping message"),
                    },
                    None => {
                        info!("Input closed");
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                if !started {
                    continue;
                }
                emit(&mut session, &mut stdout).await?;

                ticks += 1;
                if ticks % 300 == 0 {
                    debug!(ticks, status = ?session.status(), "Pointer heartbeat");
                }
            }
        }
    }

    // Flush the final state for inputs shorter than one tick.
    if started {
        emit(&mut session, &mut stdout).await?;
    }

    Ok(())
}

/// Process the latest sample and write one JSON event line.
async fn emit(session: &mut PointerSession, stdout: &mut tokio::io::Stdout) -> Result<()> {
    let (_, event) = session.tick();
    let mut line = event.to_json();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
