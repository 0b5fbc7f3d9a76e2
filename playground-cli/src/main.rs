//! # Playground CLI
//!
//! Replays a scripted editing session against the playground core.

use clap::Parser;
use playground_cli::{load_script, replay, CliArgs, ConsoleHost};
use playground_core::PlaygroundConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing on stderr with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,playground_core=debug,playground_cli=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,playground_core=debug,playground_cli=debug"));

    // Renders go to stdout; keep logs out of the way.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = PlaygroundConfig::try_from(&args)?;
    tracing::info!(
        "Viewport {}x{}, drag containment {}",
        config.viewport_width,
        config.viewport_height,
        if config.contain_drag { "on" } else { "off" }
    );

    let events = load_script(&args.script)?;
    tracing::info!("Replaying {} events from {}", events.len(), args.script.display());

    let host = ConsoleHost::new(std::io::stdout().lock(), args.format);
    let (summary, host) = replay(events, config, host)?;
    host.finish()?;

    tracing::info!(
        "Replay finished: {} applied, {} rejected",
        summary.applied,
        summary.rejected
    );
    Ok(())
}
