use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use rpgshare::handlers::{ConsoleEmbedHandler, JsonLinesHandler};
use rpgshare::{Config, Monitor};

#[derive(Parser)]
#[command(name = "rpgshare", about = "RPG Share: turn [RPGShare] log lines into chat events")]
struct Cli {
    /// Write debug logs to /tmp/rpgshare-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/rpgshare/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How accepted shares are written to stdout.
    #[arg(long, value_enum, default_value_t = Output::Embed)]
    output: Output,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read log lines from stdin until EOF (default).
    Run,
    /// Replay a scripted multiplayer sharing session.
    Simulate {
        /// Pause between simulated shares, in milliseconds.
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Embed,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };
    let sharing = config.item_sharing;

    let monitor = Monitor::new(&sharing)?;
    match cli.output {
        Output::Embed => monitor.register(ConsoleEmbedHandler::stdout()),
        Output::Json => monitor.register(JsonLinesHandler::stdout()),
    };
    if !monitor.is_enabled() {
        tracing::warn!("item sharing is disabled in config; every line will be ignored");
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            rpgshare::feed::feed_lines(&monitor, stdin).await?;
            monitor.wait_idle().await;
        }
        Command::Simulate { delay_ms } => {
            rpgshare::simulate::run_session(&monitor, &sharing.marker, Duration::from_millis(delay_ms))
                .await;
        }
    }

    let stats = monitor.stats();
    tracing::info!(
        lines = stats.lines,
        dispatched = stats.dispatched,
        no_match = stats.no_match,
        decode_errors = stats.decode_errors,
        validation_errors = stats.validation_errors,
        cooldown_skips = stats.cooldown_skips,
        disabled = stats.disabled,
        "monitor finished"
    );
    Ok(())
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/rpgshare-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("rpgshare debug log started, tail -f /tmp/rpgshare-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}
