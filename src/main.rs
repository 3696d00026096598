use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use log::{debug, error, info, warn};
use snafu_log::config::LogConfig;
use snafu_log::critical;
use snafu_log::logger::{LoggerRegistry, Severity};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Logger name, overrides `LOG_NAME`
    #[arg(long, global = true)]
    name: Option<String>,
    /// Minimum severity, overrides `LOG_LEVEL`
    #[arg(long, global = true)]
    level: Option<Severity>,
    /// Log file, overrides `LOG_FILE`
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a single message
    Emit {
        #[arg(long, short, default_value = "info")]
        severity: Severity,
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Log one line at every severity
    Demo,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let defaults = LogConfig::from_env();
    let config = LogConfig {
        name: cli.name.unwrap_or(defaults.name),
        level: cli.level.unwrap_or(defaults.level),
        file: cli.file.or(defaults.file),
    };

    let registry = LoggerRegistry::new();
    let handle = registry.setup(&config.name, config.level, config.file.as_deref())?;
    handle.install()?;

    match cli.command {
        Some(Commands::Emit { severity, message }) => {
            handle.log(severity, module_path!(), format_args!("{}", message.join(" ")));
        }
        Some(Commands::Demo) | None => {
            debug!("pools loaded from cache");
            info!("subscribed to sync events");
            warn!("reserves are {} blocks behind", 3);
            error!("multicall failed, retrying");
            critical!("signer socket is gone");
        }
    }

    handle.flush();
    Ok(())
}
