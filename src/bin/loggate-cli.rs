use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loggate::config::{load_settings, LoggerSettings};
use loggate::environment::ProcessEnv;
use loggate::{Logger, Severity};

#[derive(Parser)]
#[command(name = "loggate-cli")]
#[command(about = "Inspect and exercise environment-gated log levels", long_about = None)]
struct Cli {
    /// Logger settings file (TOML). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved deployment environment
    Env,
    /// Show the effective log level and override state
    Level,
    /// Validate a settings file
    Check {
        path: PathBuf,
    },
    /// Send one message through the gate
    Emit {
        /// Severity or free-form tag (error, warn, msg, diag, debug, or any tag)
        tag: String,
        message: String,
        /// JSON payload attached to the record
        #[arg(short, long)]
        payload: Option<String>,
        /// Request a level override first
        #[arg(short, long)]
        level: Option<u8>,
        /// Expiration for the override (RFC 3339 or YYYY-MM-DD HH:MM:SS)
        #[arg(short, long, requires = "level")]
        expires: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loggate=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => LoggerSettings::default(),
    };

    match cli.command {
        Commands::Env => {
            let logger = Logger::from_settings(&settings, Arc::new(ProcessEnv));
            let resolver = logger.controller().resolver();
            println!("environment:  {}", logger.environment());
            println!("runtime mode: {:?}", resolver.runtime_mode());
        }
        Commands::Level => {
            let logger = Logger::from_settings(&settings, Arc::new(ProcessEnv));
            println!("level:      {}", logger.log_level());
            println!("state:      {:?}", logger.level_state());
            match logger.expiration() {
                Some(at) => println!("expiration: {}", at.to_rfc3339()),
                None => println!("expiration: none"),
            }
            println!("finalized:  {}", logger.controller().finalize_after_first());
        }
        Commands::Check { path } => {
            load_settings(&path)?;
            println!("{}: ok", path.display());
        }
        Commands::Emit {
            tag,
            message,
            payload,
            level,
            expires,
        } => {
            let payload = payload
                .as_deref()
                .map(serde_json::from_str::<serde_json::Value>)
                .transpose()?;

            let logger = Logger::from_settings(&settings, Arc::new(ProcessEnv));
            if level.is_some() {
                logger.configure_log_level_until(level, expires.as_deref());
            }

            let emitted = logger.log(&message, Some(&tag), payload);
            tracing::debug!(
                severity = %Severity::from_tag(&tag),
                level = logger.log_level(),
                emitted,
                "emit finished"
            );
            if !emitted {
                eprintln!(
                    "not emitted: {} requires level {} (current {})",
                    Severity::from_tag(&tag),
                    Severity::from_tag(&tag).threshold(),
                    logger.log_level()
                );
            }
        }
    }

    Ok(())
}
