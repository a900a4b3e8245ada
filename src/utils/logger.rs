use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use chrono::Local;
use tracing::info;
use tracing_subscriber::{FmtSubscriber, EnvFilter};

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber for the CLI.
///
/// With `log_dir` set, events go to a timestamped file inside it
/// (`url_check_YYYYmmdd_HHMMSS.log`); otherwise they go to stderr so stdout
/// stays reserved for results.
pub fn init_logger(log_dir: Option<&str>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false);

    match log_dir {
        Some(dir) => {
            // Create log directory if it doesn't exist
            if !Path::new(dir).exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir))?;
            }

            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let log_file = format!("{}/url_check_{}.log", dir, timestamp);
            let file = fs::File::create(&log_file)
                .with_context(|| format!("Failed to create log file {}", log_file))?;

            tracing::subscriber::set_global_default(builder.with_writer(file).finish())?;
            info!("Logger initialized, writing to {}", log_file);
        }
        None => {
            tracing::subscriber::set_global_default(
                builder.with_writer(std::io::stderr).finish(),
            )?;
            info!("Logger initialized");
        }
    }

    Ok(())
}
