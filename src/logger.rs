use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = "logs";

fn log_dir() -> Result<PathBuf, String> {
    let dir = PathBuf::from(LOG_DIR);
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create log directory: {}", e))?;
    }
    Ok(dir)
}

/// Initialize the logger: console output plus a daily-rolling file under
/// `logs/`, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    // Capture log macro output as well
    let _ = tracing_log::LogTracer::init();

    let log_dir = match log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to initialize log directory: {}", e);
            return;
        }
    };

    let file_appender = tracing_appender::rolling::daily(log_dir, "portfolio-api.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    // The appender guard must live until process exit to keep flushing
    std::mem::forget(guard);
}
