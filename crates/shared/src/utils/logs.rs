use anyhow::{Context, Result};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Daily rolling `<component>.log` under `log_dir`, written off-thread.
pub fn file_writer(log_dir: &str, component: &str) -> (NonBlocking, WorkerGuard) {
    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, log_dir, format!("{component}.log"));
    non_blocking(file_appender)
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|val| val == "true" || val == "1")
        .unwrap_or(false)
}

/// Installs the global subscriber: pretty console output filtered by
/// `RUST_LOG`, an optional daily JSON file (`ENABLE_FILE_LOG`) and an
/// optional OpenTelemetry bridge. Keep the returned guard alive for the
/// lifetime of the process so buffered file output is flushed.
pub fn init_logger(
    sdk_logger_provider: Option<&SdkLoggerProvider>,
    component: &str,
) -> Result<Option<WorkerGuard>> {
    let is_dev = env_flag("DEV_MODE");

    let (file_layer, guard) = if env_flag("ENABLE_FILE_LOG") {
        let log_dir = if is_dev { "./logs" } else { "/var/log/app" };
        let (writer, guard) = file_writer(log_dir, component);

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let default_level = if is_dev { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(true)
        .with_filter(console_filter);

    let otel_layer = match sdk_logger_provider {
        Some(provider) => {
            let mut otel_filter = EnvFilter::new("info");
            for directive in ["hyper=off", "opentelemetry=off", "tonic=off", "h2=off", "sqlx=warn"] {
                otel_filter = otel_filter.add_directive(
                    directive
                        .parse()
                        .with_context(|| format!("Invalid log directive {directive}"))?,
                );
            }
            Some(OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_writer_flushes_into_component_log() {
        let dir = std::env::temp_dir().join(format!("storefront-logs-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let dir_str = dir.to_str().unwrap();

        let (mut writer, guard) = file_writer(dir_str, "storefront");
        writer.write_all(b"hello\n").unwrap();
        drop(guard);

        let written = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name().to_string_lossy().starts_with("storefront.log"));
        assert!(written);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn subscriber_installs_once() {
        assert!(init_logger(None, "storefront").is_ok());
        assert!(init_logger(None, "storefront").is_err());
    }
}
