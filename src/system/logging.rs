//! Logging system initialization
//!
//! tracing-subscriber + tracing-appender；文本或 JSON 格式，可选按天滚动的日志文件。

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LOG_PREFIX: &str = "smartlink";

type BoxedWriter = Box<dyn std::io::Write + Send + Sync>;

fn build_writer(config: &LoggingConfig) -> Result<BoxedWriter> {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Ok(Box::new(std::io::stdout()));
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let prefix = path
            .file_name()
            .and_then(|f| f.to_str())
            .map(|f| f.trim_end_matches(".log"))
            .unwrap_or(DEFAULT_LOG_PREFIX);
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file))?;
        Ok(Box::new(file))
    }
}

/// `RUST_LOG` 优先，其次是配置里的 level
fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize logging system based on configuration
///
/// 返回的 `WorkerGuard` 需要在整个进程生命周期内保持存活，否则非阻塞日志不会被刷新。
/// 只能调用一次。
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let to_console = config.file.as_ref().is_none_or(|f| f.is_empty());
    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(build_filter(config))
        .with_level(true)
        .with_ansi(to_console);

    if config.format == "json" {
        subscriber_builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install JSON subscriber: {}", e))?;
    } else {
        subscriber_builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install subscriber: {}", e))?;
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn logging(file: Option<String>, rotation: bool) -> LoggingConfig {
        LoggingConfig {
            file,
            enable_rotation: rotation,
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_plain_file_writer_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = logging(Some(path.to_string_lossy().into_owned()), false);
        let mut writer = build_writer(&config).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rotating_writer_uses_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartlink.log");
        let config = logging(Some(path.to_string_lossy().into_owned()), true);
        assert!(build_writer(&config).is_ok());
    }

    #[test]
    fn test_missing_directory_is_error() {
        let config = logging(Some("/nonexistent-dir/for/sure/app.log".to_string()), false);
        assert!(build_writer(&config).is_err());
    }
}
