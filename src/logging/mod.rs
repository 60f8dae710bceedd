pub mod config;
mod filters;
mod formatter;
pub mod handle;
pub mod sinks;

pub use config::{FileConfig, LogFormat, LoggingConfig};
pub use handle::LoggingHandle;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

/// Ошибки инициализации логирования.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("log file prefix is empty")]
    EmptyFilePrefix,

    #[error("log directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("global subscriber is already set: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Инициализация логирования с конфигурацией.
///
/// Устанавливает глобальный subscriber; повторный вызов вернёт
/// [`LoggingError::Init`].
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingHandle, LoggingError> {
    config.validate()?;
    config.ensure_log_dir()?;

    let env_filter = filters::build_filter_from_config(config);
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    layers.push(sinks::console::layer_with_config(config));

    let file_guard = match &config.file {
        Some(file) => {
            let (file_layer, guard) = sinks::file::layer_with_config(file)?;
            layers.push(file_layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        file_enabled = file_guard.is_some(),
        "Logging system initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет единственную глобальную инициализацию: первый вызов
    /// успешен, второй возвращает ошибку.
    #[test]
    fn test_init_logging_once() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            with_ansi: false,
            file: Some(FileConfig {
                dir: tmp.path().join("logs"),
                prefix: "init.log".to_string(),
            }),
            ..Default::default()
        };

        let handle = init_logging(&cfg).expect("first init succeeds");
        assert!(handle.has_file_sink());
        assert!(tmp.path().join("logs").is_dir());

        assert!(matches!(init_logging(&cfg), Err(LoggingError::Init(_))));
        handle.shutdown();
    }

    #[test]
    fn test_init_logging_rejects_invalid_config() {
        let cfg = LoggingConfig {
            level: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(init_logging(&cfg), Err(LoggingError::InvalidLevel(_))));
    }
}
