use std::any::Any;

use leadcast_error::{ErrorExt, StatusCode};
use thiserror::Error;

use super::PubSubError;
use crate::logging::LoggingError;

/// Ошибки уровня приложения: загрузка настроек, логирование, разбор
/// входных данных CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("invalid lead payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    PubSub(#[from] PubSubError),
}

impl ErrorExt for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::InvalidConfig,
            Self::Logging(_) => StatusCode::LoggingUnavailable,
            Self::Payload(_) => StatusCode::DeserializationFailed,
            Self::PubSub(err) => err.status_code(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::PubSub(err) => err.metrics_tags(),
            _ => vec![
                ("error_type", self.type_name()),
                ("status_code", self.status_code().to_string()),
            ],
        }
    }
}
