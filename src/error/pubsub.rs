use std::any::Any;

use leadcast_error::{ErrorExt, StatusCode};
use thiserror::Error;

/// Ошибка операций брокера и обработчиков сообщений.
///
/// Все нарушения входных данных сводятся к одному виду:
/// [`PubSubError::InvalidArgument`]. Отсутствие подписчика при отписке
/// ошибкой не считается.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubSubError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// Причина отказа в [`PubSubError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("channel name is empty")]
    EmptyChannel,

    #[error("message is missing")]
    MissingMessage,

    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("subscriber identity is empty")]
    EmptySubscriber,
}

impl PubSubError {
    /// Причина ошибки.
    pub fn reason(&self) -> InvalidArgument {
        match self {
            Self::InvalidArgument(reason) => *reason,
        }
    }
}

impl ErrorExt for PubSubError {
    fn status_code(&self) -> StatusCode {
        StatusCode::InvalidArgs
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn metrics_tags(&self) -> Vec<(&'static str, String)> {
        let mut tags = vec![
            ("error_type", "pubsub".to_string()),
            ("status_code", self.status_code().to_string()),
        ];

        if let InvalidArgument::EmptyField(field) = self.reason() {
            tags.push(("field", field.to_string()));
        }

        tags
    }
}
