use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    logging::LoggingConfig,
    pubsub::{INCOMING_LEAD_CHANNEL, INCOMING_LEAD_SUBSCRIBER},
};

/// Имя необязательного файла настроек в текущем каталоге (без расширения).
pub const DEFAULT_CONFIG_NAME: &str = "leadcast";

/// Префикс переменных окружения: `LEADCAST_BROKER__CHANNEL`,
/// `LEADCAST_LOGGING__LEVEL` и т.д.
pub const ENV_PREFIX: &str = "LEADCAST";

/// Настройки брокера.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrokerSettings {
    /// Канал, публикация в который запускает рассылку
    pub channel: String,
    /// Имя подписчика по умолчанию
    pub default_subscriber: String,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            channel: INCOMING_LEAD_CHANNEL.to_string(),
            default_subscriber: INCOMING_LEAD_SUBSCRIBER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, `leadcast.toml` (если есть),
    /// переменные окружения.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// То же, что [`Settings::load`], плюс обязательный файл `path`, который
    /// перекрывает `leadcast.toml`.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("broker.channel", INCOMING_LEAD_CHANNEL)?
            .set_default("broker.default_subscriber", INCOMING_LEAD_SUBSCRIBER)?
            .add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            // Переменные окружения с префиксом LEADCAST_
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        // Десериализуем конфигурацию в нашу структуру
        cfg.try_deserialize()
    }
}
