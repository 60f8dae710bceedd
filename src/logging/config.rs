use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::LoggingError;

/// Формат вывода событий.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Многострочный человекочитаемый вывод
    #[default]
    Pretty,
    /// Однострочный вывод
    Compact,
    /// JSON-строка на событие
    Json,
}

/// Настройки файлового вывода. Файл ротируется ежедневно, события
/// пишутся в JSON.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Каталог для файлов логов
    pub dir: PathBuf,
    /// Префикс имени файла
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Уровень для событий этого крейта (`trace`..`error`). `RUST_LOG`, если
    /// задана, имеет приоритет.
    pub level: String,
    /// Формат консольного вывода
    pub format: LogFormat,
    /// ANSI-цвета в консоли
    pub with_ansi: bool,
    /// Выводить target события
    pub with_target: bool,
    /// Файловый вывод; `None`: только консоль
    pub file: Option<FileConfig>,
}

fn default_prefix() -> String {
    "leadcast.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Директива фильтра: чужие крейты на `warn`, этот крейт на `level`.
    pub fn build_filter_directive(&self) -> String {
        format!("warn,{}={}", env!("CARGO_CRATE_NAME"), self.level)
    }

    /// Проверяет уровень и настройки файла.
    pub fn validate(&self) -> Result<(), LoggingError> {
        if self.level.parse::<tracing::Level>().is_err() {
            return Err(LoggingError::InvalidLevel(self.level.clone()));
        }
        EnvFilter::try_new(self.build_filter_directive())
            .map_err(|_| LoggingError::InvalidLevel(self.level.clone()))?;

        if let Some(file) = &self.file {
            if file.prefix.is_empty() {
                return Err(LoggingError::EmptyFilePrefix);
            }
        }
        Ok(())
    }

    /// Создаёт каталог логов, если включён файловый вывод.
    pub fn ensure_log_dir(&self) -> Result<(), LoggingError> {
        if let Some(file) = &self.file {
            fs::create_dir_all(&file.dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LoggingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_filter_directive(), "warn,leadcast=info");
    }

    /// Тест проверяет, что неизвестный уровень отклоняется.
    #[test]
    fn test_invalid_level_rejected() {
        let cfg = LoggingConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(LoggingError::InvalidLevel(l)) if l == "loud"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let cfg = LoggingConfig {
            file: Some(FileConfig {
                dir: PathBuf::from("logs"),
                prefix: String::new(),
            }),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(LoggingError::EmptyFilePrefix)));
    }

    /// Тест проверяет десериализацию с дефолтами для пропущенных полей.
    #[test]
    fn test_deserialize_partial() {
        let cfg: LoggingConfig =
            serde_json::from_str(r#"{"format":"json","file":{"dir":"/tmp/x"}}"#).unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.level, "info");
        let file = cfg.file.unwrap();
        assert_eq!(file.prefix, "leadcast.log");
    }

    #[test]
    fn test_ensure_log_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let cfg = LoggingConfig {
            file: Some(FileConfig {
                dir: dir.clone(),
                prefix: default_prefix(),
            }),
            ..Default::default()
        };
        cfg.ensure_log_dir().unwrap();
        assert!(dir.is_dir());
    }
}
