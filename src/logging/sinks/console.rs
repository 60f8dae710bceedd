use std::io::{self, Stderr};

use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{
    config::LoggingConfig,
    formatter::{self, FormatOptions},
};

/// Консольный слой по конфигурации. Пишет в stderr, stdout остаётся для
/// вывода команд.
pub fn layer_with_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer: fn() -> Stderr = io::stderr;

    formatter::build_formatter(
        FormatOptions {
            format: config.format,
            with_ansi: config.with_ansi,
            with_target: config.with_target,
        },
        writer,
    )
}

#[cfg(test)]
mod tests {
    use tracing::info;
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;
    use crate::logging::config::LogFormat;

    /// Тест проверяет, что layer_with_config строится для всех форматов и
    /// может быть зарегистрирован в Registry.
    #[test]
    fn test_layer_with_config_various_formats() {
        for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
            let cfg = LoggingConfig {
                format,
                with_ansi: false,
                ..Default::default()
            };
            let subscriber = Registry::default().with(layer_with_config::<Registry>(&cfg));

            tracing::subscriber::with_default(subscriber, || {
                info!(?format, "console layer smoke test");
            });
        }
    }
}
