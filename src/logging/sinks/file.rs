use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling::daily};
use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{
    config::{FileConfig, LogFormat},
    formatter::{self, FormatOptions},
    LoggingError,
};

/// Файловый слой: ежедневная ротация, неблокирующая запись, JSON.
///
/// Возвращённый `WorkerGuard` нужно держать до завершения работы, иначе
/// хвост буфера потеряется.
pub fn layer_with_config<S>(
    config: &FileConfig
) -> Result<(Box<dyn LayerTrait<S> + Send + Sync>, WorkerGuard), LoggingError>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    std::fs::create_dir_all(&config.dir)?;

    let file_appender = daily(&config.dir, &config.prefix);
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    let layer = formatter::build_formatter(
        FormatOptions {
            format: LogFormat::Json,
            with_ansi: false,
            with_target: true,
        },
        non_blocking_writer,
    );

    Ok((layer, guard))
}
