use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::Layer as LayerTrait,
    registry::LookupSpan,
};

use crate::logging::config::LogFormat;

/// Параметры fmt-слоя.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
}

/// Собирает fmt-слой для заданного writer.
///
/// Возвращаем boxed trait-объект, чтобы стереть конкретный тип формата
/// (json/pretty/compact).
pub fn build_formatter<S, W>(
    options: FormatOptions,
    writer: W,
) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let FormatOptions {
        format,
        with_ansi,
        with_target,
    } = options;

    match format {
        LogFormat::Json => Box::new(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(with_target),
        ),
        LogFormat::Pretty => Box::new(
            fmt::layer()
                .event_format(fmt::format().pretty())
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(with_target),
        ),
        LogFormat::Compact => Box::new(
            fmt::layer()
                .event_format(fmt::format().compact())
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(with_target),
        ),
    }
}
