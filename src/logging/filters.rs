use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Фильтр событий: `RUST_LOG`, если задана, иначе директива из конфигурации.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(config.build_filter_directive())
            .unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        sync::{Arc, Mutex},
    };

    use serial_test::serial;
    use tracing_subscriber::{fmt, prelude::*, registry::Registry};

    use super::*;

    // Мини-буферный writer для тестов
    struct VecMakeWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> fmt::MakeWriter<'a> for VecMakeWriter {
        type Writer = VecWriterGuard;

        fn make_writer(&'a self) -> Self::Writer {
            VecWriterGuard(self.0.clone())
        }
    }

    struct VecWriterGuard(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for VecWriterGuard {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Тест проверяет поведение фильтра в runtime: при уровне "warn" события
    /// info этого крейта отбрасываются, а warn проходят.
    #[test]
    #[serial]
    fn test_filter_from_config_filters_levels() {
        env::remove_var("RUST_LOG");

        let cfg = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        let filter = build_filter_from_config(&cfg);

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(VecMakeWriter(buffer.clone()))
            .with_filter(filter);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("filtered info message");
            tracing::warn!("visible warn message");
        });

        let out = buffer.lock().unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("visible warn message"), "got: {s}");
        assert!(!s.contains("filtered info message"), "got: {s}");
    }

    /// Тест проверяет, что RUST_LOG имеет приоритет над конфигурацией.
    #[test]
    #[serial]
    fn test_rust_log_overrides_config() {
        env::set_var("RUST_LOG", "trace");

        let cfg = LoggingConfig {
            level: "error".to_string(),
            ..Default::default()
        };
        let filter = build_filter_from_config(&cfg);
        env::remove_var("RUST_LOG");

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(VecMakeWriter(buffer.clone()))
            .with_filter(filter);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("debug passes with RUST_LOG=trace");
        });

        let out = buffer.lock().unwrap();
        assert!(String::from_utf8_lossy(&out).contains("debug passes"));
    }
}
