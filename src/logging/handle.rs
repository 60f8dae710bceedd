use tracing_appender::non_blocking::WorkerGuard;

/// Handle для управления lifecycle логирования.
///
/// Держит guard файлового writer-а; пока handle жив, буфер сбрасывается в
/// фоне.
#[derive(Debug)]
pub struct LoggingHandle {
    file_guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    pub fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self { file_guard }
    }

    /// Включён ли файловый вывод.
    pub fn has_file_sink(&self) -> bool {
        self.file_guard.is_some()
    }

    /// Сбрасывает буферы и останавливает фоновый writer.
    pub fn shutdown(mut self) {
        let start = std::time::Instant::now();
        tracing::debug!(file_sink = self.has_file_sink(), "Logging shutdown");
        drop(self.file_guard.take());
        let elapsed = start.elapsed();
        // подписчик ещё жив, но файл уже закрыт: событие уйдёт только в консоль
        tracing::trace!(shutdown_duration_ms = elapsed.as_millis() as u64, "Logging flushed");
    }
}
