use parking_lot::Mutex;

use super::Lead;

/// Внешний журнал принятых сообщений.
///
/// Брокер дописывает в него по одной записи на каждую успешную доставку
/// одному подписчику.
pub trait ProcessedSink: Send + Sync {
    fn append(
        &self,
        lead: Lead,
    );
}

/// Журнал в памяти.
#[derive(Debug, Default)]
pub struct MemorySink {
    leads: Mutex<Vec<Lead>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Копия журнала в порядке добавления.
    pub fn snapshot(&self) -> Vec<Lead> {
        self.leads.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.leads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.lock().is_empty()
    }

    pub fn clear(&self) {
        self.leads.lock().clear();
    }
}

impl ProcessedSink for MemorySink {
    fn append(
        &self,
        lead: Lead,
    ) {
        self.leads.lock().push(lead);
    }
}
