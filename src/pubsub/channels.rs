use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Общий на процесс реестр имён каналов, которые видели обработчики лидов.
static SHARED_CHANNEL_NAMES: Lazy<Arc<ChannelNameRegistry>> =
    Lazy::new(|| Arc::new(ChannelNameRegistry::new()));

/// Множество имён каналов, обработанных хотя бы один раз.
///
/// Только пополняется, без дубликатов, в порядке первого появления.
/// Экземпляры обработчика, разделяющие один реестр, видят записи друг друга.
#[derive(Debug, Default)]
pub struct ChannelNameRegistry {
    names: RwLock<Vec<Arc<str>>>,
}

impl ChannelNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Общий на процесс экземпляр.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_CHANNEL_NAMES)
    }

    /// Записывает имя канала. Возвращает `true`, если имя встретилось
    /// впервые.
    pub fn record(
        &self,
        channel: &str,
    ) -> bool {
        if self.contains(channel) {
            return false;
        }

        let mut names = self.names.write();
        // между read и write другой поток мог успеть записать то же имя
        if names.iter().any(|n| &**n == channel) {
            return false;
        }
        names.push(Arc::from(channel));
        true
    }

    pub fn contains(
        &self,
        channel: &str,
    ) -> bool {
        self.names.read().iter().any(|n| &**n == channel)
    }

    /// Имена в порядке первого появления.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.names.read().clone()
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
