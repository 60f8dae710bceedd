use std::{fmt, slice, sync::Arc};

use super::HandleMessage;

/// Запись подписки: идентификатор подписчика и его обработчик.
#[derive(Clone)]
pub struct SubscriptionEntry {
    pub identity: Arc<str>,
    pub handler: Arc<dyn HandleMessage>,
}

impl SubscriptionEntry {
    pub fn new(handler: Arc<dyn HandleMessage>) -> Self {
        Self {
            identity: Arc::from(handler.identity()),
            handler,
        }
    }
}

impl fmt::Debug for SubscriptionEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("SubscriptionEntry")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Упорядоченный реестр подписок, уникальный по идентификатору.
///
/// Порядок вставки сохраняется и определяет порядок рассылки. Синхронизации
/// здесь нет: доступ сериализует брокер.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    entries: Vec<SubscriptionEntry>,
}

/// Перезапускаемый обход реестра в порядке вставки.
///
/// Клон итератора начинает обход с той же позиции, поэтому снимок можно
/// пройти повторно.
pub type Snapshot<'a> = slice::Iter<'a, SubscriptionEntry>;

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавляет запись, если подписчика с тем же идентификатором ещё нет.
    ///
    /// Возвращает `true`, если запись вставлена.
    pub fn add(
        &mut self,
        entry: SubscriptionEntry,
    ) -> bool {
        if self.contains(&entry.identity) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Удаляет запись с данным идентификатором, если она есть.
    pub fn remove(
        &mut self,
        identity: &str,
    ) -> Option<SubscriptionEntry> {
        let pos = self.entries.iter().position(|e| &*e.identity == identity)?;
        Some(self.entries.remove(pos))
    }

    /// Очищает реестр, возвращает количество удалённых записей.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.entries.iter()
    }

    pub fn contains(
        &self,
        identity: &str,
    ) -> bool {
        self.entries.iter().any(|e| &*e.identity == identity)
    }

    /// Идентификаторы в порядке вставки.
    pub fn identities(&self) -> Vec<Arc<str>> {
        self.entries.iter().map(|e| Arc::clone(&e.identity)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
