use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use parking_lot::Mutex;
use serde::Serialize;

use super::{
    HandleMessage, Lead, ProcessedSink, SubscriberRegistry, SubscriptionEntry,
    INCOMING_LEAD_CHANNEL,
};
use crate::{
    config::BrokerSettings,
    error::{InvalidArgument, PubSubError},
};

/// Брокер одноразовой рассылки.
///
/// Поддерживает:
/// - Подписку и отписку по идентификатору (повторная подписка ничего не меняет)
/// - Рассылку только в один распознаваемый канал
/// - Запись каждой успешной доставки в [`ProcessedSink`]
/// - Очистку всех подписок после успешного раунда
///
/// Все операции выполняются под одной блокировкой реестра, раунд рассылки
/// целиком. Брокер создаётся явно и раздаётся через `Arc<Broker>`.
pub struct Broker {
    /// Реестр подписок
    registry: Mutex<SubscriberRegistry>,
    /// Канал, запускающий рассылку
    channel: Arc<str>,
    /// Журнал принятых сообщений
    sink: Arc<dyn ProcessedSink>,
    /// Общее количество вызовов `publish`, прошедших проверку
    publish_count: AtomicUsize,
    /// Количество успешных доставок
    delivered_count: AtomicUsize,
    /// Количество публикаций в нераспознанные каналы
    ignored_count: AtomicUsize,
    /// Количество раундов, прерванных ошибкой обработчика
    failed_rounds: AtomicUsize,
}

/// Снимок счётчиков брокера.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BrokerStats {
    pub publish_count: usize,
    pub delivered_count: usize,
    pub ignored_count: usize,
    pub failed_rounds: usize,
}

impl Broker {
    /// Создаёт брокер для канала [`INCOMING_LEAD_CHANNEL`].
    pub fn new(sink: Arc<dyn ProcessedSink>) -> Self {
        Self::with_channel(INCOMING_LEAD_CHANNEL, sink)
    }

    /// Создаёт брокер для произвольного распознаваемого канала.
    pub fn with_channel(
        channel: impl Into<Arc<str>>,
        sink: Arc<dyn ProcessedSink>,
    ) -> Self {
        Self {
            registry: Mutex::new(SubscriberRegistry::new()),
            channel: channel.into(),
            sink,
            publish_count: AtomicUsize::new(0),
            delivered_count: AtomicUsize::new(0),
            ignored_count: AtomicUsize::new(0),
            failed_rounds: AtomicUsize::new(0),
        }
    }

    pub fn from_settings(
        settings: &BrokerSettings,
        sink: Arc<dyn ProcessedSink>,
    ) -> Self {
        Self::with_channel(settings.channel.as_str(), sink)
    }

    /// Подписывает обработчик.
    ///
    /// Повторная подписка с тем же идентификатором ничего не меняет.
    pub fn subscribe(
        &self,
        handler: Arc<dyn HandleMessage>,
    ) -> Result<(), PubSubError> {
        check_identity(handler.as_ref())?;

        let entry = SubscriptionEntry::new(handler);
        let identity = Arc::clone(&entry.identity);
        let mut registry = self.registry.lock();
        if registry.add(entry) {
            tracing::debug!(
                subscriber = %identity,
                subscribers = registry.len(),
                "Subscribed"
            );
        } else {
            tracing::trace!(subscriber = %identity, "Already subscribed");
        }
        Ok(())
    }

    /// Отписывает обработчик по идентификатору. Если подписки нет, ничего не
    /// делает.
    pub fn unsubscribe(
        &self,
        handler: &dyn HandleMessage,
    ) -> Result<(), PubSubError> {
        check_identity(handler)?;

        let mut registry = self.registry.lock();
        if registry.remove(handler.identity()).is_some() {
            tracing::debug!(
                subscriber = handler.identity(),
                subscribers = registry.len(),
                "Unsubscribed"
            );
        }
        Ok(())
    }

    /// Публикует лид в канал.
    ///
    /// Порядок проверок: канал, наличие сообщения, имя в сообщении. Публикация
    /// в другой канал проходит проверку и молча игнорируется.
    ///
    /// В распознаваемом канале лид доставляется всем подписчикам в порядке
    /// подписки, и каждая доставка пишется в журнал. Ошибка обработчика
    /// прерывает раунд и возвращается вызывающему; реестр при этом не
    /// очищается, а уже сделанные записи в журнале остаются. После успешного
    /// раунда реестр очищается целиком.
    pub fn publish(
        &self,
        channel: &str,
        lead: Option<&Lead>,
    ) -> Result<(), PubSubError> {
        if channel.is_empty() {
            return Err(InvalidArgument::EmptyChannel.into());
        }
        let lead = lead.ok_or(InvalidArgument::MissingMessage)?;
        lead.validate()?;

        self.publish_count.fetch_add(1, Ordering::Relaxed);

        if channel != &*self.channel {
            self.ignored_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(channel, "Publish to unrecognized channel ignored");
            return Ok(());
        }

        let mut registry = self.registry.lock();
        if registry.is_empty() {
            tracing::debug!(channel, "No subscribers, nothing to dispatch");
            return Ok(());
        }

        for entry in registry.snapshot() {
            if let Err(err) = entry.handler.handle_message(channel, lead) {
                self.failed_rounds.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    subscriber = %entry.identity,
                    channel,
                    error = %err,
                    "Handler failed, dispatch round aborted"
                );
                return Err(err);
            }

            self.sink.append(lead.clone());
            self.delivered_count.fetch_add(1, Ordering::Relaxed);
        }

        let delivered = registry.clear();
        tracing::info!(channel, delivered, "Dispatch round completed");
        Ok(())
    }

    /// Распознаваемый канал.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Идентификаторы подписчиков в порядке подписки.
    pub fn subscribers(&self) -> Vec<Arc<str>> {
        self.registry.lock().identities()
    }

    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            publish_count: self.publish_count.load(Ordering::Relaxed),
            delivered_count: self.delivered_count.load(Ordering::Relaxed),
            ignored_count: self.ignored_count.load(Ordering::Relaxed),
            failed_rounds: self.failed_rounds.load(Ordering::Relaxed),
        }
    }
}

fn check_identity(handler: &dyn HandleMessage) -> Result<(), PubSubError> {
    if handler.identity().is_empty() {
        return Err(InvalidArgument::EmptySubscriber.into());
    }
    Ok(())
}
