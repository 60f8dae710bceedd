use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};

use super::{ChannelNameRegistry, Lead};
use crate::error::{InvalidArgument, PubSubError};

/// Имя подписчика по умолчанию.
pub const INCOMING_LEAD_SUBSCRIBER: &str = "IncomingLeadsSubscriber";

/// Единственный канал, публикация в который запускает рассылку.
pub const INCOMING_LEAD_CHANNEL: &str = "IncomingLeads";

/// Контракт подписчика брокера.
///
/// Брокер различает подписчиков только по [`HandleMessage::identity`]:
/// два обработчика с одинаковым идентификатором считаются одним подписчиком.
///
/// `handle_message` вызывается синхронно внутри раунда рассылки, пока брокер
/// держит блокировку реестра. Обращаться к тому же брокеру из обработчика
/// нельзя.
pub trait HandleMessage: Send + Sync {
    /// Уникальный ключ подписчика.
    fn identity(&self) -> &str;

    /// Обрабатывает одно сообщение из канала `channel`.
    fn handle_message(
        &self,
        channel: &str,
        lead: &Lead,
    ) -> Result<(), PubSubError>;

    /// Каналы, которые видел этот тип обработчика.
    fn subscribed_channels(&self) -> Vec<Arc<str>>;
}

/// Обработчик входящих лидов: проверяет лид и отмечает канал в реестре имён.
#[derive(Debug, Clone)]
pub struct IncomingLeadHandler {
    subscriber: Arc<str>,
    channels: Arc<ChannelNameRegistry>,
}

impl IncomingLeadHandler {
    /// Создаёт обработчик с общим на процесс реестром каналов.
    ///
    /// Без имени используется [`INCOMING_LEAD_SUBSCRIBER`].
    pub fn new(subscriber: Option<&str>) -> Self {
        Self::with_channels(
            subscriber.unwrap_or(INCOMING_LEAD_SUBSCRIBER),
            ChannelNameRegistry::shared(),
        )
    }

    /// Создаёт обработчик с явно переданным реестром каналов.
    pub fn with_channels(
        subscriber: impl Into<Arc<str>>,
        channels: Arc<ChannelNameRegistry>,
    ) -> Self {
        Self {
            subscriber: subscriber.into(),
            channels,
        }
    }

    pub fn channels(&self) -> &Arc<ChannelNameRegistry> {
        &self.channels
    }
}

impl Default for IncomingLeadHandler {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HandleMessage for IncomingLeadHandler {
    fn identity(&self) -> &str {
        &self.subscriber
    }

    fn handle_message(
        &self,
        channel: &str,
        lead: &Lead,
    ) -> Result<(), PubSubError> {
        if channel.is_empty() {
            return Err(InvalidArgument::EmptyChannel.into());
        }
        lead.validate()?;

        if self.channels.record(channel) {
            tracing::debug!(subscriber = %self.subscriber, channel, "Channel recorded");
        }

        tracing::debug!(
            subscriber = %self.subscriber,
            channel,
            first_name = lead.name(),
            "Lead handled"
        );
        Ok(())
    }

    fn subscribed_channels(&self) -> Vec<Arc<str>> {
        self.channels.names()
    }
}

impl PartialEq for IncomingLeadHandler {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.subscriber == other.subscriber
    }
}

impl Eq for IncomingLeadHandler {}

impl Hash for IncomingLeadHandler {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.subscriber.hash(state);
    }
}
