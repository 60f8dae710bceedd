//! Подсистема Publish–Subscribe (pub/sub) для входящих лидов.
//!
//! - `broker`: подписка, отписка и одноразовая рассылка.
//! - `channels`: реестр имён каналов, которые видели обработчики.
//! - `handler`: контракт подписчика и обработчик лидов.
//! - `message`: полезная нагрузка (лид).
//! - `registry`: упорядоченный реестр подписок.
//! - `sink`: журнал принятых сообщений.

pub mod broker;
pub mod channels;
pub mod handler;
pub mod message;
pub mod registry;
pub mod sink;

pub use broker::*;
pub use channels::*;
pub use handler::*;
pub use message::*;
pub use registry::*;
pub use sink::*;
