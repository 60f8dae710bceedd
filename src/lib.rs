/// Settings loading (defaults, TOML file, environment).
pub mod config;
/// Error types and their status codes.
pub mod error;
/// Structured logging (formatting, filters, sinks).
pub mod logging;
/// Pub/Sub: Broker, handlers, registries, processed sink.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Settings.
pub use self::config::{BrokerSettings, Settings};
/// Operation errors.
pub use error::{AppError, InvalidArgument, PubSubError};
/// Status codes and the error extension trait.
pub use leadcast_error::{ErrorExt, StatusCode};
/// Logging.
pub use logging::{init_logging, LoggingConfig, LoggingHandle};
/// Pub/Sub API.
pub use pubsub::{
    Broker, BrokerStats, ChannelNameRegistry, HandleMessage, IncomingLeadHandler, Lead,
    MemorySink, ProcessedSink, SubscriberRegistry, SubscriptionEntry, INCOMING_LEAD_CHANNEL,
    INCOMING_LEAD_SUBSCRIBER,
};
