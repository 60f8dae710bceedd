pub mod settings;

pub use settings::{BrokerSettings, Settings, DEFAULT_CONFIG_NAME, ENV_PREFIX};
