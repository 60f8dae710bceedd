pub mod app;
pub mod pubsub;

pub use app::AppError;
pub use pubsub::{InvalidArgument, PubSubError};
