pub mod error;
pub mod quiz;
pub mod session;
pub mod settings;
pub mod terminal;

pub use error::{AppError, ConfigError, Result};
pub use quiz::{Config, Event, Quiz};
pub use session::SessionHandle;
