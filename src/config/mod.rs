pub mod engine;
pub mod error;

pub use engine::EngineConfig;
pub use error::{ConfigError, ConfigResult};
