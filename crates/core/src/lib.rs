pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{MarketingError, MarketingResult};
pub use types::{KycTier, MessageChannel};
