pub mod matcher;
pub mod logging;

pub use matcher::MatcherConfig;
pub use logging::LoggingConfig;
