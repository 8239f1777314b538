mod app_config;

pub use app_config::{AnalysisConfig, AppConfig, DEFAULT_BASE_ALPHA, LogFormat, LoggingConfig};
