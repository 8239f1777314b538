use serde::Deserialize;

use crate::domain::comparison::{EXHAUSTIVE_MAX_TRIALS, P_VALUE_PRECISION};
use crate::domain::distribution::SMALL_SAMPLE_MAX_TRIALS;
use crate::domain::{StatsError, TestSettings};

/// Significance level used when none is given
pub const DEFAULT_BASE_ALPHA: f64 = 0.05;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Family-wise significance level, split across variations
    pub base_alpha: f64,
    /// Truncation error allowed in the p-value computation
    pub p_value_precision: f64,
    /// Largest trial count for exact binomial computation
    pub small_sample_max_trials: u64,
    /// Largest baseline trial count summed without truncation
    pub exhaustive_max_trials: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_alpha: DEFAULT_BASE_ALPHA,
            p_value_precision: P_VALUE_PRECISION,
            small_sample_max_trials: SMALL_SAMPLE_MAX_TRIALS,
            exhaustive_max_trials: EXHAUSTIVE_MAX_TRIALS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AnalysisConfig {
    /// Engine settings described by this configuration
    pub fn test_settings(&self) -> Result<TestSettings, StatsError> {
        let settings = TestSettings {
            small_sample_max_trials: self.small_sample_max_trials,
            exhaustive_max_trials: self.exhaustive_max_trials,
            p_value_precision: self.p_value_precision,
        };
        settings.validate()?;

        if !(self.base_alpha > 0.0 && self.base_alpha < 1.0) {
            return Err(StatsError::configuration(format!(
                "base_alpha must be in (0, 1), got {}",
                self.base_alpha
            )));
        }

        Ok(settings)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("ABBA")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analysis_config() {
        let config = AppConfig::default();

        assert_eq!(config.analysis.base_alpha, 0.05);
        assert_eq!(config.analysis.p_value_precision, 1e-5);
        assert_eq!(config.analysis.small_sample_max_trials, 100);
        assert_eq!(config.analysis.exhaustive_max_trials, 1000);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_default_settings_match_engine_defaults() {
        let settings = AnalysisConfig::default().test_settings().unwrap();
        assert_eq!(settings, TestSettings::default());
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let config = AnalysisConfig {
            p_value_precision: 2.0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.test_settings(),
            Err(StatsError::Configuration { .. })
        ));

        let config = AnalysisConfig {
            base_alpha: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(config.test_settings().is_err());
    }

    fn load_with_vars(vars: &[(&str, &str)]) -> Result<AppConfig, config::ConfigError> {
        let mut source = config::Map::new();
        for (key, value) in vars {
            source.insert(key.to_string(), value.to_string());
        }
        AppConfig::load_with_env(AppConfig::environment().source(Some(source)))
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with_vars(&[
            ("ABBA__ANALYSIS__BASE_ALPHA", "0.01"),
            ("ABBA__LOGGING__LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.analysis.base_alpha, 0.01);
        assert_eq!(config.analysis.exhaustive_max_trials, 1000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_rejects_malformed_environment_value() {
        assert!(load_with_vars(&[("ABBA__ANALYSIS__BASE_ALPHA", "abc")]).is_err());
        assert!(load_with_vars(&[("ABBA__LOGGING__FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[analysis]\nbase_alpha = 0.01\n\n[logging]\nformat = \"json\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.analysis.base_alpha, 0.01);
        assert_eq!(config.analysis.small_sample_max_trials, 100);
        assert!(matches!(config.logging.format, LogFormat::Json));
    }
}
