use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommendation::{
    EngineSettings, ScoringConfig, ScoringWeights, DEFAULT_MAX_RESULTS, MAX_ALTERNATIVES,
};

pub const DEFAULT_CONFIG_FILE: &str = "aromatica.toml";
pub const NESTED_CONFIG_FILE: &str = "config/aromatica.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub recommendation: RecommendationConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// JSON array of perfumes used when no explicit catalog is given.
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationConfig {
    pub default_max_results: usize,
    pub alternatives_limit: usize,
    pub weights: ScoringWeights,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_snapshot_path: Option<PathBuf>,
    pub default_max_results: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            recommendation: RecommendationConfig {
                default_max_results: DEFAULT_MAX_RESULTS,
                alternatives_limit: MAX_ALTERNATIVES,
                weights: ScoringWeights::default(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected =
                options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Engine tunables derived from the `[recommendation]` section.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            default_max_results: self.recommendation.default_max_results,
            alternatives_limit: self.recommendation.alternatives_limit,
            scoring: ScoringConfig::with_weights(self.recommendation.weights),
        }
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(catalog) = patch.catalog {
            if let Some(snapshot_path) = catalog.snapshot_path {
                self.catalog.snapshot_path = Some(snapshot_path);
            }
        }

        if let Some(recommendation) = patch.recommendation {
            if let Some(default_max_results) = recommendation.default_max_results {
                self.recommendation.default_max_results = default_max_results;
            }
            if let Some(alternatives_limit) = recommendation.alternatives_limit {
                self.recommendation.alternatives_limit = alternatives_limit;
            }
            if let Some(weights) = recommendation.weights {
                let current = &mut self.recommendation.weights;
                if let Some(profile) = weights.profile {
                    current.profile = profile;
                }
                if let Some(season) = weights.season {
                    current.season = season;
                }
                if let Some(occasion) = weights.occasion {
                    current.occasion = occasion;
                }
                if let Some(performance) = weights.performance {
                    current.performance = performance;
                }
                if let Some(uniqueness) = weights.uniqueness {
                    current.uniqueness = uniqueness;
                }
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("AROMATICA_CATALOG_SNAPSHOT_PATH") {
            self.catalog.snapshot_path = Some(PathBuf::from(value));
        }

        if let Some(value) = read_env("AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS") {
            self.recommendation.default_max_results =
                parse_usize("AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS", &value)?;
        }
        if let Some(value) = read_env("AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT") {
            self.recommendation.alternatives_limit =
                parse_usize("AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT", &value)?;
        }

        let weights = &mut self.recommendation.weights;
        for (key, slot) in [
            ("AROMATICA_RECOMMENDATION_WEIGHTS_PROFILE", &mut weights.profile),
            ("AROMATICA_RECOMMENDATION_WEIGHTS_SEASON", &mut weights.season),
            ("AROMATICA_RECOMMENDATION_WEIGHTS_OCCASION", &mut weights.occasion),
            ("AROMATICA_RECOMMENDATION_WEIGHTS_PERFORMANCE", &mut weights.performance),
            ("AROMATICA_RECOMMENDATION_WEIGHTS_UNIQUENESS", &mut weights.uniqueness),
        ] {
            if let Some(value) = read_env(key) {
                *slot = parse_f64(key, &value)?;
            }
        }

        let log_level =
            read_env("AROMATICA_LOGGING_LEVEL").or_else(|| read_env("AROMATICA_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("AROMATICA_LOGGING_FORMAT").or_else(|| read_env("AROMATICA_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(snapshot_path) = overrides.catalog_snapshot_path {
            self.catalog.snapshot_path = Some(snapshot_path);
        }
        if let Some(default_max_results) = overrides.default_max_results {
            self.recommendation.default_max_results = default_max_results;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_catalog(&self.catalog)?;
        validate_recommendation(&self.recommendation)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigError> {
    if let Some(path) = &catalog.snapshot_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "catalog.snapshot_path must not be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_recommendation(recommendation: &RecommendationConfig) -> Result<(), ConfigError> {
    if recommendation.default_max_results == 0 || recommendation.default_max_results > 100 {
        return Err(ConfigError::Validation(
            "recommendation.default_max_results must be in range 1..=100".to_string(),
        ));
    }

    if recommendation.alternatives_limit > 20 {
        return Err(ConfigError::Validation(
            "recommendation.alternatives_limit must be in range 0..=20".to_string(),
        ));
    }

    recommendation
        .weights
        .validate()
        .map_err(|message| ConfigError::Validation(format!("recommendation.weights: {message}")))
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    catalog: Option<CatalogPatch>,
    recommendation: Option<RecommendationPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationPatch {
    default_max_results: Option<usize>,
    alternatives_limit: Option<usize>,
    weights: Option<WeightsPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WeightsPatch {
    profile: Option<f64>,
    season: Option<f64>,
    occasion: Option<f64>,
    performance: Option<f64>,
    uniqueness: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_are_valid() -> Result<(), String> {
        let config = AppConfig::default();
        config.validate().map_err(|err| err.to_string())?;

        ensure(config.recommendation.default_max_results == 6, "default result cap should be 6")?;
        ensure(config.recommendation.alternatives_limit == 3, "default alternatives should be 3")?;
        ensure(config.catalog.snapshot_path.is_none(), "no snapshot configured by default")
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_AROMATICA_SNAPSHOT", "/srv/catalog/perfumes.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("aromatica.toml");
            fs::write(
                &path,
                r#"
[catalog]
snapshot_path = "${TEST_AROMATICA_SNAPSHOT}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.snapshot_path == Some(PathBuf::from("/srv/catalog/perfumes.json")),
                "snapshot path should be interpolated from environment",
            )
        })();

        clear_vars(&["TEST_AROMATICA_SNAPSHOT"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("AROMATICA_LOG_LEVEL", "warn");
        env::set_var("AROMATICA_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&["AROMATICA_LOG_LEVEL", "AROMATICA_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT", "5");
        env::set_var("AROMATICA_CATALOG_SNAPSHOT_PATH", "from-env.json");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("aromatica.toml");
            fs::write(
                &path,
                r#"
[catalog]
snapshot_path = "from-file.json"

[recommendation]
default_max_results = 8
alternatives_limit = 2

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    catalog_snapshot_path: Some(PathBuf::from("from-override.json")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.snapshot_path == Some(PathBuf::from("from-override.json")),
                "override snapshot path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.recommendation.default_max_results == 8,
                "file value should win over default",
            )?;
            ensure(
                config.recommendation.alternatives_limit == 5,
                "env value should win over file and defaults",
            )
        })();

        clear_vars(&[
            "AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT",
            "AROMATICA_CATALOG_SNAPSHOT_PATH",
        ]);
        result
    }

    #[test]
    fn weights_from_file_feed_engine_settings() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("aromatica.toml");
        fs::write(
            &path,
            r#"
[recommendation.weights]
profile = 0.5
season = 0.1
"#,
        )
        .map_err(|err| err.to_string())?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;
        let settings = config.engine_settings();

        ensure(settings.scoring.weights.profile == 0.5, "profile weight should come from file")?;
        ensure(settings.scoring.weights.season == 0.1, "season weight should come from file")?;
        ensure(settings.scoring.profile_base == 0.5, "bonus constants keep their defaults")
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("AROMATICA_RECOMMENDATION_WEIGHTS_PROFILE", "0.9");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("recommendation.weights")
            );
            ensure(has_message, "validation failure should mention recommendation.weights")
        })();

        clear_vars(&["AROMATICA_RECOMMENDATION_WEIGHTS_PROFILE"]);
        result
    }

    #[test]
    fn malformed_env_override_is_rejected() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS", "plenty");

        let result = (|| -> Result<(), String> {
            let rejected = matches!(
                AppConfig::load(LoadOptions::default()),
                Err(ConfigError::InvalidEnvOverride { ref key, .. })
                    if key == "AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS"
            );
            ensure(rejected, "non-numeric max results should be rejected")
        })();

        clear_vars(&["AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS"]);
        result
    }

    #[test]
    fn missing_required_file_is_reported() {
        let result = AppConfig::load(LoadOptions {
            config_path: Some(PathBuf::from("/nonexistent/aromatica.toml")),
            require_file: true,
            ..LoadOptions::default()
        });

        assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
    }
}
