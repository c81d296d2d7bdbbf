use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use aromatica_core::config::{LoadOptions, DEFAULT_CONFIG_FILE, NESTED_CONFIG_FILE};
use toml::Value;

use super::{load_config, CommandResult};

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config("config", options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let snapshot_path = config
        .catalog
        .snapshot_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unset>".to_string());
    lines.push(render_line(
        "catalog.snapshot_path",
        &snapshot_path,
        source("catalog.snapshot_path", &["AROMATICA_CATALOG_SNAPSHOT_PATH"]),
    ));

    lines.push(render_line(
        "recommendation.default_max_results",
        &config.recommendation.default_max_results.to_string(),
        source(
            "recommendation.default_max_results",
            &["AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS"],
        ),
    ));
    lines.push(render_line(
        "recommendation.alternatives_limit",
        &config.recommendation.alternatives_limit.to_string(),
        source(
            "recommendation.alternatives_limit",
            &["AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT"],
        ),
    ));

    for (name, weight) in config.recommendation.weights.as_pairs() {
        let key_path = format!("recommendation.weights.{name}");
        let env_key = format!("AROMATICA_RECOMMENDATION_WEIGHTS_{}", name.to_ascii_uppercase());
        let origin = source(&key_path, &[env_key.as_str()]);
        lines.push(render_line(&key_path, &format!("{weight:.2}"), origin));
    }

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", &["AROMATICA_LOGGING_LEVEL", "AROMATICA_LOG_LEVEL"]),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", &["AROMATICA_LOGGING_FORMAT", "AROMATICA_LOG_FORMAT"]),
    ));

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from(NESTED_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
