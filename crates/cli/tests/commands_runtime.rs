use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use aromatica_cli::commands::{config, match_aromas, personalities, recommend};
use aromatica_core::config::LoadOptions;
use serde_json::Value;
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {
        "id": 1,
        "name": "Cedar Smoke",
        "brand": "Northwood",
        "description": "warm cedar and smoke",
        "price": 120.0,
        "longevity": "Long",
        "sillage": "Heavy",
        "aroma_tags": [{"id": 3, "slug": "woody", "name": "Woody"}]
    },
    {
        "id": 2,
        "name": "Lemon Spritz",
        "brand": "Aurora",
        "description": "light citrus splash",
        "price": 45.0,
        "longevity": "Light",
        "sillage": "Light",
        "aroma_tags": [
            {"id": 1, "slug": "citrus", "name": "Citrus"},
            {"id": 2, "slug": "fresh", "name": "Fresh"}
        ]
    },
    {
        "id": 3,
        "name": "Rose Letter",
        "brand": "Aurora",
        "description": "romantic rose",
        "price": 90.0,
        "longevity": "Medium",
        "sillage": "Medium",
        "aroma_tags": [{"id": 4, "slug": "floral", "name": "Floral"}]
    }
]"#;

const REQUEST: &str = r#"{
    "quiz_preferences": {"light_fresh": true, "summer": true},
    "current_situation": "casual",
    "season": "summer",
    "max_results": 2
}"#;

const ENV_KEYS: [&str; 12] = [
    "AROMATICA_CATALOG_SNAPSHOT_PATH",
    "AROMATICA_RECOMMENDATION_DEFAULT_MAX_RESULTS",
    "AROMATICA_RECOMMENDATION_ALTERNATIVES_LIMIT",
    "AROMATICA_RECOMMENDATION_WEIGHTS_PROFILE",
    "AROMATICA_RECOMMENDATION_WEIGHTS_SEASON",
    "AROMATICA_RECOMMENDATION_WEIGHTS_OCCASION",
    "AROMATICA_RECOMMENDATION_WEIGHTS_PERFORMANCE",
    "AROMATICA_RECOMMENDATION_WEIGHTS_UNIQUENESS",
    "AROMATICA_LOGGING_LEVEL",
    "AROMATICA_LOGGING_FORMAT",
    "AROMATICA_LOG_LEVEL",
    "AROMATICA_LOG_FORMAT",
];

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("catalog.json"), CATALOG).expect("write catalog");
        fs::write(dir.path().join("request.json"), REQUEST).expect("write request");
        Self { dir }
    }

    fn catalog(&self) -> PathBuf {
        self.dir.path().join("catalog.json")
    }

    fn request(&self) -> PathBuf {
        self.dir.path().join("request.json")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    for key in ENV_KEYS {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

fn recommend_with(fixture: &Fixture, catalog: Option<&Path>) -> Value {
    let result = recommend::run(&LoadOptions::default(), catalog, &fixture.request());
    assert_eq!(result.exit_code, 0, "expected successful recommendation: {}", result.output);
    parse_payload(&result.output)
}

#[test]
fn personalities_lists_every_archetype() {
    let result = personalities::run();
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let types = payload.as_array().expect("personality list");
    assert_eq!(types.len(), 6);
    assert!(types.iter().all(|entry| entry["type"].is_string()));
}

#[test]
fn recommend_prints_ranked_response() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let payload = recommend_with(&fixture, Some(&fixture.catalog()));

        let results = payload["results"].as_array().expect("results");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["rank"], 1);
        assert_eq!(results[0]["perfume"]["id"], 2);
        assert_eq!(payload["alternatives"].as_array().map(Vec::len), Some(1));
        assert_eq!(
            payload["recommendation_logic"]["algorithm"],
            "Multi-Factor Advanced Recommendation v2.0"
        );
    });
}

#[test]
fn recommend_falls_back_to_configured_snapshot() {
    let fixture = Fixture::new();
    let snapshot = fixture.catalog().display().to_string();
    with_env(&[("AROMATICA_CATALOG_SNAPSHOT_PATH", snapshot.as_str())], || {
        let payload = recommend_with(&fixture, None);
        assert_eq!(payload["results"].as_array().map(Vec::len), Some(2));
    });
}

#[test]
fn recommend_reports_unreadable_request() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let result = recommend::run(
            &LoadOptions::default(),
            Some(&fixture.catalog()),
            &fixture.path("missing.json"),
        );
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "request_input");
    });
}

#[test]
fn recommend_without_catalog_is_input_failure() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let result = recommend::run(&LoadOptions::default(), None, &fixture.request());
        assert_eq!(result.exit_code, 3);
        assert_eq!(parse_payload(&result.output)["error_class"], "catalog_input");
    });
}

#[test]
fn recommend_with_missing_snapshot_is_recommendation_failure() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let result = recommend::run(
            &LoadOptions::default(),
            Some(&fixture.path("absent.json")),
            &fixture.request(),
        );
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "recommendation");
        let message = payload["message"].as_str().unwrap_or_default();
        assert!(message.starts_with("service unavailable: recommendation generation failed"));
        assert_eq!(
            payload["hint"],
            "The service is temporarily unavailable. Please retry shortly."
        );
        assert!(payload["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
    });
}

#[test]
fn invalid_weights_are_config_failures() {
    with_env(&[("AROMATICA_RECOMMENDATION_WEIGHTS_PROFILE", "0.9")], || {
        let fixture = Fixture::new();
        let result =
            recommend::run(&LoadOptions::default(), Some(&fixture.catalog()), &fixture.request());
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

#[test]
fn match_ranks_by_tag_overlap() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let aromas = vec!["Citrus".to_string(), "fresh".to_string()];
        let result = match_aromas::run(&LoadOptions::default(), Some(&fixture.catalog()), &aromas);
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        let results = payload["results"].as_array().expect("results");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["perfume"]["id"], 2);
        assert_eq!(
            payload["explanation"],
            "Based on your aroma preferences, we found these matching fragrances."
        );
    });
}

#[test]
fn match_requires_aromas() {
    let fixture = Fixture::new();
    let aromas = vec![" ".to_string()];
    let result = match_aromas::run(&LoadOptions::default(), Some(&fixture.catalog()), &aromas);
    assert_eq!(result.exit_code, 3);
    assert_eq!(parse_payload(&result.output)["error_class"], "aroma_input");
}

#[test]
fn config_attributes_env_values() {
    with_env(&[("AROMATICA_LOG_LEVEL", "debug")], || {
        let result = config::run(&LoadOptions::default());
        assert_eq!(result.exit_code, 0);
        assert!(result
            .output
            .contains("- logging.level = debug (source: env (AROMATICA_LOG_LEVEL))"));
        assert!(result.output.contains("- catalog.snapshot_path = <unset> (source: default)"));
    });
}

#[test]
fn config_attributes_file_values() {
    with_env(&[], || {
        let fixture = Fixture::new();
        let path = fixture.path("aromatica.toml");
        fs::write(&path, "[recommendation]\ndefault_max_results = 4\n").expect("write config");

        let options = LoadOptions { config_path: Some(path.clone()), ..LoadOptions::default() };
        let result = config::run(&options);
        assert_eq!(result.exit_code, 0);

        let expected = format!(
            "- recommendation.default_max_results = 4 (source: file ({}))",
            path.display()
        );
        assert!(result.output.contains(&expected), "{}", result.output);
        assert!(result
            .output
            .contains("- recommendation.weights.profile = 0.40 (source: default)"));
    });
}
