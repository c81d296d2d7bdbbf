use std::path::Path;

use aromatica_core::config::LoadOptions;
use aromatica_core::errors::ApplicationError;
use aromatica_core::recommendation::RecommendationEngine;
use aromatica_db::SnapshotCatalog;

use super::{catalog_path, load_config, runtime, CommandResult, EXIT_INPUT, EXIT_RECOMMENDATION};

const COMMAND: &str = "match";

pub fn run(options: &LoadOptions, catalog: Option<&Path>, aromas: &[String]) -> CommandResult {
    let slugs: Vec<String> = aromas
        .iter()
        .map(|slug| slug.trim().to_lowercase())
        .filter(|slug| !slug.is_empty())
        .collect();
    if slugs.is_empty() {
        return CommandResult::failure(
            COMMAND,
            "aroma_input",
            "at least one aroma slug is required",
            EXIT_INPUT,
        );
    }

    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let snapshot = match catalog_path(COMMAND, catalog, &config) {
        Ok(path) => path,
        Err(result) => return result,
    };

    let runtime = match runtime(COMMAND) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let engine =
        RecommendationEngine::with_settings(SnapshotCatalog::new(snapshot), config.engine_settings());
    match runtime.block_on(engine.match_aromas(&slugs)) {
        Ok(response) => CommandResult::json(COMMAND, &response),
        Err(error) => CommandResult::from_application_error(
            COMMAND,
            "recommendation",
            ApplicationError::from(error),
            EXIT_RECOMMENDATION,
        ),
    }
}
