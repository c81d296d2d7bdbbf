use std::fs;
use std::path::Path;

use anyhow::Context;
use aromatica_core::config::LoadOptions;
use aromatica_core::errors::ApplicationError;
use aromatica_core::recommendation::{AdvancedRecommendationRequest, RecommendationEngine};
use aromatica_db::SnapshotCatalog;

use super::{catalog_path, load_config, runtime, CommandResult, EXIT_INPUT, EXIT_RECOMMENDATION};

const COMMAND: &str = "recommend";

pub fn run(options: &LoadOptions, catalog: Option<&Path>, request: &Path) -> CommandResult {
    let config = match load_config(COMMAND, options) {
        Ok(config) => config,
        Err(result) => return result,
    };

    let request = match read_request(request) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(COMMAND, "request_input", format!("{error:#}"), EXIT_INPUT)
        }
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
    match runtime.block_on(engine.recommend(&request)) {
        Ok(response) => CommandResult::json(COMMAND, &response),
        Err(error) => CommandResult::from_application_error(
            COMMAND,
            "recommendation",
            ApplicationError::from(error),
            EXIT_RECOMMENDATION,
        ),
    }
}

fn read_request(path: &Path) -> anyhow::Result<AdvancedRecommendationRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read request file `{}`", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("could not parse request file `{}`", path.display()))
}
