//! Recommendation engine: catalog fetch plus the pure scoring pipeline

use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogSource;
use crate::domain::perfume::Perfume;

use super::personality;
use super::ranking::{alternatives, filter_candidates, rank};
use super::response::assemble;
use super::scoring::{ScoreCalculator, ScoringConfig};
use super::tag_overlap;
use super::types::*;
use super::{RecommendationError, RecommendationResult, DEFAULT_MAX_RESULTS, MAX_ALTERNATIVES};

/// Tunables for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub default_max_results: usize,
    pub alternatives_limit: usize,
    pub scoring: ScoringConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_max_results: DEFAULT_MAX_RESULTS,
            alternatives_limit: MAX_ALTERNATIVES,
            scoring: ScoringConfig::default(),
        }
    }
}

/// Quiz-driven recommendation engine over a catalog collaborator
pub struct RecommendationEngine<C> {
    catalog: C,
    calculator: ScoreCalculator,
    settings: EngineSettings,
}

impl<C: CatalogSource> RecommendationEngine<C> {
    /// Create an engine with default weights and limits
    pub fn new(catalog: C) -> Self {
        Self::with_settings(catalog, EngineSettings::default())
    }

    pub fn with_settings(catalog: C, settings: EngineSettings) -> Self {
        Self { catalog, calculator: ScoreCalculator::with_config(settings.scoring), settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Fetch the catalog and run one recommendation pass. A catalog failure is returned as is,
    /// with no retry and no partial result.
    pub async fn recommend(
        &self,
        request: &AdvancedRecommendationRequest,
    ) -> RecommendationResult<AdvancedRecommendationResponse> {
        let request_id = Uuid::new_v4();
        let perfumes = self.fetch(request_id).await?;
        let catalog_size = perfumes.len();

        let response = self.recommend_from(perfumes, request);

        info!(
            event_name = "recommendation.generated",
            request_id = %request_id,
            catalog_size,
            result_count = response.results.len(),
            alternative_count = response.alternatives.len(),
            personality = %response.personality_analysis.scent_personality,
            "advanced recommendation generated"
        );
        Ok(response)
    }

    /// Run the scoring pipeline over an already fetched catalog.
    pub fn recommend_from(
        &self,
        perfumes: Vec<Perfume>,
        request: &AdvancedRecommendationRequest,
    ) -> AdvancedRecommendationResponse {
        let preferences = &request.quiz_preferences;
        let personality_analysis = personality::analyze(preferences);
        let candidates = filter_candidates(perfumes, &request.exclude_ids);

        let scored = candidates
            .iter()
            .map(|perfume| self.calculator.score(perfume, request, &personality_analysis))
            .collect();
        let max_results = request.effective_max_results(self.settings.default_max_results);
        let (selected, _) = rank(scored, max_results);
        let alternatives = alternatives(&candidates, &selected, self.settings.alternatives_limit);

        assemble(
            selected,
            personality_analysis,
            preferences,
            &self.calculator.config().weights,
            alternatives,
        )
    }

    /// Tag-overlap matching against the whole catalog.
    pub async fn match_aromas(&self, aroma_slugs: &[String]) -> RecommendationResult<TagMatchResponse> {
        let request_id = Uuid::new_v4();
        let perfumes = self.fetch(request_id).await?;
        let response = tag_overlap::match_aromas(&perfumes, aroma_slugs);

        info!(
            event_name = "recommendation.tag_match.generated",
            request_id = %request_id,
            requested_aromas = aroma_slugs.len(),
            result_count = response.results.len(),
            "aroma tag match generated"
        );
        Ok(response)
    }

    async fn fetch(&self, request_id: Uuid) -> RecommendationResult<Vec<Perfume>> {
        self.catalog.fetch_catalog().await.map_err(|error| {
            warn!(
                event_name = "recommendation.catalog_failed",
                request_id = %request_id,
                error = %error,
                "catalog fetch failed"
            );
            RecommendationError::GenerationFailed(error)
        })
    }
}
