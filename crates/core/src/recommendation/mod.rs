//! Quiz-driven perfume recommendations
//!
//! Maps quiz answers to a personality archetype, scores every catalog perfume on five
//! weighted factors, ranks them and packages the result with wear tips and alternatives.
//! A simpler aroma tag overlap matcher lives alongside.

mod engine;
pub mod personality;
pub mod ranking;
pub mod response;
mod scoring;
pub mod tag_overlap;
mod types;

pub use engine::{EngineSettings, RecommendationEngine};
pub use personality::{analyze, personality_types, Archetype};
pub use scoring::{ScoreCalculator, ScoringConfig, ScoringWeights};
pub use types::*;

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("recommendation generation failed: {0}")]
    GenerationFailed(#[source] CatalogError),
}

/// Result type for recommendation operations
pub type RecommendationResult<T> = Result<T, RecommendationError>;

/// Results returned when a request asks for zero or fewer
pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Maximum alternatives attached to a response
pub const MAX_ALTERNATIVES: usize = 3;

/// Default scoring weights and bonuses
pub const DEFAULT_SCORING: ScoringConfig = ScoringConfig {
    weights: ScoringWeights {
        profile: 0.40,
        season: 0.20,
        occasion: 0.20,
        performance: 0.10,
        uniqueness: 0.10,
    },

    profile_base: 0.5,
    profile_family_bonus: 0.2,

    season_base: 0.6,
    season_keyword_bonus: 0.3,

    occasion_base: 0.6,
    occasion_bonus: 0.3,
    professional_bonus: 0.1,
    casual_price_ceiling: 150.0,
    special_price_floor: 100.0,

    performance_base: 0.5,
    longevity_match_bonus: 0.3,
    sillage_match_bonus: 0.2,

    uniqueness_default: 0.5,
    unique_premium: 0.8,
    unique_standard: 0.6,
    unique_premium_price_floor: 200.0,
    safe_bet: 0.7,
    safe_bet_price_ceiling: 100.0,

    reason_threshold: 0.7,
    value_price_ceiling: 100.0,
    confidence_lift: 0.1,
};
