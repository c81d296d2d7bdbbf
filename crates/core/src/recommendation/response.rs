//! Response assembly: algorithm metadata and wear tips

use crate::domain::perfume::Perfume;
use crate::domain::quiz::QuizPreferences;

use super::scoring::ScoringWeights;
use super::types::*;

pub const ALGORITHM_NAME: &str = "Multi-Factor Advanced Recommendation v2.0";

pub const FACTORS_CONSIDERED: [&str; 5] = [
    "Profile Match",
    "Season Suitability",
    "Occasion Appropriateness",
    "Performance Match",
    "Uniqueness Bonus",
];

pub const PROCESS_DESCRIPTION: &str = "Our algorithm analyzes your personality traits, scent preferences, and usage patterns to find perfect matches from our database of 940+ perfumes.";

pub fn recommendation_logic(weights: &ScoringWeights) -> RecommendationLogic {
    RecommendationLogic {
        algorithm: ALGORITHM_NAME.to_owned(),
        factors_considered: FACTORS_CONSIDERED.iter().map(|f| (*f).to_owned()).collect(),
        weighting: weights.as_pairs().iter().map(|(name, w)| ((*name).to_owned(), *w)).collect(),
        process_description: PROCESS_DESCRIPTION.to_owned(),
    }
}

/// Fixed-order tips: pulse points first, storage last, flag-driven tips between.
pub fn tips(preferences: &QuizPreferences) -> Vec<String> {
    let conditional = [
        (preferences.work, "Choose subtle scents for professional environments"),
        (preferences.dates, "Apply 30 minutes before your date for optimal effect"),
        (preferences.unique, "Layer with unscented lotion to make unique fragrances last longer"),
    ];

    std::iter::once("Apply fragrance to pulse points for better longevity")
        .chain(conditional.iter().filter(|(set, _)| *set).map(|(_, tip)| *tip))
        .chain(std::iter::once("Store fragrances in a cool, dark place to preserve quality"))
        .map(str::to_owned)
        .collect()
}

pub fn assemble(
    results: Vec<AdvancedRecommendationResult>,
    personality_analysis: PersonalityAnalysis,
    preferences: &QuizPreferences,
    weights: &ScoringWeights,
    alternatives: Vec<Perfume>,
) -> AdvancedRecommendationResponse {
    AdvancedRecommendationResponse {
        results,
        personality_analysis,
        recommendation_logic: recommendation_logic(weights),
        tips: tips(preferences),
        alternatives,
    }
}
