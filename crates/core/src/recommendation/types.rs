//! Request and response records for quiz-driven recommendations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::perfume::{Longevity, Perfume, PerfumeId, Sillage};
use crate::domain::quiz::QuizPreferences;

lenient_category! {
    /// Situation the shopper is dressing for.
    Situation {
        Work => "work",
        Date => "date",
        Casual => "casual",
        Special => "special",
    } else Unspecified => ""
}

lenient_category! {
    Season {
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
        Winter => "winter",
    } else Unspecified => ""
}

/// Quiz answers plus situational context for one recommendation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedRecommendationRequest {
    pub quiz_preferences: QuizPreferences,
    pub current_situation: Situation,
    pub season: Season,
    /// morning, afternoon, evening, night
    pub time_of_day: String,
    /// confident, elegant, playful, mysterious
    pub desired_impression: String,
    /// Zero or negative selects the configured default.
    pub max_results: i64,
    pub exclude_ids: Vec<PerfumeId>,
}

impl AdvancedRecommendationRequest {
    pub fn new(quiz_preferences: QuizPreferences) -> Self {
        Self { quiz_preferences, ..Self::default() }
    }

    pub fn with_situation(mut self, situation: Situation) -> Self {
        self.current_situation = situation;
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = PerfumeId>) -> Self {
        self.exclude_ids.extend(ids);
        self
    }

    /// Result cap after normalizing non-positive values to `default`.
    pub fn effective_max_results(&self, default: usize) -> usize {
        usize::try_from(self.max_results).ok().filter(|value| *value > 0).unwrap_or(default)
    }
}

/// Per-factor scores, each within [0.0, 1.0].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub profile_match: f64,
    pub season_match: f64,
    pub occasion_match: f64,
    pub performance_match: f64,
    pub uniqueness_bonus: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRecommendationResult {
    pub perfume: Perfume,
    pub overall_score: f64,
    #[serde(flatten)]
    pub scores: ComponentScores,
    pub match_reasons: Vec<String>,
    pub best_for: Vec<String>,
    pub wear_timing: Vec<String>,
    pub longevity: Longevity,
    /// The perfume's sillage.
    pub projection: Sillage,
    pub confidence: f64,
    /// 1-based position in the final ranking.
    pub rank: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityAnalysis {
    pub scent_personality: String,
    pub key_traits: Vec<String>,
    pub style_description: String,
    pub recommendation_style: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityType {
    #[serde(rename = "type")]
    pub label: String,
    pub traits: Vec<String>,
    pub description: String,
    pub best_notes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLogic {
    pub algorithm: String,
    pub factors_considered: Vec<String>,
    pub weighting: BTreeMap<String, f64>,
    pub process_description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancedRecommendationResponse {
    pub results: Vec<AdvancedRecommendationResult>,
    pub personality_analysis: PersonalityAnalysis,
    pub recommendation_logic: RecommendationLogic,
    pub tips: Vec<String>,
    pub alternatives: Vec<Perfume>,
}

/// One tag-overlap match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagMatch {
    pub perfume: Perfume,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagMatchResponse {
    pub results: Vec<TagMatch>,
    pub explanation: String,
}
