//! Multi-factor scoring for quiz-driven recommendations

use crate::domain::perfume::{Longevity, Perfume, Sillage};
use crate::domain::quiz::{LongevityPreference, QuizPreferences, SillagePreference};

use super::types::*;

/// Weights for the five scoring factors. They must each lie in [0, 1] and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Weight for aroma profile match (default: 0.40)
    pub profile: f64,
    /// Weight for season suitability (default: 0.20)
    pub season: f64,
    /// Weight for occasion appropriateness (default: 0.20)
    pub occasion: f64,
    /// Weight for longevity/sillage match (default: 0.10)
    pub performance: f64,
    /// Weight for uniqueness bonus (default: 0.10)
    pub uniqueness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_SCORING.weights
    }
}

impl ScoringWeights {
    const TOLERANCE: f64 = 1e-6;

    pub fn as_pairs(&self) -> [(&'static str, f64); 5] {
        [
            ("profile", self.profile),
            ("season", self.season),
            ("occasion", self.occasion),
            ("performance", self.performance),
            ("uniqueness", self.uniqueness),
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, weight) in self.as_pairs() {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(format!("weight `{name}` must be within [0, 1], got {weight}"));
            }
        }
        let total: f64 = self.as_pairs().iter().map(|(_, weight)| weight).sum();
        if (total - 1.0).abs() > Self::TOLERANCE {
            return Err(format!("weights must sum to 1.0, got {total}"));
        }
        Ok(())
    }
}

/// Every constant the scorer uses: factor weights, base values and bonus magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,

    pub profile_base: f64,
    pub profile_family_bonus: f64,

    pub season_base: f64,
    pub season_keyword_bonus: f64,

    pub occasion_base: f64,
    pub occasion_bonus: f64,
    pub professional_bonus: f64,
    pub casual_price_ceiling: f64,
    pub special_price_floor: f64,

    pub performance_base: f64,
    pub longevity_match_bonus: f64,
    pub sillage_match_bonus: f64,

    pub uniqueness_default: f64,
    pub unique_premium: f64,
    pub unique_standard: f64,
    pub unique_premium_price_floor: f64,
    pub safe_bet: f64,
    pub safe_bet_price_ceiling: f64,

    /// Sub-scores above this produce a match reason.
    pub reason_threshold: f64,
    pub value_price_ceiling: f64,
    pub confidence_lift: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        super::DEFAULT_SCORING
    }
}

impl ScoringConfig {
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights, ..super::DEFAULT_SCORING }
    }
}

/// Scent family flag and the aroma tag names that satisfy it.
type FamilyRule = (fn(&QuizPreferences) -> bool, &'static [&'static str]);

const FAMILY_RULES: &[FamilyRule] = &[
    (|p| p.light_fresh, &["citrus", "fresh", "aquatic"]),
    (|p| p.warm_spicy, &["spicy", "warm", "oriental"]),
    (|p| p.sweet_gourmand, &["sweet", "vanilla", "gourmand"]),
    (|p| p.woody_earthy, &["woody", "earthy", "cedar"]),
    (|p| p.floral_romantic, &["floral", "rose", "jasmine"]),
    (|p| p.citrus_energizing, &["citrus", "bergamot", "lemon"]),
];

fn season_keywords(season: Season) -> &'static [&'static str] {
    match season {
        Season::Spring => &["fresh", "floral"],
        Season::Summer => &["light", "citrus", "aquatic"],
        Season::Fall => &["warm", "spicy", "woody"],
        Season::Winter => &["rich", "deep", "oriental"],
        Season::Unspecified => &[],
    }
}

struct OccasionRule {
    applies: fn(&Perfume, &ScoringConfig) -> bool,
    bonus: fn(&ScoringConfig) -> f64,
}

const WORK_RULES: &[OccasionRule] = &[
    OccasionRule {
        applies: |perfume, _| matches!(perfume.sillage, Sillage::Light | Sillage::Medium),
        bonus: |config| config.occasion_bonus,
    },
    OccasionRule {
        applies: |perfume, _| {
            perfume.brand_mentions_any(&["professional"])
                || perfume.description_mentions_any(&["clean"])
        },
        bonus: |config| config.professional_bonus,
    },
];

const DATE_RULES: &[OccasionRule] = &[OccasionRule {
    applies: |perfume, _| perfume.description_mentions_any(&["romantic", "seductive"]),
    bonus: |config| config.occasion_bonus,
}];

const CASUAL_RULES: &[OccasionRule] = &[OccasionRule {
    applies: |perfume, config| {
        perfume.price < config.casual_price_ceiling && perfume.sillage == Sillage::Light
    },
    bonus: |config| config.occasion_bonus,
}];

const SPECIAL_RULES: &[OccasionRule] = &[OccasionRule {
    applies: |perfume, config| {
        perfume.price > config.special_price_floor || perfume.sillage == Sillage::Heavy
    },
    bonus: |config| config.occasion_bonus,
}];

fn occasion_rules(situation: Situation) -> &'static [OccasionRule] {
    match situation {
        Situation::Work => WORK_RULES,
        Situation::Date => DATE_RULES,
        Situation::Casual => CASUAL_RULES,
        Situation::Special => SPECIAL_RULES,
        Situation::Unspecified => &[],
    }
}

fn longevity_matches(preference: LongevityPreference, longevity: &Longevity) -> bool {
    match preference {
        LongevityPreference::Light => *longevity == Longevity::Light,
        LongevityPreference::Medium => *longevity == Longevity::Medium,
        LongevityPreference::Long => longevity.is_long_lasting(),
        LongevityPreference::Unspecified => false,
    }
}

fn sillage_matches(preference: SillagePreference, sillage: &Sillage) -> bool {
    match preference {
        SillagePreference::Subtle => *sillage == Sillage::Light,
        SillagePreference::Moderate => *sillage == Sillage::Medium,
        SillagePreference::Heavy => matches!(sillage, Sillage::Heavy | Sillage::VeryHeavy),
        SillagePreference::Unspecified => false,
    }
}

/// Score calculator for quiz-driven recommendations
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights and bonuses
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one perfume. The returned rank is 0 until the ranker assigns positions.
    pub fn score(
        &self,
        perfume: &Perfume,
        request: &AdvancedRecommendationRequest,
        _personality: &PersonalityAnalysis,
    ) -> AdvancedRecommendationResult {
        let preferences = &request.quiz_preferences;
        let scores = ComponentScores {
            profile_match: self.profile_match(perfume, preferences),
            season_match: self.season_match(perfume, request.season),
            occasion_match: self.occasion_match(perfume, request.current_situation),
            performance_match: self.performance_match(perfume, preferences),
            uniqueness_bonus: self.uniqueness_bonus(perfume, preferences),
        };
        let overall_score = self.calculate_total_score(&scores);

        AdvancedRecommendationResult {
            perfume: perfume.clone(),
            overall_score,
            scores,
            match_reasons: self.generate_reasoning(perfume, &scores, request.season),
            best_for: best_for(preferences),
            wear_timing: wear_timing(perfume, preferences),
            longevity: perfume.longevity.clone(),
            projection: perfume.sillage.clone(),
            confidence: (overall_score + self.config.confidence_lift).min(1.0),
            rank: 0,
        }
    }

    /// Weighted sum of component scores
    pub fn calculate_total_score(&self, scores: &ComponentScores) -> f64 {
        let weights = &self.config.weights;
        let total = scores.profile_match * weights.profile
            + scores.season_match * weights.season
            + scores.occasion_match * weights.occasion
            + scores.performance_match * weights.performance
            + scores.uniqueness_bonus * weights.uniqueness;

        total.min(1.0)
    }

    /// Base plus one bonus per scent family whose aroma names the perfume carries
    pub fn profile_match(&self, perfume: &Perfume, preferences: &QuizPreferences) -> f64 {
        let aromas = perfume.aroma_names();
        let score = FAMILY_RULES
            .iter()
            .filter(|(wanted, _)| wanted(preferences))
            .filter(|(_, names)| names.iter().any(|name| aromas.contains(*name)))
            .fold(self.config.profile_base, |score, _| score + self.config.profile_family_bonus);

        score.min(1.0)
    }

    pub fn season_match(&self, perfume: &Perfume, season: Season) -> f64 {
        let keywords = season_keywords(season);
        let bonus = if !keywords.is_empty() && perfume.description_mentions_any(keywords) {
            self.config.season_keyword_bonus
        } else {
            0.0
        };

        (self.config.season_base + bonus).min(1.0)
    }

    pub fn occasion_match(&self, perfume: &Perfume, situation: Situation) -> f64 {
        let score = occasion_rules(situation)
            .iter()
            .filter(|rule| (rule.applies)(perfume, &self.config))
            .fold(self.config.occasion_base, |score, rule| score + (rule.bonus)(&self.config));

        score.min(1.0)
    }

    pub fn performance_match(&self, perfume: &Perfume, preferences: &QuizPreferences) -> f64 {
        let checks = [
            (
                longevity_matches(preferences.longevity, &perfume.longevity),
                self.config.longevity_match_bonus,
            ),
            (
                sillage_matches(preferences.sillage, &perfume.sillage),
                self.config.sillage_match_bonus,
            ),
        ];
        let score = checks
            .iter()
            .filter(|(matched, _)| *matched)
            .fold(self.config.performance_base, |score, (_, bonus)| score + bonus);

        score.min(1.0)
    }

    /// Replaces rather than adds to a base value
    pub fn uniqueness_bonus(&self, perfume: &Perfume, preferences: &QuizPreferences) -> f64 {
        let config = &self.config;
        if preferences.unique {
            if perfume.price > config.unique_premium_price_floor {
                config.unique_premium
            } else {
                config.unique_standard
            }
        } else if preferences.safe_bet && perfume.price < config.safe_bet_price_ceiling {
            config.safe_bet
        } else {
            config.uniqueness_default
        }
    }

    /// Generate human-readable match reasons
    pub fn generate_reasoning(
        &self,
        perfume: &Perfume,
        scores: &ComponentScores,
        season: Season,
    ) -> Vec<String> {
        let threshold = self.config.reason_threshold;
        let mut reasons = Vec::new();

        if scores.profile_match > threshold {
            reasons.push("Perfect match for your scent preferences".to_string());
        }
        if scores.season_match > threshold {
            let season = if season.is_known() { season.as_str() } else { "current season" };
            reasons.push(format!("Ideal for {season} weather"));
        }
        if scores.occasion_match > threshold {
            reasons.push("Perfect for your intended occasion".to_string());
        }
        if perfume.price < self.config.value_price_ceiling {
            reasons.push("Great value for your budget".to_string());
        }
        if perfume.longevity.is_long_lasting() {
            reasons.push("Long-lasting fragrance".to_string());
        }

        if reasons.is_empty() {
            reasons.push("Interesting option worth exploring".to_string());
        }

        reasons
    }
}

fn best_for(preferences: &QuizPreferences) -> Vec<String> {
    let occasions = [
        (preferences.work, "Office Wear"),
        (preferences.dates, "Date Nights"),
        (preferences.special_events, "Special Events"),
        (preferences.daily_wear, "Daily Wear"),
    ];
    let mut labels: Vec<String> =
        occasions.iter().filter(|(set, _)| *set).map(|(_, label)| (*label).to_string()).collect();

    if labels.is_empty() {
        labels.push("Versatile Wear".to_string());
    }
    labels
}

fn wear_timing(perfume: &Perfume, preferences: &QuizPreferences) -> Vec<String> {
    let hints = [
        (preferences.longevity == LongevityPreference::Light, "Reapply during the day"),
        (preferences.longevity == LongevityPreference::Long, "Lasts all day"),
        (perfume.sillage == Sillage::Heavy, "Apply sparingly"),
    ];
    let mut timing: Vec<String> =
        hints.iter().filter(|(set, _)| *set).map(|(_, hint)| (*hint).to_string()).collect();

    if timing.is_empty() {
        timing.push("Apply to pulse points".to_string());
    }
    timing
}
