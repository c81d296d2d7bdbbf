use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

lenient_category! {
    LongevityPreference {
        Light => "light",
        Medium => "medium",
        Long => "long",
    } else Unspecified => ""
}

lenient_category! {
    SillagePreference {
        Subtle => "subtle",
        Moderate => "moderate",
        Heavy => "heavy",
    } else Unspecified => ""
}

lenient_category! {
    ProjectionPreference {
        Close => "close",
        Moderate => "moderate",
        Far => "far",
    } else Unspecified => ""
}

lenient_category! {
    PriceRange {
        Budget => "budget",
        Mid => "mid",
        Luxury => "luxury",
        Designer => "designer",
    } else Unspecified => ""
}

/// Answers collected by the fragrance personality quiz.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPreferences {
    pub daily_wear: bool,
    pub special_events: bool,
    pub night_out: bool,
    pub work: bool,
    pub dates: bool,

    pub spring: bool,
    pub summer: bool,
    pub fall: bool,
    pub winter: bool,
    pub year_round: bool,

    pub light_fresh: bool,
    pub warm_spicy: bool,
    pub sweet_gourmand: bool,
    pub woody_earthy: bool,
    pub floral_romantic: bool,
    pub citrus_energizing: bool,

    pub longevity: LongevityPreference,
    pub sillage: SillagePreference,
    pub projection: ProjectionPreference,

    pub classic: bool,
    pub modern: bool,
    pub unique: bool,
    pub safe_bet: bool,

    pub price_range: PriceRange,
}

impl QuizPreferences {
    /// Scent-family flags keyed by their wire names, in quiz order.
    pub fn scent_families(&self) -> [(&'static str, bool); 6] {
        [
            ("light_fresh", self.light_fresh),
            ("warm_spicy", self.warm_spicy),
            ("sweet_gourmand", self.sweet_gourmand),
            ("woody_earthy", self.woody_earthy),
            ("floral_romantic", self.floral_romantic),
            ("citrus_energizing", self.citrus_energizing),
        ]
    }

    pub fn seasons(&self) -> [(&'static str, bool); 5] {
        [
            ("spring", self.spring),
            ("summer", self.summer),
            ("fall", self.fall),
            ("winter", self.winter),
            ("year_round", self.year_round),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizResponseId(pub u64);

/// A submitted quiz, kept for aggregate statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: QuizResponseId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    /// active, relaxed, professional, creative
    #[serde(default)]
    pub lifestyle: String,
    pub preferences: QuizPreferences,
    pub created_at: DateTime<Utc>,
}

/// Quiz payload as submitted, before an id and timestamp are assigned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmission {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub lifestyle: String,
    #[serde(default)]
    pub preferences: QuizPreferences,
}

impl QuizSubmission {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "quiz submissions require a name"));
        }
        Ok(())
    }

    pub fn into_response(self, id: QuizResponseId, created_at: DateTime<Utc>) -> QuizResponse {
        QuizResponse {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            gender: self.gender,
            lifestyle: self.lifestyle,
            preferences: self.preferences,
            created_at,
        }
    }
}
