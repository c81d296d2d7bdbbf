use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::perfume::PerfumeId;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub u64);

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LongevityRating {
    VeryPoor,
    Poor,
    Average,
    Good,
    Excellent,
}

impl LongevityRating {
    pub const ALL: [LongevityRating; 5] = [
        LongevityRating::VeryPoor,
        LongevityRating::Poor,
        LongevityRating::Average,
        LongevityRating::Good,
        LongevityRating::Excellent,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SillageRating {
    VeryLight,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl SillageRating {
    pub const ALL: [SillageRating; 5] = [
        SillageRating::VeryLight,
        SillageRating::Light,
        SillageRating::Moderate,
        SillageRating::Heavy,
        SillageRating::VeryHeavy,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewOccasion {
    Daily,
    Work,
    Casual,
    DateNight,
    Formal,
    Party,
    SpecialOccasion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewSeason {
    Spring,
    Summer,
    Fall,
    Winter,
    AllSeason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportReason {
    InappropriateContent,
    Spam,
    FakeReview,
    OffTopic,
    HarmfulContent,
    Other,
}

impl std::str::FromStr for ReportReason {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "inappropriate-content" => Ok(Self::InappropriateContent),
            "spam" => Ok(Self::Spam),
            "fake-review" => Ok(Self::FakeReview),
            "off-topic" => Ok(Self::OffTopic),
            "harmful-content" => Ok(Self::HarmfulContent),
            "other" => Ok(Self::Other),
            other => Err(DomainError::validation("reason", format!("invalid report reason: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub perfume_id: PerfumeId,
    pub user_name: String,
    pub overall_rating: u8,
    pub longevity_rating: LongevityRating,
    pub sillage_rating: SillageRating,
    pub value_rating: u8,
    pub title: String,
    pub comment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub occasions: Vec<ReviewOccasion>,
    pub seasons: Vec<ReviewSeason>,
    pub would_repurchase: bool,
    pub is_verified_purchase: bool,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Review payload as submitted by a shopper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub perfume_id: PerfumeId,
    pub user_name: String,
    pub overall_rating: u8,
    pub longevity_rating: LongevityRating,
    pub sillage_rating: SillageRating,
    pub value_rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<ReviewOccasion>,
    #[serde(default)]
    pub seasons: Vec<ReviewSeason>,
    #[serde(default)]
    pub would_repurchase: bool,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let length = value.trim().chars().count();
    if length < min || length > max {
        return Err(DomainError::validation(
            field,
            format!("must be between {min} and {max} characters, got {length}"),
        ));
    }
    Ok(())
}

fn check_rating(field: &'static str, value: u8) -> Result<(), DomainError> {
    if !(1..=5).contains(&value) {
        return Err(DomainError::validation(field, format!("must be within 1..=5, got {value}")));
    }
    Ok(())
}

impl NewReview {
    pub fn validate(&self) -> Result<(), DomainError> {
        check_length("user_name", &self.user_name, 2, 100)?;
        check_rating("overall_rating", self.overall_rating)?;
        check_rating("value_rating", self.value_rating)?;
        check_length("title", &self.title, 3, 200)?;
        check_length("comment", &self.comment, 10, 1000)?;
        for pro in &self.pros {
            check_length("pros", pro, 1, 50)?;
        }
        for con in &self.cons {
            check_length("cons", con, 1, 50)?;
        }
        Ok(())
    }

    pub fn into_review(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            perfume_id: self.perfume_id,
            user_name: self.user_name,
            overall_rating: self.overall_rating,
            longevity_rating: self.longevity_rating,
            sillage_rating: self.sillage_rating,
            value_rating: self.value_rating,
            title: self.title,
            comment: self.comment,
            pros: self.pros,
            cons: self.cons,
            occasions: self.occasions,
            seasons: self.seasons,
            would_repurchase: self.would_repurchase,
            is_verified_purchase: false,
            helpful_count: 0,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReport {
    pub review_id: ReviewId,
    pub reason: ReportReason,
    pub description: String,
    pub user_identifier: String,
    pub created_at: DateTime<Utc>,
}
