//! Review listing and per-perfume statistics

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::perfume::PerfumeId;
use crate::domain::review::{
    LongevityRating, Review, ReviewOccasion, ReviewSeason, SillageRating,
};

pub const DEFAULT_REVIEW_LIMIT: usize = 50;
pub const MAX_REVIEW_LIMIT: usize = 100;
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewSort {
    #[default]
    MostRecent,
    MostHelpful,
    HighestRating,
    LowestRating,
}

/// Listing filters for one perfume's reviews. `None` leaves a dimension unfiltered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewQuery {
    pub rating: Option<u8>,
    pub longevity: Option<LongevityRating>,
    pub sillage: Option<SillageRating>,
    pub would_repurchase: Option<bool>,
    pub verified_purchase: Option<bool>,
    /// Case-insensitive substring over title, comment and reviewer name.
    pub search_term: Option<String>,
    pub sort_by: ReviewSort,
    /// Zero selects the default; values above the maximum are capped.
    pub limit: usize,
    pub offset: usize,
}

impl ReviewQuery {
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            0 => DEFAULT_REVIEW_LIMIT,
            limit => limit.min(MAX_REVIEW_LIMIT),
        }
    }

    fn matches(&self, review: &Review) -> bool {
        let needle = self.search_term.as_deref().filter(|t| !t.is_empty()).map(str::to_lowercase);

        self.rating.map_or(true, |rating| review.overall_rating == rating)
            && self.longevity.map_or(true, |rating| review.longevity_rating == rating)
            && self.sillage.map_or(true, |rating| review.sillage_rating == rating)
            && self.would_repurchase.map_or(true, |flag| review.would_repurchase == flag)
            && self.verified_purchase.map_or(true, |flag| review.is_verified_purchase == flag)
            && needle.map_or(true, |needle| {
                [&review.title, &review.comment, &review.user_name]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
    }

    /// Filter, sort and page a set of reviews belonging to one perfume.
    pub fn apply(&self, reviews: &[Review]) -> Vec<Review> {
        let mut selected: Vec<Review> =
            reviews.iter().filter(|review| self.matches(review)).cloned().collect();

        // Newest first breaks ties for every ordering.
        selected.sort_by(|a, b| {
            let primary = match self.sort_by {
                ReviewSort::MostRecent => std::cmp::Ordering::Equal,
                ReviewSort::MostHelpful => b.helpful_count.cmp(&a.helpful_count),
                ReviewSort::HighestRating => b.overall_rating.cmp(&a.overall_rating),
                ReviewSort::LowestRating => a.overall_rating.cmp(&b.overall_rating),
            };
            primary.then_with(|| b.created_at.cmp(&a.created_at))
        });

        selected.into_iter().skip(self.offset).take(self.effective_limit()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularUsage<T> {
    pub label: T,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub perfume_id: PerfumeId,
    pub total_reviews: u32,
    pub average_overall_rating: f64,
    /// Most common longevity rating; `None` without reviews.
    pub average_longevity_rating: Option<LongevityRating>,
    pub average_sillage_rating: Option<SillageRating>,
    pub average_value_rating: f64,
    pub rating_distribution: BTreeMap<u8, u32>,
    pub longevity_distribution: BTreeMap<LongevityRating, u32>,
    pub sillage_distribution: BTreeMap<SillageRating, u32>,
    pub popular_occasions: Vec<PopularUsage<ReviewOccasion>>,
    pub popular_seasons: Vec<PopularUsage<ReviewSeason>>,
    pub would_repurchase_percentage: f64,
    pub verified_purchase_percentage: f64,
    pub helpful_votes_per_review: f64,
    pub recent_reviews_count: u32,
    pub engagement_score: f64,
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

/// Highest count wins; on ties the earliest key in vocabulary order.
fn most_common<K: Copy + Ord>(distribution: &BTreeMap<K, u32>) -> Option<K> {
    distribution
        .iter()
        .filter(|(_, count)| **count > 0)
        .fold(None, |best: Option<(K, u32)>, (key, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((*key, *count)),
        })
        .map(|(key, _)| key)
}

fn popular<K: Copy + Ord>(counts: BTreeMap<K, u32>) -> Vec<PopularUsage<K>> {
    let mut usage: Vec<PopularUsage<K>> =
        counts.into_iter().map(|(label, count)| PopularUsage { label, count }).collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage
}

impl ReviewStats {
    pub fn compute(perfume_id: PerfumeId, reviews: &[Review], now: DateTime<Utc>) -> Self {
        let reviews: Vec<&Review> =
            reviews.iter().filter(|review| review.perfume_id == perfume_id).collect();
        let total = reviews.len();

        let mut rating_distribution: BTreeMap<u8, u32> = (1..=5).map(|r| (r, 0)).collect();
        let mut longevity_distribution: BTreeMap<LongevityRating, u32> =
            LongevityRating::ALL.iter().map(|r| (*r, 0)).collect();
        let mut sillage_distribution: BTreeMap<SillageRating, u32> =
            SillageRating::ALL.iter().map(|r| (*r, 0)).collect();
        let mut occasions: BTreeMap<ReviewOccasion, u32> = BTreeMap::new();
        let mut seasons: BTreeMap<ReviewSeason, u32> = BTreeMap::new();

        for review in &reviews {
            *rating_distribution.entry(review.overall_rating).or_insert(0) += 1;
            *longevity_distribution.entry(review.longevity_rating).or_insert(0) += 1;
            *sillage_distribution.entry(review.sillage_rating).or_insert(0) += 1;
            for occasion in &review.occasions {
                *occasions.entry(*occasion).or_insert(0) += 1;
            }
            for season in &review.seasons {
                *seasons.entry(*season).or_insert(0) += 1;
            }
        }

        let percentage = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };
        let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

        let average_overall_rating =
            mean(reviews.iter().map(|r| f64::from(r.overall_rating)), total);
        let helpful_votes_per_review =
            mean(reviews.iter().map(|r| f64::from(r.helpful_count)), total);
        let average_comment_length =
            mean(reviews.iter().map(|r| r.comment.chars().count() as f64), total);

        Self {
            perfume_id,
            total_reviews: total as u32,
            average_overall_rating,
            average_longevity_rating: most_common(&longevity_distribution),
            average_sillage_rating: most_common(&sillage_distribution),
            average_value_rating: mean(reviews.iter().map(|r| f64::from(r.value_rating)), total),
            popular_occasions: popular(occasions),
            popular_seasons: popular(seasons),
            would_repurchase_percentage: percentage(
                reviews.iter().filter(|r| r.would_repurchase).count(),
            ),
            verified_purchase_percentage: percentage(
                reviews.iter().filter(|r| r.is_verified_purchase).count(),
            ),
            helpful_votes_per_review,
            recent_reviews_count: reviews.iter().filter(|r| r.created_at >= recent_cutoff).count()
                as u32,
            engagement_score: (average_overall_rating
                + helpful_votes_per_review
                + average_comment_length / 100.0)
                / 3.0,
            rating_distribution,
            longevity_distribution,
            sillage_distribution,
        }
    }
}
