//! Aroma tag overlap matching

use std::cmp::Ordering;

use crate::domain::perfume::Perfume;

use super::types::{TagMatch, TagMatchResponse};

pub const TAG_MATCH_BASE: f64 = 0.5;
pub const TAG_MATCH_BONUS: f64 = 0.3;
pub const TAG_MATCH_LIMIT: usize = 6;
pub const TAG_MATCH_EXPLANATION: &str =
    "Based on your aroma preferences, we found these matching fragrances.";

/// Scores every perfume by how many requested aroma slugs it carries and keeps the best six.
/// Perfumes with no overlap still receive the base score. Every requested occurrence of a
/// slug counts, so a repeated slug adds its bonus again.
pub fn match_aromas(perfumes: &[Perfume], aroma_slugs: &[String]) -> TagMatchResponse {
    let mut results: Vec<TagMatch> = perfumes
        .iter()
        .map(|perfume| {
            let overlap: usize = perfume
                .aroma_tags
                .iter()
                .map(|tag| aroma_slugs.iter().filter(|slug| **slug == tag.slug).count())
                .sum();
            TagMatch {
                perfume: perfume.clone(),
                score: TAG_MATCH_BASE + TAG_MATCH_BONUS * overlap as f64,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    results.truncate(TAG_MATCH_LIMIT);

    TagMatchResponse { results, explanation: TAG_MATCH_EXPLANATION.to_owned() }
}
