//! Candidate filtering, ranking and alternative selection

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::perfume::{Perfume, PerfumeId};

use super::types::AdvancedRecommendationResult;

/// Drops excluded perfumes, keeping catalog order for the rest.
pub fn filter_candidates(perfumes: Vec<Perfume>, exclude_ids: &[PerfumeId]) -> Vec<Perfume> {
    if exclude_ids.is_empty() {
        return perfumes;
    }
    let excluded: HashSet<PerfumeId> = exclude_ids.iter().copied().collect();
    perfumes.into_iter().filter(|perfume| !excluded.contains(&perfume.id)).collect()
}

/// Stable sort by overall score descending, truncated to `max_results`. Equal scores keep
/// their incoming order. Ranks are assigned from final positions, starting at 1.
pub fn rank(
    mut scored: Vec<AdvancedRecommendationResult>,
    max_results: usize,
) -> (Vec<AdvancedRecommendationResult>, Vec<AdvancedRecommendationResult>) {
    scored.sort_by(|a, b| b.overall_score.partial_cmp(&a.overall_score).unwrap_or(Ordering::Equal));

    let remainder = if scored.len() > max_results { scored.split_off(max_results) } else { Vec::new() };
    for (position, result) in scored.iter_mut().enumerate() {
        result.rank = position + 1;
    }

    (scored, remainder)
}

/// First `limit` candidates, in catalog order, that were not selected.
pub fn alternatives(
    candidates: &[Perfume],
    selected: &[AdvancedRecommendationResult],
    limit: usize,
) -> Vec<Perfume> {
    let chosen: HashSet<PerfumeId> = selected.iter().map(|result| result.perfume.id).collect();
    candidates
        .iter()
        .filter(|perfume| !chosen.contains(&perfume.id))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{alternatives, filter_candidates, rank};
    use crate::domain::perfume::{Longevity, Perfume, PerfumeId, Sillage};
    use crate::recommendation::types::{AdvancedRecommendationResult, ComponentScores};

    fn perfume(id: u64) -> Perfume {
        Perfume {
            id: PerfumeId(id),
            name: format!("Perfume {id}"),
            brand: "House".to_string(),
            concentration: String::new(),
            category: String::new(),
            target_audience: String::new(),
            description: String::new(),
            price: 80.0,
            longevity: Longevity::Medium,
            sillage: Sillage::Medium,
            image_url: String::new(),
            aroma_tags: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn scored(id: u64, overall_score: f64) -> AdvancedRecommendationResult {
        AdvancedRecommendationResult {
            perfume: perfume(id),
            overall_score,
            scores: ComponentScores::default(),
            match_reasons: Vec::new(),
            best_for: Vec::new(),
            wear_timing: Vec::new(),
            longevity: Longevity::Medium,
            projection: Sillage::Medium,
            confidence: (overall_score + 0.1).min(1.0),
            rank: 0,
        }
    }

    fn ids(results: &[AdvancedRecommendationResult]) -> Vec<u64> {
        results.iter().map(|result| result.perfume.id.0).collect()
    }

    #[test]
    fn exclusions_preserve_catalog_order() {
        let candidates =
            filter_candidates((1..=5).map(perfume).collect(), &[PerfumeId(2), PerfumeId(4)]);
        let remaining: Vec<u64> = candidates.iter().map(|p| p.id.0).collect();

        assert_eq!(remaining, vec![1, 3, 5]);
    }

    #[test]
    fn equal_scores_keep_incoming_order() {
        let (selected, _) =
            rank(vec![scored(1, 0.65), scored(2, 0.8), scored(3, 0.65), scored(4, 0.65)], 6);

        assert_eq!(ids(&selected), vec![2, 1, 3, 4]);
        assert_eq!(selected.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn truncates_and_returns_remainder() {
        let input = (1..=10).map(|id| scored(id, id as f64 / 10.0)).collect();
        let (selected, remainder) = rank(input, 6);

        assert_eq!(ids(&selected), vec![10, 9, 8, 7, 6, 5]);
        assert_eq!(ids(&remainder), vec![4, 3, 2, 1]);
    }

    #[test]
    fn alternatives_come_from_unselected_candidates_in_catalog_order() {
        let candidates: Vec<Perfume> = (1..=10).map(perfume).collect();
        let selected: Vec<AdvancedRecommendationResult> =
            [2, 3, 5, 6, 8, 9].iter().map(|id| scored(*id, 0.9)).collect();

        let picked: Vec<u64> =
            alternatives(&candidates, &selected, 3).iter().map(|p| p.id.0).collect();

        assert_eq!(picked, vec![1, 4, 7]);
    }
}
