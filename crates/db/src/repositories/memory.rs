use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use aromatica_core::catalog::{CatalogError, CatalogSource};
use aromatica_core::domain::perfume::{AromaTag, AromaTagId, Perfume, PerfumeId};
use aromatica_core::domain::quiz::{QuizResponse, QuizResponseId, QuizSubmission};
use aromatica_core::domain::review::{NewReview, ReportReason, Review, ReviewId, ReviewReport};
use aromatica_core::errors::DomainError;
use aromatica_core::quiz_stats::QuizStatistics;
use aromatica_core::reviews::{ReviewQuery, ReviewStats};

use super::{
    AromaRepository, PerfumeRepository, QuizResponseRepository, RepositoryError, ReviewRepository,
};

#[derive(Default)]
pub struct InMemoryPerfumeRepository {
    perfumes: RwLock<BTreeMap<PerfumeId, Perfume>>,
}

impl InMemoryPerfumeRepository {
    /// Seed from a snapshot; later entries replace earlier ones with the same id.
    pub fn from_perfumes(perfumes: impl IntoIterator<Item = Perfume>) -> Self {
        let perfumes = perfumes.into_iter().map(|perfume| (perfume.id, perfume)).collect();
        Self { perfumes: RwLock::new(perfumes) }
    }
}

#[async_trait]
impl PerfumeRepository for InMemoryPerfumeRepository {
    async fn create(&self, perfume: Perfume) -> Result<Perfume, RepositoryError> {
        perfume.validate()?;
        let mut perfumes = self.perfumes.write().await;
        if perfumes.contains_key(&perfume.id) {
            return Err(DomainError::Conflict {
                entity: "perfume",
                key: "id",
                value: perfume.id.to_string(),
            }
            .into());
        }
        perfumes.insert(perfume.id, perfume.clone());
        Ok(perfume)
    }

    async fn find_by_id(&self, id: PerfumeId) -> Result<Option<Perfume>, RepositoryError> {
        let perfumes = self.perfumes.read().await;
        Ok(perfumes.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Perfume>, RepositoryError> {
        let perfumes = self.perfumes.read().await;
        Ok(perfumes.values().cloned().collect())
    }

    async fn update(&self, perfume: Perfume) -> Result<Perfume, RepositoryError> {
        perfume.validate()?;
        let mut perfumes = self.perfumes.write().await;
        let slot = perfumes
            .get_mut(&perfume.id)
            .ok_or_else(|| DomainError::not_found("perfume", perfume.id))?;
        *slot = perfume.clone();
        Ok(perfume)
    }

    async fn delete(&self, id: PerfumeId) -> Result<(), RepositoryError> {
        let mut perfumes = self.perfumes.write().await;
        perfumes.remove(&id).map(|_| ()).ok_or_else(|| DomainError::not_found("perfume", id).into())
    }
}

#[async_trait]
impl CatalogSource for InMemoryPerfumeRepository {
    async fn fetch_catalog(&self) -> Result<Vec<Perfume>, CatalogError> {
        let perfumes = self.perfumes.read().await;
        Ok(perfumes.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryAromaRepository {
    tags: RwLock<HashMap<AromaTagId, AromaTag>>,
}

fn slug_conflict(slug: &str) -> RepositoryError {
    DomainError::Conflict { entity: "aroma tag", key: "slug", value: slug.to_string() }.into()
}

#[async_trait]
impl AromaRepository for InMemoryAromaRepository {
    async fn create(&self, tag: AromaTag) -> Result<AromaTag, RepositoryError> {
        tag.validate()?;
        let mut tags = self.tags.write().await;
        if tags.contains_key(&tag.id) {
            return Err(DomainError::Conflict {
                entity: "aroma tag",
                key: "id",
                value: tag.id.0.to_string(),
            }
            .into());
        }
        if tags.values().any(|existing| existing.slug == tag.slug) {
            return Err(slug_conflict(&tag.slug));
        }
        tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_id(&self, id: AromaTagId) -> Result<Option<AromaTag>, RepositoryError> {
        let tags = self.tags.read().await;
        Ok(tags.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<AromaTag>, RepositoryError> {
        let tags = self.tags.read().await;
        Ok(tags.values().find(|tag| tag.slug == slug).cloned())
    }

    async fn find_by_slugs(&self, slugs: &[String]) -> Result<Vec<AromaTag>, RepositoryError> {
        let tags = self.tags.read().await;
        let mut found: Vec<AromaTag> =
            tags.values().filter(|tag| slugs.contains(&tag.slug)).cloned().collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn list(&self) -> Result<Vec<AromaTag>, RepositoryError> {
        let tags = self.tags.read().await;
        let mut listed: Vec<AromaTag> = tags.values().cloned().collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn update(&self, tag: AromaTag) -> Result<AromaTag, RepositoryError> {
        tag.validate()?;
        let mut tags = self.tags.write().await;
        if !tags.contains_key(&tag.id) {
            return Err(DomainError::not_found("aroma tag", tag.id.0).into());
        }
        if tags.values().any(|existing| existing.slug == tag.slug && existing.id != tag.id) {
            return Err(slug_conflict(&tag.slug));
        }
        tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn delete(&self, id: AromaTagId) -> Result<(), RepositoryError> {
        let mut tags = self.tags.write().await;
        tags.remove(&id).map(|_| ()).ok_or_else(|| DomainError::not_found("aroma tag", id.0).into())
    }
}

#[derive(Default)]
struct ReviewState {
    reviews: HashMap<ReviewId, Review>,
    helpful_votes: HashSet<(ReviewId, String)>,
    reports: Vec<ReviewReport>,
    last_id: u64,
}

#[derive(Default)]
pub struct InMemoryReviewRepository {
    state: RwLock<ReviewState>,
}

impl InMemoryReviewRepository {
    pub async fn reports(&self) -> Vec<ReviewReport> {
        self.state.read().await.reports.clone()
    }

    async fn for_perfume(&self, perfume_id: PerfumeId) -> Vec<Review> {
        let state = self.state.read().await;
        state.reviews.values().filter(|review| review.perfume_id == perfume_id).cloned().collect()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review, RepositoryError> {
        review.validate()?;
        let mut state = self.state.write().await;
        state.last_id += 1;
        let review = review.into_review(ReviewId(state.last_id), Utc::now());
        state.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.reviews.get(&id).cloned())
    }

    async fn list_for_perfume(
        &self,
        perfume_id: PerfumeId,
        query: &ReviewQuery,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = self.for_perfume(perfume_id).await;
        Ok(query.apply(&reviews))
    }

    async fn stats(&self, perfume_id: PerfumeId) -> Result<ReviewStats, RepositoryError> {
        let reviews = self.for_perfume(perfume_id).await;
        Ok(ReviewStats::compute(perfume_id, &reviews, Utc::now()))
    }

    async fn mark_helpful(
        &self,
        id: ReviewId,
        user_identifier: &str,
    ) -> Result<u32, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.reviews.contains_key(&id) {
            return Err(DomainError::not_found("review", id).into());
        }
        if !state.helpful_votes.insert((id, user_identifier.to_string())) {
            return Err(DomainError::Conflict {
                entity: "helpful vote",
                key: "user",
                value: user_identifier.to_string(),
            }
            .into());
        }

        let review = state.reviews.get_mut(&id).ok_or_else(|| DomainError::not_found("review", id))?;
        review.helpful_count += 1;
        Ok(review.helpful_count)
    }

    async fn report(
        &self,
        id: ReviewId,
        reason: ReportReason,
        description: &str,
        user_identifier: &str,
    ) -> Result<ReviewReport, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.reviews.contains_key(&id) {
            return Err(DomainError::not_found("review", id).into());
        }

        let report = ReviewReport {
            review_id: id,
            reason,
            description: description.trim().to_string(),
            user_identifier: user_identifier.to_string(),
            created_at: Utc::now(),
        };
        state.reports.push(report.clone());
        Ok(report)
    }
}

#[derive(Default)]
pub struct InMemoryQuizResponseRepository {
    responses: RwLock<Vec<QuizResponse>>,
}

#[async_trait]
impl QuizResponseRepository for InMemoryQuizResponseRepository {
    async fn save(&self, submission: QuizSubmission) -> Result<QuizResponse, RepositoryError> {
        submission.validate()?;
        let mut responses = self.responses.write().await;
        let id = QuizResponseId(responses.len() as u64 + 1);
        let response = submission.into_response(id, Utc::now());
        responses.push(response.clone());
        Ok(response)
    }

    async fn list(&self) -> Result<Vec<QuizResponse>, RepositoryError> {
        let responses = self.responses.read().await;
        Ok(responses.clone())
    }

    async fn statistics(&self) -> Result<QuizStatistics, RepositoryError> {
        let responses = self.responses.read().await;
        Ok(QuizStatistics::compute(&responses))
    }
}

#[cfg(test)]
mod tests {
    use aromatica_core::catalog::CatalogSource;
    use aromatica_core::domain::perfume::{
        AromaTag, AromaTagId, Longevity, Perfume, PerfumeId, Sillage,
    };
    use aromatica_core::domain::quiz::{QuizPreferences, QuizSubmission};
    use aromatica_core::domain::review::{
        LongevityRating, NewReview, ReportReason, ReviewId, SillageRating,
    };
    use aromatica_core::errors::DomainError;
    use aromatica_core::reviews::{ReviewQuery, ReviewSort};

    use crate::repositories::{
        AromaRepository, InMemoryAromaRepository, InMemoryPerfumeRepository,
        InMemoryQuizResponseRepository, InMemoryReviewRepository, PerfumeRepository,
        QuizResponseRepository, RepositoryError, ReviewRepository,
    };

    fn perfume(id: u64, name: &str) -> Perfume {
        Perfume {
            id: PerfumeId(id),
            name: name.to_string(),
            brand: "Maison Test".to_string(),
            concentration: "EDP".to_string(),
            category: "unisex".to_string(),
            target_audience: String::new(),
            description: "soft musk".to_string(),
            price: 80.0,
            longevity: Longevity::Long,
            sillage: Sillage::Medium,
            image_url: String::new(),
            aroma_tags: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn tag(id: u64, slug: &str) -> AromaTag {
        AromaTag { id: AromaTagId(id), slug: slug.to_string(), name: slug.to_uppercase() }
    }

    fn new_review(perfume_id: u64, user: &str, rating: u8) -> NewReview {
        NewReview {
            perfume_id: PerfumeId(perfume_id),
            user_name: user.to_string(),
            overall_rating: rating,
            longevity_rating: LongevityRating::Good,
            sillage_rating: SillageRating::Moderate,
            value_rating: 4,
            title: "Lovely scent".to_string(),
            comment: "Lasts all day and gets compliments.".to_string(),
            pros: vec!["longevity".to_string()],
            cons: Vec::new(),
            occasions: Vec::new(),
            seasons: Vec::new(),
            would_repurchase: true,
        }
    }

    fn is_conflict(result: &Result<impl std::fmt::Debug, RepositoryError>) -> bool {
        matches!(result, Err(RepositoryError::Domain(DomainError::Conflict { .. })))
    }

    #[tokio::test]
    async fn perfume_crud_round_trip() {
        let repo = InMemoryPerfumeRepository::default();
        repo.create(perfume(2, "Second")).await.expect("create second");
        repo.create(perfume(1, "First")).await.expect("create first");

        assert!(is_conflict(&repo.create(perfume(1, "Again")).await));

        let mut updated = perfume(1, "First Edition");
        updated.price = 95.0;
        repo.update(updated.clone()).await.expect("update first");
        assert_eq!(repo.find_by_id(PerfumeId(1)).await.expect("find"), Some(updated));

        let listed = repo.list().await.expect("list");
        assert_eq!(listed.iter().map(|p| p.id.0).collect::<Vec<_>>(), vec![1, 2]);

        repo.delete(PerfumeId(2)).await.expect("delete second");
        assert!(matches!(
            repo.delete(PerfumeId(2)).await,
            Err(RepositoryError::Domain(DomainError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn perfume_repository_serves_as_catalog() {
        let repo = InMemoryPerfumeRepository::from_perfumes(vec![perfume(3, "C"), perfume(1, "A")]);
        let catalog = repo.fetch_catalog().await.expect("catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].id, PerfumeId(1));
    }

    #[tokio::test]
    async fn invalid_perfume_is_rejected() {
        let repo = InMemoryPerfumeRepository::default();
        let mut invalid = perfume(1, "Broken");
        invalid.price = -1.0;
        assert!(matches!(
            repo.create(invalid).await,
            Err(RepositoryError::Domain(DomainError::Validation { field: "price", .. }))
        ));
    }

    #[tokio::test]
    async fn aroma_slugs_stay_unique() {
        let repo = InMemoryAromaRepository::default();
        repo.create(tag(1, "citrus")).await.expect("create citrus");
        repo.create(tag(2, "woody")).await.expect("create woody");

        assert!(is_conflict(&repo.create(tag(3, "citrus")).await));
        assert!(is_conflict(&repo.update(tag(2, "citrus")).await));

        repo.update(tag(1, "citrus")).await.expect("keeping own slug is allowed");

        let found = repo
            .find_by_slugs(&["woody".to_string(), "missing".to_string()])
            .await
            .expect("lookup");
        assert_eq!(found, vec![tag(2, "woody")]);
        assert_eq!(repo.find_by_slug("citrus").await.expect("slug"), Some(tag(1, "citrus")));

        repo.delete(AromaTagId(1)).await.expect("delete");
        assert_eq!(repo.list().await.expect("list"), vec![tag(2, "woody")]);
    }

    #[tokio::test]
    async fn reviews_list_and_stats_per_perfume() {
        let repo = InMemoryReviewRepository::default();
        repo.create(new_review(1, "Ana", 5)).await.expect("first review");
        repo.create(new_review(1, "Ben", 3)).await.expect("second review");
        repo.create(new_review(2, "Cy", 1)).await.expect("other perfume");

        let query = ReviewQuery { sort_by: ReviewSort::HighestRating, ..ReviewQuery::default() };
        let listed = repo.list_for_perfume(PerfumeId(1), &query).await.expect("list");
        assert_eq!(listed.iter().map(|r| r.overall_rating).collect::<Vec<_>>(), vec![5, 3]);

        let stats = repo.stats(PerfumeId(1)).await.expect("stats");
        assert_eq!(stats.total_reviews, 2);
        assert_eq!(stats.average_overall_rating, 4.0);
        assert_eq!(stats.average_longevity_rating, Some(LongevityRating::Good));
    }

    #[tokio::test]
    async fn invalid_review_is_rejected() {
        let repo = InMemoryReviewRepository::default();
        let result = repo.create(new_review(1, "Ana", 6)).await;
        assert!(matches!(
            result,
            Err(RepositoryError::Domain(DomainError::Validation { field: "overall_rating", .. }))
        ));
    }

    #[tokio::test]
    async fn helpful_vote_counts_once_per_user() {
        let repo = InMemoryReviewRepository::default();
        let review = repo.create(new_review(1, "Ana", 4)).await.expect("review");

        assert_eq!(repo.mark_helpful(review.id, "user-1").await.expect("vote"), 1);
        assert_eq!(repo.mark_helpful(review.id, "user-2").await.expect("vote"), 2);
        assert!(is_conflict(&repo.mark_helpful(review.id, "user-1").await));

        let stored = repo.find_by_id(review.id).await.expect("find").expect("present");
        assert_eq!(stored.helpful_count, 2);
    }

    #[tokio::test]
    async fn reports_require_existing_review() {
        let repo = InMemoryReviewRepository::default();
        let review = repo.create(new_review(1, "Ana", 4)).await.expect("review");

        let report = repo
            .report(review.id, ReportReason::Spam, "  repeated links ", "user-9")
            .await
            .expect("report");
        assert_eq!(report.description, "repeated links");
        assert_eq!(repo.reports().await.len(), 1);

        let missing = repo.report(ReviewId(99), ReportReason::Other, "", "user-9").await;
        assert!(matches!(missing, Err(RepositoryError::Domain(DomainError::NotFound { .. }))));
    }

    #[tokio::test]
    async fn quiz_responses_feed_statistics() {
        let repo = InMemoryQuizResponseRepository::default();
        let submission = QuizSubmission {
            name: "Dana".to_string(),
            lifestyle: "creative".to_string(),
            preferences: QuizPreferences {
                floral_romantic: true,
                spring: true,
                ..QuizPreferences::default()
            },
            ..QuizSubmission::default()
        };

        let saved = repo.save(submission).await.expect("save");
        assert_eq!(saved.id.0, 1);
        assert!(repo.save(QuizSubmission::default()).await.is_err());

        let statistics = repo.statistics().await.expect("statistics");
        assert_eq!(statistics.total_responses, 1);
        assert_eq!(statistics.scent_preferences.get("floral_romantic"), Some(&1));
        assert_eq!(statistics.lifestyle_distribution.get("creative"), Some(&1));
    }
}
