use async_trait::async_trait;
use thiserror::Error;

use aromatica_core::domain::perfume::{AromaTag, AromaTagId, Perfume, PerfumeId};
use aromatica_core::domain::quiz::{QuizResponse, QuizSubmission};
use aromatica_core::domain::review::{NewReview, ReportReason, Review, ReviewId, ReviewReport};
use aromatica_core::errors::{ApplicationError, DomainError};
use aromatica_core::quiz_stats::QuizStatistics;
use aromatica_core::reviews::{ReviewQuery, ReviewStats};

pub mod memory;

pub use memory::{
    InMemoryAromaRepository, InMemoryPerfumeRepository, InMemoryQuizResponseRepository,
    InMemoryReviewRepository,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Domain(error) => ApplicationError::Domain(error),
            RepositoryError::Decode(message) => ApplicationError::Persistence(message),
        }
    }
}

#[async_trait]
pub trait PerfumeRepository: Send + Sync {
    /// Rejects an id that is already stored.
    async fn create(&self, perfume: Perfume) -> Result<Perfume, RepositoryError>;
    async fn find_by_id(&self, id: PerfumeId) -> Result<Option<Perfume>, RepositoryError>;
    /// All perfumes ordered by id.
    async fn list(&self) -> Result<Vec<Perfume>, RepositoryError>;
    async fn update(&self, perfume: Perfume) -> Result<Perfume, RepositoryError>;
    async fn delete(&self, id: PerfumeId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait AromaRepository: Send + Sync {
    async fn create(&self, tag: AromaTag) -> Result<AromaTag, RepositoryError>;
    async fn find_by_id(&self, id: AromaTagId) -> Result<Option<AromaTag>, RepositoryError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<AromaTag>, RepositoryError>;
    /// Known tags among `slugs`; unknown slugs are skipped.
    async fn find_by_slugs(&self, slugs: &[String]) -> Result<Vec<AromaTag>, RepositoryError>;
    /// All tags ordered by display name.
    async fn list(&self) -> Result<Vec<AromaTag>, RepositoryError>;
    async fn update(&self, tag: AromaTag) -> Result<AromaTag, RepositoryError>;
    async fn delete(&self, id: AromaTagId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: NewReview) -> Result<Review, RepositoryError>;
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError>;
    async fn list_for_perfume(
        &self,
        perfume_id: PerfumeId,
        query: &ReviewQuery,
    ) -> Result<Vec<Review>, RepositoryError>;
    async fn stats(&self, perfume_id: PerfumeId) -> Result<ReviewStats, RepositoryError>;

    /// Records one helpful vote and returns the new count. A user votes once per review.
    async fn mark_helpful(
        &self,
        id: ReviewId,
        user_identifier: &str,
    ) -> Result<u32, RepositoryError>;

    async fn report(
        &self,
        id: ReviewId,
        reason: ReportReason,
        description: &str,
        user_identifier: &str,
    ) -> Result<ReviewReport, RepositoryError>;
}

#[async_trait]
pub trait QuizResponseRepository: Send + Sync {
    async fn save(&self, submission: QuizSubmission) -> Result<QuizResponse, RepositoryError>;
    async fn list(&self) -> Result<Vec<QuizResponse>, RepositoryError>;
    async fn statistics(&self) -> Result<QuizStatistics, RepositoryError>;
}
