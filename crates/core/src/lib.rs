#[macro_use]
pub mod domain;

pub mod catalog;
pub mod config;
pub mod errors;
pub mod quiz_stats;
pub mod recommendation;
pub mod reviews;

pub use catalog::{Catalog, CatalogError, CatalogPage, CatalogQuery, CatalogSource, Pagination};
pub use domain::perfume::{AromaTag, AromaTagId, Longevity, Note, NoteKind, Perfume, PerfumeId, Sillage};
pub use domain::quiz::{QuizPreferences, QuizResponse, QuizResponseId, QuizSubmission};
pub use domain::review::{NewReview, ReportReason, Review, ReviewId, ReviewReport};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use quiz_stats::QuizStatistics;
pub use recommendation::{
    AdvancedRecommendationRequest, AdvancedRecommendationResponse, EngineSettings,
    RecommendationEngine, RecommendationError,
};
pub use reviews::{ReviewQuery, ReviewSort, ReviewStats};
