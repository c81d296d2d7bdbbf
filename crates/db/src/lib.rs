pub mod repositories;
pub mod snapshot;

pub use repositories::{
    AromaRepository, InMemoryAromaRepository, InMemoryPerfumeRepository,
    InMemoryQuizResponseRepository, InMemoryReviewRepository, PerfumeRepository,
    QuizResponseRepository, RepositoryError, ReviewRepository,
};
pub use snapshot::{load_snapshot, SnapshotCatalog};
