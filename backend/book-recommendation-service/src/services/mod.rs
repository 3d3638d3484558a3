//! Recommendation engine
//!
//! Offline artifacts (catalog, popularity list, rating pivot, item-item
//! similarity) are loaded once into an immutable [`EngineHandle`]:
//!
//!   artifacts → loader (integrity checks) → EngineHandle
//!   title → TitleIndex::resolve → SimilarityMatrix::rank → Catalog → results

pub mod artifacts;
pub mod catalog;
pub mod engine;
pub mod interaction;
pub mod loader;
pub mod popularity;
pub mod similarity;
pub mod title_index;

pub use artifacts::{ArtifactPaths, ArtifactSet, InteractionArtifact, SimilarityArtifact};
pub use catalog::Catalog;
pub use engine::EngineHandle;
pub use interaction::InteractionMatrix;
pub use loader::{assemble, load};
pub use popularity::PopularityIndex;
pub use similarity::{ScoredRow, SimilarityMatrix};
pub use title_index::{normalize_title, TitleIndex};
