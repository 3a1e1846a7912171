pub mod history;
pub mod library;
pub mod recommendation;
pub mod search;

pub use history::HistoryEntry;
pub use library::{LibraryItem, MediaKind, RawLibraryEntry, Section};
pub use recommendation::{RecommendationEnvelope, RecommendationItem};
pub use search::{DiscoverParams, SearchInterpretation, SuggestedTitle};
