pub mod interpret;
pub mod recommend;
pub mod sync;

pub use interpret::QueryInterpreterService;
pub use recommend::RecommendationService;
pub use sync::LibrarySyncService;
