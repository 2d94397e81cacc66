pub mod filter;
pub mod storage;
pub mod types;

pub use filter::filter_by_search;
pub use storage::{load_colleges, parse_colleges, sample_colleges, DataFormat};
pub use types::{CategoryRatings, College, FacultyInfo, PlacementStats, ResearchStats};
