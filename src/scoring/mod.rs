pub mod catalog;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod factors;
pub mod validation;
pub mod weights;

pub use catalog::{factor_info, preset_info, FactorInfo, PresetInfo};
pub use compare::{compare, Comparison, FactorRow};
pub use config::ScoringConfig;
pub use engine::{detailed_scores, rank, score_overall, RankedCollege, Ranking};
pub use error::RankingError;
pub use factors::{score_factor, Factor};
pub use validation::validate_scoring;
pub use weights::{apply_preset, Preset, WeightVector};
