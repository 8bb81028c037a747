//! Mapping of free-form request text onto canonical table keys.

pub mod extract;
pub mod normalize;
pub mod utils;

pub use extract::SignalExtractor;
pub use normalize::{InputNormalizer, MatchMethod, Resolved, RoleSuggestion};
pub use utils::normalize_text;
