pub mod payload;
pub mod pattern;
pub mod profile;

pub use payload::{Category, PayloadRecord};
pub use pattern::PatternRecord;
pub use profile::TechProfile;
