pub mod extractor;
pub mod fields;
pub mod selectors;

pub use extractor::RecordExtractor;
