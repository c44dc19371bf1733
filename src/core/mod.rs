pub mod extractor;
pub mod html_parser;
pub mod page_metadata;
pub mod text;

pub use extractor::CourseExtractor;
