pub mod course_record;
pub mod extraction;
pub mod health;

pub use course_record::{CourseRecord, NOT_AVAILABLE, is_missing};
pub use extraction::{ExportRequest, ExportResult, ExtractRequest, ExtractResponse, ExtractionResult};
pub use health::HealthResponse;
