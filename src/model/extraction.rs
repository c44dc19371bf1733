use serde::{Deserialize, Serialize};

use crate::model::course_record::CourseRecord;

/// Outcome of extracting one URL.
#[derive(Clone, Serialize, Debug)]
#[serde(untagged)]
pub enum ExtractionResult {
    Success {
        success: bool,
        url: String,
        courses_found: usize,
        courses: Vec<CourseRecord>,
    },
    Failure {
        success: bool,
        url: String,
        error: String,
    },
}

impl ExtractionResult {
    pub fn success(url: &str, courses: Vec<CourseRecord>) -> Self {
        ExtractionResult::Success {
            success: true,
            url: url.to_string(),
            courses_found: courses.len(),
            courses,
        }
    }

    pub fn failure(url: &str, error: impl Into<String>) -> Self {
        ExtractionResult::Failure {
            success: false,
            url: url.to_string(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    pub fn url(&self) -> &str {
        match self {
            ExtractionResult::Success { url, .. } | ExtractionResult::Failure { url, .. } => url,
        }
    }

    pub fn courses(&self) -> &[CourseRecord] {
        match self {
            ExtractionResult::Success { courses, .. } => courses,
            ExtractionResult::Failure { .. } => &[],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ExtractRequest {
    #[serde(default)]
    pub urls: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct ExtractResponse {
    pub success: bool,
    pub results: Vec<ExtractionResult>,
    pub total_courses: usize,
}

impl ExtractResponse {
    pub fn new(results: Vec<ExtractionResult>) -> Self {
        let total_courses = results
            .iter()
            .filter(|r| r.is_success())
            .map(|r| r.courses().len())
            .sum();
        ExtractResponse {
            success: true,
            results,
            total_courses,
        }
    }
}

/// A previously returned result, sent back by the client for export.
///
/// Every field is optional: the client may post back failure entries or
/// trimmed-down objects.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ExportResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<CourseRecord>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ExportRequest {
    #[serde(default)]
    pub results: Vec<ExportResult>,
}
