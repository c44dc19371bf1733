pub mod csv;
pub mod excel;

use chrono::NaiveDateTime;

use crate::model::course_record::CourseRecord;
use crate::model::extraction::ExportResult;

/// Column names of an export: the record fields plus the page each course came from.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "course_name",
    "institute_name",
    "location",
    "format",
    "faculty",
    "language",
    "dates",
    "duration",
    "suitable_for",
    "fees",
    "availability",
    "source_url",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    pub course: CourseRecord,
    pub source_url: String,
}

impl ExportRow {
    pub fn values(&self) -> Vec<&str> {
        let mut values = self.course.values().to_vec();
        values.push(&self.source_url);
        values
    }
}

/// Courses of all successful results, each tagged with its source URL.
pub fn flatten(results: &[ExportResult]) -> Vec<ExportRow> {
    results
        .iter()
        .filter(|r| r.success == Some(true))
        .flat_map(|r| {
            let source_url = r.url.clone().unwrap_or_default();
            r.courses
                .iter()
                .flatten()
                .map(move |course| ExportRow {
                    course: course.clone(),
                    source_url: source_url.clone(),
                })
        })
        .collect()
}

pub fn export_filename(extension: &str, now: NaiveDateTime) -> String {
    format!("courses_export_{}.{}", now.format("%Y%m%d_%H%M%S"), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn named(name: &str) -> CourseRecord {
        CourseRecord {
            course_name: name.to_string(),
            ..CourseRecord::default()
        }
    }

    #[test]
    fn flatten_skips_failures_and_tags_source() {
        let results = vec![
            ExportResult {
                success: Some(true),
                url: Some("https://a.edu".into()),
                courses: Some(vec![named("A1"), named("A2")]),
            },
            ExportResult {
                success: Some(false),
                url: Some("https://b.edu".into()),
                courses: Some(vec![named("B1")]),
            },
            ExportResult {
                success: Some(true),
                url: None,
                courses: Some(vec![named("C1")]),
            },
            ExportResult {
                success: Some(true),
                url: Some("https://d.edu".into()),
                courses: None,
            },
        ];
        let rows = flatten(&results);
        let names: Vec<_> = rows.iter().map(|r| r.course.course_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A2", "C1"]);
        assert_eq!(rows[0].source_url, "https://a.edu");
        assert_eq!(rows[2].source_url, "");
        assert_eq!(rows[0].values().len(), EXPORT_COLUMNS.len());
    }

    #[test]
    fn filename_has_timestamp() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        assert_eq!(export_filename("csv", now), "courses_export_20250309_140507.csv");
    }
}
