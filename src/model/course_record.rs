use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for every field the heuristics could not fill.
pub const NOT_AVAILABLE: &str = "Not Available";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Exported records come back from the browser; a `null` field reads as unknown.
fn sentinel_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(not_available))
}

/// True for the sentinel value and for empty strings.
pub fn is_missing(value: &str) -> bool {
    value.is_empty() || value == NOT_AVAILABLE
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CourseRecord {
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub course_name: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub institute_name: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub location: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub format: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub faculty: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub language: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub dates: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub duration: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub suitable_for: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub fees: String,
    #[serde(default = "not_available", deserialize_with = "sentinel_if_null")]
    pub availability: String,
}

impl Default for CourseRecord {
    fn default() -> Self {
        CourseRecord {
            course_name: not_available(),
            institute_name: not_available(),
            location: not_available(),
            format: not_available(),
            faculty: not_available(),
            language: not_available(),
            dates: not_available(),
            duration: not_available(),
            suitable_for: not_available(),
            fees: not_available(),
            availability: not_available(),
        }
    }
}

impl CourseRecord {
    /// Field names in export column order.
    pub const FIELDS: [&'static str; 11] = [
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
    ];

    /// Records are only emitted once a course name has been found.
    pub fn has_name(&self) -> bool {
        !is_missing(&self.course_name)
    }

    /// Field values in the same order as [`CourseRecord::FIELDS`].
    pub fn values(&self) -> [&str; 11] {
        [
            &self.course_name,
            &self.institute_name,
            &self.location,
            &self.format,
            &self.faculty,
            &self.language,
            &self.dates,
            &self.duration,
            &self.suitable_for,
            &self.fees,
            &self.availability,
        ]
    }
}
