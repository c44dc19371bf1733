use super::{EXPORT_COLUMNS, ExportRow};

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// CSV document with a header row of raw column names.
pub fn write_csv(rows: &[ExportRow]) -> anyhow::Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to finish csv: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::course_record::CourseRecord;

    #[test]
    fn header_and_quoted_rows() {
        let rows = vec![ExportRow {
            course: CourseRecord {
                course_name: "ARCH 03 - Modern Architecture".into(),
                fees: "$1,200".into(),
                ..CourseRecord::default()
            },
            source_url: "https://continuingstudies.stanford.edu".into(),
        }];
        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "course_name,institute_name,location,format,faculty,language,dates,duration,suitable_for,fees,availability,source_url"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("ARCH 03 - Modern Architecture,Not Available,"));
        assert!(row.contains("\"$1,200\""));
        assert!(row.ends_with(",https://continuingstudies.stanford.edu"));
        assert!(lines.next().is_none());
    }
}
