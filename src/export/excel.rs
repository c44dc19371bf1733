use rust_xlsxwriter::{Format, Workbook};

use super::{EXPORT_COLUMNS, ExportRow};

pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// `suitable_for` -> `Suitable For`
pub fn header_title(column: &str) -> String {
    column
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Single `Courses` worksheet with a bold title-cased header row.
pub fn write_xlsx(rows: &[ExportRow]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Courses")?;

    for (col, column) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header_title(column), &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, value) in row.values().into_iter().enumerate() {
            sheet.write_string(r, col as u16, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
