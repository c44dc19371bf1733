//! Page-level fallbacks for fields a single course block does not mention.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::core::text::PatternList;
use crate::model::course_record::{CourseRecord, is_missing};

static PAGE_INSTITUTES: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"(LBS\s+Centre\s+for\s+Science\s+&\s+Technology)",
        r"(LBS\s+Centre\s+for\s+Science\s+and\s+Technology)",
        r"(LBS\s+Centre)",
        r"(Stanford\s+University)",
        r"(INSEAD)",
        r"(HEC\s+Paris)",
        r"(IMD\s+Business\s+School)",
    ])
});

static PAGE_LOCATIONS: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"(Kerala,\s*India)",
        r"(Thiruvananthapuram,\s*Kerala)",
        r"(LBS\s+Centre,\s*Kerala)",
        r"(Stanford,\s*CA)",
        r"(Stanford,\s*California)",
        r"(Fontainebleau,\s*France)",
        r"(Singapore)",
        r"(Abu\s+Dhabi)",
        r"(Lausanne,\s*Switzerland)",
        r"(Paris,\s*France)",
    ])
});

const TITLE_SEPARATORS: [char; 5] = ['|', '–', '-', '—', '·'];

fn first_attr(page: &Html, css: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    page.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

fn title_text(page: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = page.select(&selector).next()?;
    let text = crate::core::text::stripped_text(title);
    (!text.is_empty()).then_some(text)
}

/// Site name with any " | section" style suffix removed.
fn institute_from_title(title: &str) -> String {
    TITLE_SEPARATORS
        .iter()
        .find(|sep| title.contains(**sep))
        .and_then(|sep| title.split(*sep).next())
        .unwrap_or(title)
        .trim()
        .to_string()
}

/// Institute from `og:site_name` or the `<title>`, language from `<html lang>`.
pub fn apply_fallbacks(mut record: CourseRecord, page: &Html) -> CourseRecord {
    if is_missing(&record.institute_name) {
        if let Some(site) = first_attr(page, r#"meta[property="og:site_name"]"#, "content")
            .filter(|s| !s.trim().is_empty())
        {
            record.institute_name = site.trim().to_string();
        } else if let Some(title) = title_text(page) {
            record.institute_name = institute_from_title(&title);
        }
    }

    if is_missing(&record.language) {
        if let Some(lang) = first_attr(page, "html", "lang").filter(|l| !l.is_empty()) {
            record.language = lang;
        }
    }

    record
}

/// Institute and location from well-known names anywhere on the page; English otherwise.
pub fn apply_page_metadata(mut record: CourseRecord, page: &Html) -> CourseRecord {
    let page_text = page.root_element().text().collect::<String>();

    if is_missing(&record.institute_name) {
        if let Some(institute) = PAGE_INSTITUTES.first_capture(&page_text) {
            record.institute_name = institute;
        }
    }

    if is_missing(&record.location) {
        if let Some(location) = PAGE_LOCATIONS.first_capture(&page_text) {
            record.location = location;
        }
    }

    if is_missing(&record.language) {
        record.language = "English".to_string();
    }

    record
}
