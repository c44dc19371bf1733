use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::core::page_metadata::{apply_fallbacks, apply_page_metadata};
use crate::core::text::{PatternList, element_text, select_first_text, stripped_text};
use crate::model::course_record::{CourseRecord, is_missing};

static COURSE_CODE: LazyLock<PatternList> = LazyLock::new(|| PatternList::new(&[r"^[A-Z]{2,5}\s*\d+"]));
static QUARTER: LazyLock<PatternList> = LazyLock::new(|| PatternList::new(&[r"^(FA|WI|SP|SU)$"]));
static CONTAINER_CLASS: LazyLock<PatternList> =
    LazyLock::new(|| PatternList::case_insensitive(&[r"course|class|program"]));
static DIV_TABLE_CLASS: LazyLock<PatternList> =
    LazyLock::new(|| PatternList::case_insensitive(&[r"table|grid|list"]));
static DIV_ITEM_CLASS: LazyLock<PatternList> =
    LazyLock::new(|| PatternList::case_insensitive(&[r"course|item|row"]));

static INSTITUTES: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"(Stanford\s+University)",
        r"(INSEAD)",
        r"(HEC\s+Paris)",
        r"(IMD\s+Business\s+School)",
        r"(LBS\s+Centre)",
        r"([A-Z][a-z]+\s+University)",
        r"([A-Z][a-z]+\s+College)",
        r"([A-Z][a-z]+\s+School)",
        r"(INSEAD\s+Business\s+School)",
        r"(INSEAD\s+Executive\s+Education)",
        r"(HEC\s+Paris\s+Business\s+School)",
        r"(IMD\s+Business\s+School)",
        r"(LBS\s+Centre,\s*Kerala)",
        r"(LBS\s+Centre\s+for\s+Science\s+&\s+Technology)",
        r"(LBS\s+Centre\s+for\s+Science\s+and\s+Technology)",
    ])
});

static LOCATIONS: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Location[:\s]+([^,\n]+)",
        r"Address[:\s]+([^,\n]+)",
        r"([A-Z][a-z]+,\s*[A-Z]{2})",
        r"([A-Z][a-z]+,\s*[A-Z][a-z]+)",
    ])
});

static KNOWN_LOCATIONS: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"(Stanford,\s*CA)",
        r"(Stanford,\s*California)",
        r"(Fontainebleau,\s*France)",
        r"(Singapore)",
        r"(Abu\s+Dhabi)",
        r"(Lausanne,\s*Switzerland)",
        r"(Kerala,\s*India)",
        r"(Paris,\s*France)",
        r"(INSEAD\s+Fontainebleau)",
        r"(INSEAD\s+Singapore)",
        r"(INSEAD\s+Abu\s+Dhabi)",
        r"(HEC\s+Paris,\s*France)",
        r"(IMD\s+Lausanne)",
        r"(LBS\s+Centre,\s*Kerala)",
        r"(Thiruvananthapuram,\s*Kerala)",
        r"(India)",
    ])
});

static FORMATS: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"(Online|On-campus|Hybrid|Distance|Remote)",
        r"(Full-time|Part-time)",
        r"(In-person|Virtual|Blended)",
    ])
});

static LANGUAGES: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Language[:\s]+([^,\n]+)",
        r"Taught in[:\s]+([^,\n]+)",
        r"([A-Z][a-z]+)\s+language",
    ])
});

static DATES: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Start[:\s]+([^,\n]+)",
        r"End[:\s]+([^,\n]+)",
        r"(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
        r"(\w+\s+\d{1,2},?\s+\d{4})",
    ])
});

static DURATIONS: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Duration[:\s]+([^,\n]+)",
        r"(\d+\s+(weeks?|months?|years?|days?))",
        r"(\d+-\d+\s+(weeks?|months?|years?))",
    ])
});

static SUITABLE_FOR: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Suitable for[:\s]+([^,\n]+)",
        r"Prerequisites[:\s]+([^,\n]+)",
        r"Target audience[:\s]+([^,\n]+)",
        r"Requirements[:\s]+([^,\n]+)",
    ])
});

static FEES: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Fee[:\s]+([^,\n]+)",
        r"Cost[:\s]+([^,\n]+)",
        r"Price[:\s]+([^,\n]+)",
        r"(\$[\d,]+)",
        r"(\d+[\d,]*\s*(USD|EUR|GBP|CAD))",
    ])
});

static AVAILABILITY: LazyLock<PatternList> = LazyLock::new(|| {
    PatternList::case_insensitive(&[
        r"Enrollment[:\s]+([^,\n]+)",
        r"Status[:\s]+([^,\n]+)",
        r"Availability[:\s]+([^,\n]+)",
        r"(Open|Closed|Full|Available|Limited)",
    ])
});

static COURSE_PATHS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r#"/courses/[^"\s]+"#, r#"/course/[^"\s]+"#, r#"/program/[^"\s]+"#]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

const TABLE_KEYWORDS: [&str; 6] = ["course", "code", "title", "format", "status", "quarter"];
const STANFORD_CODES: [&str; 7] = ["arch", "arth", "cw", "tech", "well", "fict", "sci"];
const QUARTER_ABBREVIATIONS: [&str; 4] = ["fa", "wi", "sp", "su"];
const FORMAT_WORDS: [&str; 3] = ["online", "on-campus", "off-campus"];
const STATUS_WORDS: [&str; 3] = ["open", "closed", "wait list"];

const COURSE_LINK_KEYWORDS: [&str; 20] = [
    "course", "courses", "class", "program", "programs", "curriculum", "syllabus",
    "training", "workshop", "executive", "education", "mba", "mim", "emba",
    "certificate", "diploma", "degree", "module", "session", "seminar",
];
const NAV_SELECTORS: [&str; 5] = ["nav", ".navigation", ".menu", ".navbar", ".breadcrumb"];

const CONTAINER_NAME_SELECTORS: [&str; 6] = ["h1", "h2", "h3", ".course-title", ".course-name", ".title"];
const DIV_ITEM_NAME_SELECTORS: [&str; 8] = ["h1", "h2", "h3", "h4", ".course-title", ".course-name", ".title", ".name"];
const INSTITUTE_SELECTORS: [&str; 5] = [".institute", ".university", ".college", ".school", ".breadcrumb"];
const FACULTY_SELECTORS: [&str; 4] = [".faculty", ".instructor", ".teacher", ".professor"];

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            log::error!("invalid selector {:?}: {:?}", css, err);
            None
        }
    }
}

fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

fn has_class_matching(el: ElementRef<'_>, patterns: &PatternList) -> bool {
    el.value().classes().any(|class| patterns.is_match(class))
}

fn has_id_matching(el: ElementRef<'_>, patterns: &PatternList) -> bool {
    el.value().id().is_some_and(|id| patterns.is_match(id))
}

/// Every course record found on a page: table rows first, then course containers.
pub fn extract_courses_from_page(html: &str, base_url: &str) -> Vec<CourseRecord> {
    let document = Html::parse_document(html);
    extract_courses_from_document(&document, base_url)
}

pub fn extract_courses_from_document(document: &Html, base_url: &str) -> Vec<CourseRecord> {
    let mut courses = extract_courses_from_tables(document, base_url);

    let root = document.root_element();
    let mut containers: Vec<ElementRef<'_>> = select_all(root, "div, article, section")
        .into_iter()
        .filter(|el| has_class_matching(*el, &CONTAINER_CLASS))
        .collect();
    if containers.is_empty() {
        containers = select_all(root, "div, article")
            .into_iter()
            .filter(|el| has_id_matching(*el, &CONTAINER_CLASS))
            .collect();
    }
    log::debug!("Found {} course containers on {}", containers.len(), base_url);

    for container in containers {
        if let Some(course) = extract_course_from_container(container) {
            courses.push(apply_fallbacks(course, document));
        }
    }

    courses
}

/// Loose test for "this table is probably a course catalog".
pub fn is_course_table(table_text_lower: &str) -> bool {
    let contains_any = |words: &[&str]| words.iter().any(|w| table_text_lower.contains(w));
    contains_any(&TABLE_KEYWORDS)
        || contains_any(&STANFORD_CODES)
        || contains_any(&QUARTER_ABBREVIATIONS)
        || contains_any(&FORMAT_WORDS)
        || contains_any(&STATUS_WORDS)
        || table_text_lower.chars().count() > 100
}

fn extract_courses_from_tables(document: &Html, base_url: &str) -> Vec<CourseRecord> {
    let mut courses = Vec::new();
    let root = document.root_element();

    let tables = select_all(root, "table");
    log::info!("Found {} tables on {}", tables.len(), base_url);

    for (i, table) in tables.iter().enumerate() {
        let table_text = element_text(*table).to_lowercase();
        if !is_course_table(&table_text) {
            log::debug!("Table {} not identified as course catalog", i);
            continue;
        }

        let rows = select_all(*table, "tr");
        log::debug!("Table {} identified as course catalog with {} rows", i, rows.len());

        for (row_idx, row) in rows.iter().enumerate().skip(1) {
            let cells = select_all(*row, "td, th");
            if cells.len() < 3 {
                continue;
            }
            match extract_course_from_table_row(&cells, &table_text) {
                Some(course) => {
                    log::debug!("Extracted course from row {}: {}", row_idx, course.course_name);
                    courses.push(apply_page_metadata(course, document));
                }
                None => log::debug!("No course info extracted from row {}", row_idx),
            }
        }
    }

    let div_tables: Vec<_> = select_all(root, "div")
        .into_iter()
        .filter(|el| has_class_matching(*el, &DIV_TABLE_CLASS))
        .collect();
    log::debug!("Found {} div-based table structures", div_tables.len());

    for div_table in div_tables {
        let div_text = element_text(div_table).to_lowercase();
        if TABLE_KEYWORDS.iter().any(|w| div_text.contains(w)) {
            courses.extend(extract_courses_from_div_structure(div_table));
        }
    }

    log::info!("Total courses extracted from tables: {}", courses.len());
    courses
}

fn extract_courses_from_div_structure(div: ElementRef<'_>) -> Vec<CourseRecord> {
    select_all(div, "div, article")
        .into_iter()
        .filter(|item| has_class_matching(*item, &DIV_ITEM_CLASS))
        .filter_map(extract_course_from_div_item)
        .collect()
}

fn extract_course_from_div_item(item: ElementRef<'_>) -> Option<CourseRecord> {
    let mut course = CourseRecord::default();
    course.course_name = select_first_text(item, &DIV_ITEM_NAME_SELECTORS)?;

    let text = element_text(item).to_lowercase();
    if text.contains("online") {
        course.format = "Online".to_string();
    } else if text.contains("on-campus") {
        course.format = "On-campus".to_string();
    } else if text.contains("off-campus") {
        course.format = "Off-campus".to_string();
    }

    if text.contains("open") {
        course.availability = "Open".to_string();
    } else if text.contains("closed") {
        course.availability = "Closed".to_string();
    } else if text.contains("wait list") {
        course.availability = "Wait List".to_string();
    }

    Some(course)
}

fn is_stanford_row(cell_texts: &[String], table_text_lower: &str) -> bool {
    let n = cell_texts.len();
    let stanford = table_text_lower.contains("stanford")
        || table_text_lower.contains("quarter")
        || (n > 1 && cell_texts.iter().take(2).any(|t| COURSE_CODE.is_match(t)))
        || (n > 2 && cell_texts.iter().any(|t| matches!(t.as_str(), "FA" | "WI" | "SP" | "SU")))
        || (n > 3
            && cell_texts.iter().any(|t| {
                let lower = t.to_lowercase();
                lower.contains("online") || lower.contains("on-campus")
            }));

    // A leading row number means the LBS layout.
    let numbered = cell_texts
        .first()
        .is_some_and(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()));

    stanford && !numbered
}

/// One record from a catalog table row, choosing the Stanford or LBS column layout.
pub fn extract_course_from_table_row(cells: &[ElementRef<'_>], table_text_lower: &str) -> Option<CourseRecord> {
    let cell_texts: Vec<String> = cells.iter().map(|c| stripped_text(*c)).collect();

    let course = if is_stanford_row(&cell_texts, table_text_lower) {
        log::debug!("Using Stanford format extraction");
        extract_stanford_format(&cell_texts)
    } else {
        log::debug!("Using LBS format extraction");
        extract_lbs_format(&cell_texts)
    };

    course.has_name().then_some(course)
}

/// `Code | Course Title | Qtr | Days | Format | Status`
fn extract_stanford_format(cells: &[String]) -> CourseRecord {
    let mut course = CourseRecord::default();
    if cells.len() < 4 {
        return course;
    }

    let first = cells[0].as_str();
    let (code, title) = if COURSE_CODE.is_match(first) {
        (first, cells[1].as_str())
    } else {
        ("", first)
    };

    if !code.is_empty() && !title.is_empty() {
        course.course_name = format!("{} - {}", code, title);
    } else if !title.is_empty() {
        course.course_name = title.to_string();
    } else if !code.is_empty() {
        course.course_name = code.to_string();
    }

    let quarter = cells[2].as_str();
    if QUARTER.is_match(quarter) {
        course.dates = quarter.to_string();
    }

    let days = cells[3].as_str();
    if !days.is_empty() && days != "Days" {
        if is_missing(&course.dates) {
            course.dates = days.to_string();
        } else {
            course.dates = format!("{} ({})", course.dates, days);
        }
    }

    if let Some(format) = cells.get(4).filter(|f| !f.is_empty() && *f != "Format") {
        course.format = format.clone();
    }

    if let Some(status) = cells.get(5).filter(|s| !s.is_empty() && *s != "Status") {
        course.availability = status.clone();
    }

    course
}

/// `# | Course name | Duration | Course Fee | Close date | Details | Option`
fn extract_lbs_format(cells: &[String]) -> CourseRecord {
    let mut course = CourseRecord::default();
    if cells.len() < 5 {
        return course;
    }

    let column = |idx: usize, header: &str| -> Option<String> {
        let value = &cells[idx];
        (!value.is_empty() && value != header).then(|| value.clone())
    };

    if let Some(name) = column(1, "Course name") {
        course.course_name = name;
    }
    if let Some(duration) = column(2, "Duration") {
        course.duration = duration;
    }
    if let Some(fees) = column(3, "Course Fee") {
        course.fees = fees;
    }
    if let Some(close_date) = column(4, "Close date") {
        course.dates = close_date;
    }

    if cells.len() > 5 && cells[cells.len() - 1].contains("Apply Online") {
        course.format = "Online Application Available".to_string();
    }

    course
}

fn language_from_lang_attr(container: ElementRef<'_>) -> Option<String> {
    let html = select_all(container, "html").into_iter().next()?;
    let lang = html.value().attr("lang")?;
    let primary = lang.split('-').next().unwrap_or("").trim();
    let mut chars = primary.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect())
}

/// A record from a free-form block of course text, guessing each field from labels and keywords.
pub fn extract_course_from_container(container: ElementRef<'_>) -> Option<CourseRecord> {
    let mut course = CourseRecord::default();
    course.course_name = select_first_text(container, &CONTAINER_NAME_SELECTORS)?;

    let text = element_text(container);

    if let Some(institute) =
        select_first_text(container, &INSTITUTE_SELECTORS).or_else(|| INSTITUTES.first_capture(&text))
    {
        course.institute_name = institute;
    }

    if let Some(location) = LOCATIONS
        .first_capture(&text)
        .or_else(|| KNOWN_LOCATIONS.first_capture(&text))
    {
        course.location = location;
    }

    if let Some(format) = FORMATS.first_capture(&text) {
        course.format = format;
    }

    if let Some(faculty) = select_first_text(container, &FACULTY_SELECTORS) {
        course.faculty = faculty;
    }

    // Most institution sites that say nothing are in English.
    course.language = LANGUAGES
        .first_capture(&text)
        .or_else(|| language_from_lang_attr(container))
        .unwrap_or_else(|| "English".to_string());

    let dates = DATES.all_captures(&text);
    if !dates.is_empty() {
        course.dates = dates.iter().take(2).cloned().collect::<Vec<_>>().join(" - ");
    }

    if let Some(duration) = DURATIONS.first_capture(&text) {
        course.duration = duration;
    }
    if let Some(suitable) = SUITABLE_FOR.first_capture(&text) {
        course.suitable_for = suitable;
    }
    if let Some(fees) = FEES.first_capture(&text) {
        course.fees = fees;
    }
    if let Some(availability) = AVAILABILITY.first_capture(&text) {
        course.availability = availability;
    }

    Some(course)
}

/// Treats a whole followed course page as one container.
pub fn extract_single_course_page(html: &str) -> Option<CourseRecord> {
    let document = Html::parse_document(html);
    let body = selector("body").and_then(|sel| document.select(&sel).next());
    let container = body.unwrap_or_else(|| document.root_element());
    extract_course_from_container(container).map(|course| apply_fallbacks(course, &document))
}

fn same_site(url: &Url, base: &Url) -> bool {
    url.host_str() == base.host_str() && url.port() == base.port()
}

fn is_course_link(link: ElementRef<'_>, href: &str) -> bool {
    let text = stripped_text(link).to_lowercase();
    let href = href.to_lowercase();
    COURSE_LINK_KEYWORDS
        .iter()
        .any(|k| text.contains(k) || href.contains(k))
}

fn collect_course_links(scope: ElementRef<'_>, base: &Url, out: &mut Vec<Url>) {
    for link in select_all(scope, "a[href]") {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !is_course_link(link, href) {
            continue;
        }
        if let Ok(full) = base.join(href) {
            if same_site(&full, base) {
                out.push(full);
            }
        }
    }
}

/// Same-site links that look like they lead to course pages, without duplicates.
pub fn find_course_links(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        log::warn!("Cannot resolve links against {}", base_url);
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut links = Vec::new();
    collect_course_links(root, &base, &mut links);

    for css in NAV_SELECTORS {
        if let Some(nav) = select_all(root, css).into_iter().next() {
            collect_course_links(nav, &base, &mut links);
        }
    }

    if base_url.to_lowercase().contains("stanford") {
        let page_text = element_text(root);
        for re in COURSE_PATHS.iter() {
            for m in re.find_iter(&page_text) {
                if let Ok(full) = base.join(m.as_str()) {
                    if same_site(&full, &base) {
                        links.push(full);
                    }
                }
            }
        }
    }

    let mut seen = HashSet::new();
    let unique: Vec<String> = links
        .into_iter()
        .map(String::from)
        .filter(|link| seen.insert(link.clone()))
        .collect();
    log::info!("Found {} potential course links", unique.len());
    unique
}
