use regex::Regex;
use scraper::{ElementRef, Selector};

/// All descendant text, concatenated as it appears in the document.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Descendant text nodes, each trimmed, empty ones dropped, joined without a separator.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Stripped text of the first match of the first selector that yields non-empty text.
pub fn select_first_text(el: ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        let first = el.select(&selector).next()?;
        let text = stripped_text(first);
        (!text.is_empty()).then_some(text)
    })
}

/// An ordered list of regexes tried one after another.
pub struct PatternList(Vec<Regex>);

impl PatternList {
    pub fn new(patterns: &[&str]) -> Self {
        PatternList(
            patterns
                .iter()
                .filter_map(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(err) => {
                        log::error!("invalid pattern {:?}: {}", p, err);
                        None
                    }
                })
                .collect(),
        )
    }

    /// Same as [`PatternList::new`] but every pattern is case-insensitive.
    pub fn case_insensitive(patterns: &[&str]) -> Self {
        let owned: Vec<String> = patterns.iter().map(|p| format!("(?i){}", p)).collect();
        let refs: Vec<&str> = owned.iter().map(String::as_str).collect();
        Self::new(&refs)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.iter().any(|re| re.is_match(text))
    }

    /// Group 1 (or the whole match) of the first pattern that matches, trimmed.
    pub fn first_capture(&self, text: &str) -> Option<String> {
        self.0.iter().find_map(|re| {
            let caps = re.captures(text)?;
            let m = caps.get(1).or_else(|| caps.get(0))?;
            Some(m.as_str().trim().to_string())
        })
    }

    /// Every group-1 capture of every pattern, in pattern order then position order.
    pub fn all_captures(&self, text: &str) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|re| {
                re.captures_iter(text)
                    .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
                    .map(|m| m.as_str().to_string())
            })
            .collect()
    }
}
