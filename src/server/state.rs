use std::sync::Arc;

use crate::config::Config;
use crate::core::extractor::CourseExtractor;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<CourseExtractor>,
}

impl AppState {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(AppState {
            extractor: Arc::new(CourseExtractor::new(config)?),
        })
    }
}
