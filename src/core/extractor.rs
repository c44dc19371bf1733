use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

use crate::config::Config;
use crate::core::html_parser;
use crate::error::extractor::ExtractError;
use crate::http::client::build_client;
use crate::http::forbidden_retry::SkipForbiddenRetry;
use crate::model::course_record::CourseRecord;
use crate::model::extraction::ExtractionResult;

pub struct CourseExtractor {
    client: ClientWithMiddleware,
    max_course_pages: usize,
    follow_concurrency: usize,
    course_page_timeout: Duration,
}

impl CourseExtractor {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = build_client(config.request_timeout(), config.retry_delay())?;
        Ok(CourseExtractor {
            client,
            max_course_pages: config.max_course_pages,
            follow_concurrency: config.follow_concurrency.max(1),
            course_page_timeout: config.course_page_timeout(),
        })
    }

    /// Extracts every URL in order; blank entries are skipped.
    pub async fn extract_many(&self, urls: &[String]) -> Vec<ExtractionResult> {
        let mut results = Vec::new();
        for url in urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
            results.push(self.extract_course_info(url).await);
        }
        results
    }

    /// Never fails: errors are folded into a failure result for this URL.
    pub async fn extract_course_info(&self, url: &str) -> ExtractionResult {
        log::info!("Extracting course info from: {}", url);
        match self.extract_courses(url).await {
            Ok(courses) => {
                log::info!("Extracted {} courses from {}", courses.len(), url);
                ExtractionResult::success(url, courses)
            }
            Err(err) => {
                log::error!("Extraction failed for {}: {}", url, err.message);
                ExtractionResult::failure(url, err.user_message())
            }
        }
    }

    async fn extract_courses(&self, url: &str) -> Result<Vec<CourseRecord>, ExtractError> {
        let html = self.fetch(url, false).await?;

        let courses = html_parser::extract_courses_from_page(&html, url);
        if !courses.is_empty() {
            return Ok(courses);
        }

        let links = html_parser::find_course_links(&html, url);
        Ok(self.follow_course_links(links).await)
    }

    async fn follow_course_links(&self, links: Vec<String>) -> Vec<CourseRecord> {
        let total = links.len().min(self.max_course_pages);
        log::info!("No courses on page, following {} course links", total);

        stream::iter(links.into_iter().take(self.max_course_pages))
            .map(|link| async move {
                match self.extract_single_course(&link).await {
                    Ok(course) => course,
                    Err(err) => {
                        log::warn!("Failed to extract from {}: {}", link, err.message);
                        None
                    }
                }
            })
            .buffered(self.follow_concurrency)
            .filter_map(|course| async move { course })
            .collect()
            .await
    }

    async fn extract_single_course(&self, url: &str) -> Result<Option<CourseRecord>, ExtractError> {
        let html = self.fetch(url, true).await?;
        Ok(html_parser::extract_single_course_page(&html))
    }

    /// Followed course pages get the shorter timeout, and a blocked one is
    /// skipped instead of retried.
    async fn fetch(&self, url: &str, followed: bool) -> Result<String, ExtractError> {
        let url = Url::parse(url)?;
        let mut request = self.client.get(url.clone());
        if followed {
            request = request
                .timeout(self.course_page_timeout)
                .with_extension(SkipForbiddenRetry);
        }

        let response = request.send().await?;
        log::info!(
            "Response status {} for {} ({:?} bytes)",
            response.status(),
            url,
            response.content_length()
        );
        log::debug!("Response headers: {:?}", response.headers());

        let response = response.error_for_status()?;
        let text = response.text().await?;
        Ok(text)
    }
}
