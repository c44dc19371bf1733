mod common;

use common::{spawn_fixture_site, test_config};
use course_extractor::config::Config;
use course_extractor::core::CourseExtractor;
use course_extractor::http::random_headers::{DEFAULT_USER_AGENT, USER_AGENTS};
use course_extractor::model::{ExtractionResult, NOT_AVAILABLE};

#[tokio::test]
async fn extracts_table_courses_from_fetched_page() {
    let site = spawn_fixture_site().await;
    let extractor = CourseExtractor::new(&test_config()).unwrap();

    let result = extractor.extract_course_info(&site.url("/catalog")).await;
    assert!(result.is_success());
    let courses = result.courses();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].course_name, "TECH 20 - Intro to Robotics");
    assert_eq!(courses[0].dates, "SP (Mon)");
    assert_eq!(courses[0].institute_name, "Stanford University");
    assert_eq!(courses[1].availability, "Closed");

    match result {
        ExtractionResult::Success { courses_found, url, .. } => {
            assert_eq!(courses_found, 2);
            assert_eq!(url, site.url("/catalog"));
        }
        ExtractionResult::Failure { error, .. } => panic!("unexpected failure: {}", error),
    }
}

#[tokio::test]
async fn follows_course_links_when_page_has_no_courses() {
    let site = spawn_fixture_site().await;
    let extractor = CourseExtractor::new(&test_config()).unwrap();

    let result = extractor.extract_course_info(&site.url("/listing")).await;
    let courses = result.courses();
    assert_eq!(courses.len(), 2, "the broken link is skipped");

    assert_eq!(courses[0].course_name, "Course A");
    assert_eq!(courses[0].duration, "4 weeks");
    assert_eq!(courses[0].institute_name, "Fixture Institute");

    assert_eq!(courses[1].course_name, "Course B");
    assert_eq!(courses[1].fees, "300 EUR");
    assert_eq!(courses[1].institute_name, "Fixture Institute");
    assert_eq!(courses[1].location, NOT_AVAILABLE);
}

#[tokio::test]
async fn concurrent_following_keeps_link_order() {
    let site = spawn_fixture_site().await;
    let config = Config {
        follow_concurrency: 4,
        ..test_config()
    };
    let extractor = CourseExtractor::new(&config).unwrap();

    let result = extractor.extract_course_info(&site.url("/listing")).await;
    let names: Vec<_> = result.courses().iter().map(|c| c.course_name.as_str()).collect();
    assert_eq!(names, vec!["Course A", "Course B"]);
}

#[tokio::test]
async fn followed_pages_are_capped() {
    let site = spawn_fixture_site().await;
    let config = Config {
        max_course_pages: 1,
        ..test_config()
    };
    let extractor = CourseExtractor::new(&config).unwrap();

    let result = extractor.extract_course_info(&site.url("/listing")).await;
    assert!(result.is_success());
    assert_eq!(result.courses().len(), 1);
}

#[tokio::test]
async fn forbidden_is_retried_once_then_reported() {
    let site = spawn_fixture_site().await;
    let extractor = CourseExtractor::new(&test_config()).unwrap();

    let result = extractor.extract_course_info(&site.url("/forbidden")).await;
    assert_eq!(site.forbidden_hits(), 2);
    let agents = site.forbidden_agents();
    assert_eq!(agents[0], DEFAULT_USER_AGENT);
    assert!(USER_AGENTS.contains(&agents[1].as_str()), "{}", agents[1]);
    match result {
        ExtractionResult::Failure { success, error, .. } => {
            assert!(!success);
            assert!(error.starts_with("Failed to fetch URL: "), "{}", error);
            assert!(error.contains("403"), "{}", error);
        }
        ExtractionResult::Success { .. } => panic!("403 should fail"),
    }
}

#[tokio::test]
async fn blocked_course_pages_are_skipped_without_retry() {
    let site = spawn_fixture_site().await;
    let extractor = CourseExtractor::new(&test_config()).unwrap();

    let result = extractor.extract_course_info(&site.url("/blocked-listing")).await;
    assert!(result.is_success());
    assert!(result.courses().is_empty());
    assert_eq!(site.blocked_course_hits(), 1);
}

#[tokio::test]
async fn unreachable_and_invalid_urls_fail_per_url() {
    let extractor = CourseExtractor::new(&test_config()).unwrap();

    let urls = vec![
        "http://127.0.0.1:1/".to_string(),
        "   ".to_string(),
        "not a url".to_string(),
    ];
    let results = extractor.extract_many(&urls).await;
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(!result.is_success());
        match result {
            ExtractionResult::Failure { error, .. } => assert!(error.starts_with("Failed to fetch URL: ")),
            ExtractionResult::Success { .. } => unreachable!(),
        }
    }
    assert_eq!(results[1].url(), "not a url");
}
