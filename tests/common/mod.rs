#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::header::{ACCEPT_LANGUAGE, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::get;
use course_extractor::config::Config;
use tokio::net::TcpListener;

pub const CATALOG_PAGE: &str = r#"<html lang="en"><head><title>Fixture Studies | Catalog</title></head>
<body>
  <p>Stanford University</p>
  <table>
    <tr><th>Code</th><th>Course Title</th><th>Qtr</th><th>Days</th><th>Format</th><th>Status</th></tr>
    <tr><td>TECH 20</td><td>Intro to Robotics</td><td>SP</td><td>Mon</td><td>Online</td><td>Open</td></tr>
    <tr><td>WELL 05</td><td>Mindful Living</td><td>SU</td><td>Thu</td><td>On-campus</td><td>Closed</td></tr>
  </table>
</body></html>"#;

pub const LISTING_PAGE: &str = r#"<html><head><title>Fixture Institute | Home</title></head>
<body>
  <p>Welcome.</p>
  <a href="/courses/a">Course A</a>
  <a href="/courses/missing">Broken course</a>
  <a href="/courses/b">Course B</a>
  <a href="/about">About us</a>
</body></html>"#;

pub const COURSE_A: &str = r#"<html><head><title>Fixture Institute | Course A</title></head>
<body><h1>Course A</h1><p>Duration: 4 weeks</p></body></html>"#;

pub const COURSE_B: &str = r#"<html><head><meta property="og:site_name" content="Fixture Institute"></head>
<body><h1>Course B</h1><p>Price: 300 EUR</p></body></html>"#;

pub const BLOCKED_LISTING_PAGE: &str = r#"<html><head><title>Fixture Institute | Home</title></head>
<body><a href="/courses/blocked">Blocked course</a></body></html>"#;

pub struct FixtureSite {
    pub base: String,
    pub forbidden_hits: Arc<AtomicUsize>,
    pub forbidden_agents: Arc<Mutex<Vec<String>>>,
    pub blocked_course_hits: Arc<AtomicUsize>,
}

impl FixtureSite {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn forbidden_hits(&self) -> usize {
        self.forbidden_hits.load(Ordering::SeqCst)
    }

    /// User agents seen by `/forbidden`, in request order.
    pub fn forbidden_agents(&self) -> Vec<String> {
        self.forbidden_agents.lock().unwrap().clone()
    }

    pub fn blocked_course_hits(&self) -> usize {
        self.blocked_course_hits.load(Ordering::SeqCst)
    }
}

fn header_text(headers: &HeaderMap, name: axum::http::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Serves the fixture pages on an ephemeral local port.
pub async fn spawn_fixture_site() -> FixtureSite {
    let forbidden_hits = Arc::new(AtomicUsize::new(0));
    let forbidden_agents = Arc::new(Mutex::new(Vec::new()));
    let blocked_course_hits = Arc::new(AtomicUsize::new(0));
    let hits = Arc::clone(&forbidden_hits);
    let agents = Arc::clone(&forbidden_agents);
    let blocked_hits = Arc::clone(&blocked_course_hits);

    let app = Router::new()
        .route("/catalog", get(|| async { Html(CATALOG_PAGE) }))
        .route("/listing", get(|| async { Html(LISTING_PAGE) }))
        .route("/courses/a", get(|| async { Html(COURSE_A) }))
        .route("/courses/b", get(|| async { Html(COURSE_B) }))
        .route("/blocked-listing", get(|| async { Html(BLOCKED_LISTING_PAGE) }))
        .route(
            "/echo-headers",
            get(|headers: HeaderMap| async move {
                format!(
                    "{}\n{}",
                    header_text(&headers, USER_AGENT),
                    header_text(&headers, ACCEPT_LANGUAGE)
                )
            }),
        )
        .route(
            "/forbidden",
            get(move |headers: HeaderMap| {
                let hits = Arc::clone(&hits);
                let agents = Arc::clone(&agents);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    agents.lock().unwrap().push(header_text(&headers, USER_AGENT));
                    (StatusCode::FORBIDDEN, "blocked")
                }
            }),
        )
        .route(
            "/courses/blocked",
            get(move || {
                let hits = Arc::clone(&blocked_hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::FORBIDDEN, "blocked")
                }
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fixture site");
    let addr = listener.local_addr().expect("fixture address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture site");
    });

    FixtureSite {
        base: format!("http://{}", addr),
        forbidden_hits,
        forbidden_agents,
        blocked_course_hits,
    }
}

pub fn test_config() -> Config {
    Config {
        retry_delay_min_ms: 0,
        retry_delay_max_ms: 0,
        request_timeout_secs: 5,
        course_page_timeout_secs: 5,
        ..Config::default()
    }
}
