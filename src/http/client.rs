use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_cookie_store::{CookieStore, CookieStoreMutex};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::http::forbidden_retry::ForbiddenRetryMiddleware;
use crate::http::random_headers::DEFAULT_USER_AGENT;
use crate::http::site_headers::SiteHeadersMiddleware;

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

/// Browser-like client with a session cookie jar, site header overrides and
/// a single retry on 403.
pub fn build_client(
    timeout: Duration,
    retry_delay: (Duration, Duration),
) -> reqwest::Result<ClientWithMiddleware> {
    let cookie_store = Arc::new(CookieStoreMutex::new(CookieStore::default()));

    let client = Client::builder()
        .default_headers(browser_headers())
        .cookie_provider(Arc::clone(&cookie_store))
        .timeout(timeout)
        .build()?;

    let (delay_min, delay_max) = retry_delay;
    Ok(ClientBuilder::new(client)
        .with(SiteHeadersMiddleware)
        .with(ForbiddenRetryMiddleware { delay_min, delay_max })
        .build())
}
