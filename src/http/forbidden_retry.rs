use std::time::Duration;

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next, Result};
use http::Extensions;

use crate::http::random_headers::{get_random_delay, get_random_user_agent};

/// Request extension that opts a request out of the 403 retry.
#[derive(Debug, Clone, Copy)]
pub struct SkipForbiddenRetry;

/// Retries a request once, under a different user agent, when the site answers 403.
pub struct ForbiddenRetryMiddleware {
    pub delay_min: Duration,
    pub delay_max: Duration,
}

#[async_trait::async_trait]
impl Middleware for ForbiddenRetryMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        if extensions.get::<SkipForbiddenRetry>().is_some() {
            return next.run(req, extensions).await;
        }

        // Streaming bodies cannot be replayed.
        let Some(mut retry) = req.try_clone() else {
            return next.run(req, extensions).await;
        };

        let response = next.clone().run(req, extensions).await?;
        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        log::warn!("Got 403 Forbidden for {}, retrying with a different user agent", response.url());
        let agent = get_random_user_agent();
        retry
            .headers_mut()
            .insert(USER_AGENT, HeaderValue::from_static(agent));
        tokio::time::sleep(get_random_delay(self.delay_min, self.delay_max)).await;

        next.run(retry, extensions).await
    }
}
