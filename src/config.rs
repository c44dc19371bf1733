use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Runtime settings, read from flags with environment fallbacks.
#[derive(Parser, Debug, Clone)]
#[command(name = "course_extractor", version, about = "Extract course catalog records from institution web pages")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Upper bound on course links followed from a listing page without inline courses.
    #[arg(long, env = "MAX_COURSE_PAGES", default_value_t = 100)]
    pub max_course_pages: usize,

    /// How many followed course pages may be in flight at once.
    #[arg(long, env = "FOLLOW_CONCURRENCY", default_value_t = 1)]
    pub follow_concurrency: usize,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 15)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "COURSE_PAGE_TIMEOUT_SECS", default_value_t = 10)]
    pub course_page_timeout_secs: u64,

    /// Lower bound of the random pause before retrying a 403 response.
    #[arg(long, env = "RETRY_DELAY_MIN_MS", default_value_t = 1000)]
    pub retry_delay_min_ms: u64,

    #[arg(long, env = "RETRY_DELAY_MAX_MS", default_value_t = 3000)]
    pub retry_delay_max_ms: u64,

    /// Directory holding the web front end.
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_course_pages: 100,
            follow_concurrency: 1,
            request_timeout_secs: 15,
            course_page_timeout_secs: 10,
            retry_delay_min_ms: 1000,
            retry_delay_max_ms: 3000,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn course_page_timeout(&self) -> Duration {
        Duration::from_secs(self.course_page_timeout_secs)
    }

    /// Retry pause range, normalised so that min <= max.
    pub fn retry_delay(&self) -> (Duration, Duration) {
        let min = self.retry_delay_min_ms.min(self.retry_delay_max_ms);
        let max = self.retry_delay_min_ms.max(self.retry_delay_max_ms);
        (Duration::from_millis(min), Duration::from_millis(max))
    }
}
