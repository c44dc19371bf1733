use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "course_extractor=info,demo=info,tower_http=info";

/// Installs the fmt subscriber; `log` records from the crate are forwarded to it.
/// `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("logging already initialised: {}", err);
    }
}
