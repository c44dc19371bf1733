pub mod client;
pub mod forbidden_retry;
pub mod random_headers;
pub mod site_headers;

pub use client::build_client;
