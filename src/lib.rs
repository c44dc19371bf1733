pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod http;
pub mod logging;
pub mod model;
pub mod server;
pub mod utils;
