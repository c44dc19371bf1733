pub mod api;
pub mod extractor;

pub use api::{ApiError, ApiResult};
pub use extractor::{ErrorKind, ExtractError};
