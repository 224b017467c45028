//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `sessions` - JSON session API
//! - `call` - Server-rendered call page and its form posts
//! - `page` - HTML rendering for the call page

pub mod api;
pub mod call;
pub mod page;
pub mod sessions;

use crate::core::session::SessionId;
use crate::errors::{AppError, AppResult};

/// Parse a session id from a path segment. Malformed ids are reported the
/// same way as unknown ones.
pub(crate) fn parse_session_id(raw: &str) -> AppResult<SessionId> {
    SessionId::parse_str(raw).map_err(|_| AppError::SessionNotFound(raw.to_string()))
}
