//! Session-cookie authentication for the Quill API.

pub mod error;
pub mod extractor;
pub mod signing;

pub use extractor::Auth;

/// Name of the session cookie set at sign-in and cleared at sign-out.
pub const COOKIE_NAME: &str = "quill_session";
