//! Input parameters for the various functions within Quill.

mod user;
pub use user::*;
