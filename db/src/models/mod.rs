pub mod typed_ulid;
pub mod user;

pub use typed_ulid::*;
pub use user::*;
