//! Persistence layer for Quill.
//!
//! Wraps the MongoDB driver behind the [`storage::Storage`] trait so the
//! API crate never talks to the driver directly. Also owns password
//! hashing, so plaintext passwords never reach a stored record.

pub mod models;
pub mod password;
pub mod storage;
