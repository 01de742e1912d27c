//! Quill user profile API service.
//!
//! REST endpoints for account management: profile update, deletion,
//! sign-out, single lookup, and admin listing, backed by MongoDB.
//!
//! # Configuration
//!
//! See [`config::QuillApiConfig`] for flags and environment variables.
//! The service needs a 32-byte session secret for verifying session
//! cookies.
//!
//! # Authentication
//!
//! Session cookies signed with HMAC-SHA256. See [`auth::signing`].

pub mod auth;
pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;
