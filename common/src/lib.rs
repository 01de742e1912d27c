//! Types shared between the Quill API service and its persistence layer:
//! the acting-user identity, request parameters, and response views.

pub mod caller;
pub mod params;
pub mod views;
