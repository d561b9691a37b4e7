//! Middleware modules.

pub mod error;
pub mod request_id;
