//! HTTP Infrastructure
//!
//! axum server and problem-document error payloads.

pub mod problem;
pub mod server;

pub use server::{router, start_server};
