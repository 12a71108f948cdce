//! Infrastructure Layer
//!
//! Adapters implementing the domain ports: persistence, geocoding,
//! messaging and the HTTP surface.

pub mod geo;
pub mod http;
pub mod messaging;
pub mod repository;
