//! Geocoding Adapter
//!
//! gRPC client implementation of the GeoClient port.

pub mod client;
pub mod proto;

pub use client::GeoGrpcClient;
