//! Value Objects
//!
//! Immutable domain values shared by the aggregates.

pub mod location;

pub use location::Location;
