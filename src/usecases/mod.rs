//! Application Use Cases
//!
//! Commands mutate state through the unit of work; queries read directly
//! from the shared connection.

pub mod command;
pub mod query;

#[cfg(test)]
pub mod support;
