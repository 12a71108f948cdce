//! Assign Orders Command
//!
//! One assignment pass: pick a waiting order and hand it to the fastest
//! free courier.

mod command;
mod handler;

pub use command::Command;
pub use handler::{AssignOrdersError, Handler};
