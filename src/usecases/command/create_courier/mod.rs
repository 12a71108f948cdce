//! Create Courier Command
//!
//! Registers a new courier at a provided start location.

mod command;
mod handler;

pub use command::{Command, CommandError};
pub use handler::{CreateCourierError, Handler};
