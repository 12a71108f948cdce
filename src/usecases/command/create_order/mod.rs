//! Create Order Command
//!
//! Creates an order from a confirmed basket; idempotent on the order id.

mod command;
mod handler;

pub use command::{Command, CommandError};
pub use handler::{CreateOrderError, Handler};
