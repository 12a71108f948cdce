//! Move Couriers Command
//!
//! One movement pass: every courier with an assigned order advances one
//! tick; arrivals complete their order.

mod command;
mod handler;

pub use command::Command;
pub use handler::{Handler, MoveCouriersError};
