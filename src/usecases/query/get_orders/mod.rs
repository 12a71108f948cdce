//! Get Orders Query
//!
//! Lists every order still in flight with its destination.

mod handler;
mod query;

pub use handler::{GetOrdersError, Handler, OrderRow, Response};
pub use query::Query;
