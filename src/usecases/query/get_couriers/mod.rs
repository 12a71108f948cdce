//! Get Couriers Query
//!
//! Lists every courier with its current grid location.

mod handler;
mod query;

pub use handler::{CourierRow, GetCouriersError, Handler, Response};
pub use query::Query;
