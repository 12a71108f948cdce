//! Periodic Jobs
//!
//! The two control loops driving assignment and movement.

pub mod assign_orders_job;
pub mod move_couriers_job;

pub use assign_orders_job::AssignOrdersJob;
pub use move_couriers_job::MoveCouriersJob;
