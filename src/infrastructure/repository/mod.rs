//! PostgreSQL Persistence
//!
//! Sea-ORM entities, repositories and the unit of work.

pub mod courier_postgres;
pub mod entities;
pub mod order_postgres;
pub mod unit_of_work;

pub use courier_postgres::CourierPostgresRepository;
pub use order_postgres::OrderPostgresRepository;
pub use unit_of_work::{PostgresUnitOfWork, PostgresUnitOfWorkFactory};
