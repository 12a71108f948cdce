//! Domain Services

pub mod dispatch;

pub use dispatch::{DispatchError, OrderDispatcher};
