//! Create Order Command
//!
//! Data structure representing the command to create a new order. The order
//! id comes from the upstream basket, which makes the use case idempotent.

use thiserror::Error;
use uuid::Uuid;

/// Command construction errors
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Order ID must not be nil")]
    InvalidOrderId,

    #[error("Street must not be empty")]
    InvalidStreet,

    #[error("Invalid volume: {0}. Must be positive")]
    InvalidVolume(i32),
}

/// Command to create a new order
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    order_id: Uuid,
    street: String,
    volume: i32,
}

impl Command {
    /// Create a validated CreateOrder command
    pub fn new(order_id: Uuid, street: &str, volume: i32) -> Result<Self, CommandError> {
        if order_id.is_nil() {
            return Err(CommandError::InvalidOrderId);
        }

        if street.trim().is_empty() {
            return Err(CommandError::InvalidStreet);
        }

        if volume <= 0 {
            return Err(CommandError::InvalidVolume(volume));
        }

        Ok(Self {
            order_id,
            street: street.to_string(),
            volume,
        })
    }

    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_command() {
        let id = Uuid::new_v4();
        let cmd = Command::new(id, "Baker Street", 5).unwrap();

        assert_eq!(cmd.order_id(), id);
        assert_eq!(cmd.street(), "Baker Street");
        assert_eq!(cmd.volume(), 5);
    }

    #[test]
    fn test_invalid_command() {
        assert_eq!(
            Command::new(Uuid::nil(), "Baker Street", 5),
            Err(CommandError::InvalidOrderId)
        );
        assert_eq!(
            Command::new(Uuid::new_v4(), "  ", 5),
            Err(CommandError::InvalidStreet)
        );
        assert_eq!(
            Command::new(Uuid::new_v4(), "Baker Street", 0),
            Err(CommandError::InvalidVolume(0))
        );
    }
}
