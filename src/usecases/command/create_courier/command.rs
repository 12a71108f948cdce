//! Create Courier Command
//!
//! Data structure representing the command to create a new courier.

use thiserror::Error;

/// Command construction errors
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Name must not be empty")]
    InvalidName,

    #[error("Invalid speed: {0}. Must be positive")]
    InvalidSpeed(i32),
}

/// Command to create a new courier
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: String,
    speed: i32,
}

impl Command {
    /// Create a validated CreateCourier command
    pub fn new(name: &str, speed: i32) -> Result<Self, CommandError> {
        if name.is_empty() {
            return Err(CommandError::InvalidName);
        }

        if speed <= 0 {
            return Err(CommandError::InvalidSpeed(speed));
        }

        Ok(Self {
            name: name.to_string(),
            speed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_command() {
        let cmd = Command::new("Bob", 2).unwrap();
        assert_eq!(cmd.name(), "Bob");
        assert_eq!(cmd.speed(), 2);
    }

    #[test]
    fn test_invalid_command() {
        assert_eq!(Command::new("", 2), Err(CommandError::InvalidName));
        assert_eq!(Command::new("Bob", 0), Err(CommandError::InvalidSpeed(0)));
        assert_eq!(Command::new("Bob", -1), Err(CommandError::InvalidSpeed(-1)));
    }
}
