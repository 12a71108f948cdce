//! Move Couriers Command
//!
//! Carries no payload; one invocation advances every assigned order by one
//! movement tick.

/// Command to run one movement pass
#[derive(Debug, Clone, Default)]
pub struct Command;

impl Command {
    pub fn new() -> Self {
        Self
    }
}
