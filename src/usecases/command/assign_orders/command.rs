//! Assign Orders Command
//!
//! Carries no payload; one invocation assigns at most one order.

/// Command to run one assignment pass
#[derive(Debug, Clone, Default)]
pub struct Command;

impl Command {
    pub fn new() -> Self {
        Self
    }
}
