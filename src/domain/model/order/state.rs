use std::fmt;

/// Order status representing the delivery lifecycle
///
/// ```text
/// Created -> Assigned -> Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order accepted, waiting for a courier
    Created,
    /// Order is on a courier
    Assigned,
    /// Order delivered
    Completed,
}

impl OrderStatus {
    /// Canonical string form, used by persistence and read models.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Assigned => "assigned",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_form() {
        assert_eq!(OrderStatus::Created.as_str(), "created");
        assert_eq!(OrderStatus::Assigned.as_str(), "assigned");
        assert_eq!(OrderStatus::Completed.as_str(), "completed");
        assert_eq!(OrderStatus::Assigned.to_string(), "assigned");
    }
}
