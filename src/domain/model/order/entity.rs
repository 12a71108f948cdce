//! Order Aggregate Entity
//!
//! The Order aggregate tracks one delivery from creation to completion.
//! The courier side of an assignment is referenced by id only; the reverse
//! direction lives in the courier's storage places.

use std::fmt;

use uuid::Uuid;

use crate::domain::model::vo::Location;

use super::state::OrderStatus;

/// Order aggregate errors
#[derive(Debug, Clone, PartialEq)]
pub enum OrderError {
    /// Order ID must not be nil
    InvalidId,
    /// Volume must be positive
    InvalidVolume(i32),
    /// Location must come from a validating constructor
    InvalidLocation,
    /// Courier ID must not be nil
    InvalidCourierId,
    /// A courier is already assigned
    AlreadyAssigned,
    /// The status does not permit the operation
    InvalidStatus(OrderStatus),
    /// The order was already completed
    AlreadyCompleted,
    /// Completion requires an assigned order
    NotAssigned,
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::InvalidId => write!(f, "Order ID must not be nil"),
            OrderError::InvalidVolume(v) => {
                write!(f, "Invalid volume: {}. Must be positive", v)
            }
            OrderError::InvalidLocation => write!(f, "Location is not valid"),
            OrderError::InvalidCourierId => write!(f, "Courier ID must not be nil"),
            OrderError::AlreadyAssigned => write!(f, "Courier already assigned"),
            OrderError::InvalidStatus(s) => write!(f, "Invalid order status: {}", s),
            OrderError::AlreadyCompleted => write!(f, "Order already completed"),
            OrderError::NotAssigned => write!(f, "Order not assigned"),
        }
    }
}

impl std::error::Error for OrderError {}

/// Order aggregate - identified by its id, not its attributes
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique identifier, supplied by the upstream basket
    id: Uuid,
    /// Assigned courier, if any
    courier_id: Option<Uuid>,
    /// Delivery destination
    location: Location,
    /// Order volume
    volume: i32,
    /// Lifecycle status
    status: OrderStatus,
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl Order {
    /// Create a new order in `Created` status.
    pub fn new(id: Uuid, location: Location, volume: i32) -> Result<Self, OrderError> {
        if id.is_nil() {
            return Err(OrderError::InvalidId);
        }

        if volume <= 0 {
            return Err(OrderError::InvalidVolume(volume));
        }

        if !location.is_valid() {
            return Err(OrderError::InvalidLocation);
        }

        Ok(Self {
            id,
            courier_id: None,
            location,
            volume,
            status: OrderStatus::Created,
        })
    }

    /// Reconstruct an order from persistence (used by repository)
    pub fn restore(
        id: Uuid,
        courier_id: Option<Uuid>,
        location: Location,
        volume: i32,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            courier_id,
            location,
            volume,
            status,
        }
    }

    // === Getters ===

    /// Get order ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get the assigned courier, if any
    pub fn courier_id(&self) -> Option<Uuid> {
        self.courier_id
    }

    /// Get the delivery destination
    pub fn location(&self) -> Location {
        self.location
    }

    /// Get the order volume
    pub fn volume(&self) -> i32 {
        self.volume
    }

    /// Get the lifecycle status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    // === Business Methods ===

    /// Attach a courier and move to `Assigned`.
    pub fn assign(&mut self, courier_id: Uuid) -> Result<(), OrderError> {
        if self.courier_id.is_some() {
            return Err(OrderError::AlreadyAssigned);
        }

        if courier_id.is_nil() {
            return Err(OrderError::InvalidCourierId);
        }

        if self.status != OrderStatus::Created {
            return Err(OrderError::InvalidStatus(self.status));
        }

        self.courier_id = Some(courier_id);
        self.status = OrderStatus::Assigned;

        Ok(())
    }

    /// Move to `Completed`.
    pub fn complete(&mut self) -> Result<(), OrderError> {
        if self.status == OrderStatus::Completed {
            return Err(OrderError::AlreadyCompleted);
        }

        if self.status != OrderStatus::Assigned {
            return Err(OrderError::NotAssigned);
        }

        if self.courier_id.is_none() {
            return Err(OrderError::InvalidCourierId);
        }

        self.status = OrderStatus::Completed;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(x: i32, y: i32) -> Location {
        Location::new(x, y).unwrap()
    }

    fn create_test_order() -> Order {
        Order::new(Uuid::new_v4(), location(3, 4), 5).unwrap()
    }

    #[test]
    fn test_order_creation() {
        let id = Uuid::new_v4();
        let order = Order::new(id, location(3, 4), 5).unwrap();

        assert_eq!(order.id(), id);
        assert_eq!(order.courier_id(), None);
        assert_eq!(order.location(), location(3, 4));
        assert_eq!(order.volume(), 5);
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_order_creation_invalid() {
        assert!(matches!(
            Order::new(Uuid::nil(), location(3, 4), 5),
            Err(OrderError::InvalidId)
        ));
        assert!(matches!(
            Order::new(Uuid::new_v4(), location(3, 4), 0),
            Err(OrderError::InvalidVolume(0))
        ));
        assert!(matches!(
            Order::new(Uuid::new_v4(), location(3, 4), -2),
            Err(OrderError::InvalidVolume(-2))
        ));
        assert!(matches!(
            Order::new(Uuid::new_v4(), Location::default(), 5),
            Err(OrderError::InvalidLocation)
        ));
    }

    #[test]
    fn test_assign() {
        let mut order = create_test_order();
        let courier_id = Uuid::new_v4();

        order.assign(courier_id).unwrap();

        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(order.courier_id(), Some(courier_id));
    }

    #[test]
    fn test_assign_twice_fails() {
        let mut order = create_test_order();
        order.assign(Uuid::new_v4()).unwrap();

        let result = order.assign(Uuid::new_v4());
        assert_eq!(result, Err(OrderError::AlreadyAssigned));
        assert_eq!(order.status(), OrderStatus::Assigned);
    }

    #[test]
    fn test_assign_nil_courier_fails() {
        let mut order = create_test_order();

        let result = order.assign(Uuid::nil());
        assert_eq!(result, Err(OrderError::InvalidCourierId));
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_assign_requires_created_status() {
        let mut order = Order::restore(
            Uuid::new_v4(),
            None,
            location(3, 4),
            5,
            OrderStatus::Completed,
        );

        let result = order.assign(Uuid::new_v4());
        assert_eq!(
            result,
            Err(OrderError::InvalidStatus(OrderStatus::Completed))
        );
    }

    #[test]
    fn test_complete() {
        let mut order = create_test_order();
        order.assign(Uuid::new_v4()).unwrap();

        order.complete().unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_complete_requires_assigned_status() {
        let mut order = create_test_order();

        let result = order.complete();
        assert_eq!(result, Err(OrderError::NotAssigned));
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut order = create_test_order();
        order.assign(Uuid::new_v4()).unwrap();
        order.complete().unwrap();

        let result = order.complete();
        assert_eq!(result, Err(OrderError::AlreadyCompleted));
    }

    #[test]
    fn test_equality_is_by_identity() {
        let order1 = create_test_order();
        let order2 = create_test_order();

        assert_ne!(order1, order2);

        let restored = Order::restore(
            order1.id(),
            Some(Uuid::new_v4()),
            location(9, 9),
            1,
            OrderStatus::Assigned,
        );
        assert_eq!(order1, restored);
    }
}
