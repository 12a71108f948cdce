//! Order Dispatch Domain Service
//!
//! Selects the courier that will service an order. This is a domain service
//! because it operates on multiple aggregates (Order and Courier) and the
//! selection rule belongs to no single one of them.

use std::fmt;

use crate::domain::model::courier::{Courier, CourierError};
use crate::domain::model::order::{Order, OrderError, OrderStatus};

/// Dispatch errors
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// At least one candidate courier is required
    CouriersRequired,
    /// The order is no longer waiting for a courier
    OrderAlreadyAssigned,
    /// No candidate can take the order
    NoSuitableCourier,
    /// Courier rule violation while claiming the order
    Courier(CourierError),
    /// Order rule violation while attaching the courier
    Order(OrderError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::CouriersRequired => write!(f, "Couriers are required"),
            DispatchError::OrderAlreadyAssigned => write!(f, "Order is already assigned"),
            DispatchError::NoSuitableCourier => write!(f, "No suitable courier"),
            DispatchError::Courier(e) => write!(f, "{}", e),
            DispatchError::Order(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

impl From<CourierError> for DispatchError {
    fn from(e: CourierError) -> Self {
        DispatchError::Courier(e)
    }
}

impl From<OrderError> for DispatchError {
    fn from(e: OrderError) -> Self {
        DispatchError::Order(e)
    }
}

/// Dispatcher for pairing a created order with the fastest free courier.
#[derive(Debug, Default)]
pub struct OrderDispatcher;

impl OrderDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Pick the courier that will service the order and pair them up.
    ///
    /// Candidates that can take the order are scored by travel time to the
    /// order location; the strictly smallest time wins and ties keep the
    /// first candidate seen. On the winner `take_order` and `assign` are
    /// applied, so both aggregates are mutated and must be persisted
    /// together by the caller.
    pub fn dispatch<'a>(
        &self,
        order: &mut Order,
        couriers: &'a mut [Courier],
    ) -> Result<&'a Courier, DispatchError> {
        if couriers.is_empty() {
            return Err(DispatchError::CouriersRequired);
        }

        if order.status() != OrderStatus::Created {
            return Err(DispatchError::OrderAlreadyAssigned);
        }

        let mut best: Option<(usize, f64)> = None;

        for (idx, courier) in couriers.iter().enumerate() {
            if !courier.can_take_order(order)? {
                continue;
            }

            let time = courier.time_to_location(order.location())?;

            match best {
                Some((_, best_time)) if time >= best_time => {}
                _ => best = Some((idx, time)),
            }
        }

        let (idx, _) = best.ok_or(DispatchError::NoSuitableCourier)?;

        let courier = &mut couriers[idx];
        courier.take_order(order)?;
        order.assign(courier.id())?;

        Ok(&couriers[idx])
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::domain::model::vo::Location;

    use super::*;

    fn location(x: i32, y: i32) -> Location {
        Location::new(x, y).unwrap()
    }

    fn create_courier(name: &str, speed: i32, x: i32, y: i32) -> Courier {
        Courier::new(name, speed, location(x, y)).unwrap()
    }

    fn create_order(x: i32, y: i32, volume: i32) -> Order {
        Order::new(Uuid::new_v4(), location(x, y), volume).unwrap()
    }

    #[test]
    fn test_nearest_courier_wins() {
        let mut couriers = vec![
            create_courier("Bob", 1, 1, 1),   // time to (1,1): 0
            create_courier("Alice", 2, 3, 3), // time to (1,1): 2
        ];
        let bob_id = couriers[0].id();
        let mut order = create_order(1, 1, 5);

        let dispatcher = OrderDispatcher::new();
        let chosen = dispatcher.dispatch(&mut order, &mut couriers).unwrap();

        assert_eq!(chosen.id(), bob_id);
        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(order.courier_id(), Some(bob_id));
        assert_eq!(
            couriers[0].storage_places()[0].order_id(),
            Some(order.id())
        );
        assert!(!couriers[1].storage_places()[0].is_occupied());
    }

    #[test]
    fn test_faster_courier_beats_closer_slow_one() {
        let mut couriers = vec![
            create_courier("Walker", 1, 5, 5), // distance 8, time 8
            create_courier("Driver", 5, 10, 10), // distance 18, time 3.6
        ];
        let driver_id = couriers[1].id();
        let mut order = create_order(1, 1, 5);

        let chosen = OrderDispatcher::new()
            .dispatch(&mut order, &mut couriers)
            .unwrap();

        assert_eq!(chosen.id(), driver_id);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let mut couriers = vec![
            create_courier("First", 2, 5, 5),
            create_courier("Second", 2, 5, 5),
        ];
        let first_id = couriers[0].id();
        let mut order = create_order(1, 1, 5);

        let chosen = OrderDispatcher::new()
            .dispatch(&mut order, &mut couriers)
            .unwrap();

        assert_eq!(chosen.id(), first_id);
    }

    #[test]
    fn test_no_suitable_courier_on_capacity() {
        // Default bag capacity is 10; a volume-15 order fits nobody
        let mut couriers = vec![create_courier("Bob", 1, 1, 1)];
        let mut order = create_order(1, 1, 15);

        let result = OrderDispatcher::new().dispatch(&mut order, &mut couriers);

        assert_eq!(result.unwrap_err(), DispatchError::NoSuitableCourier);
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(!couriers[0].storage_places()[0].is_occupied());
    }

    #[test]
    fn test_empty_couriers_required() {
        let mut order = create_order(1, 1, 5);

        let result = OrderDispatcher::new().dispatch(&mut order, &mut []);

        assert_eq!(result.unwrap_err(), DispatchError::CouriersRequired);
    }

    #[test]
    fn test_rejects_already_assigned_order() {
        let mut couriers = vec![create_courier("Bob", 1, 1, 1)];
        let mut order = create_order(1, 1, 5);
        order.assign(Uuid::new_v4()).unwrap();

        let result = OrderDispatcher::new().dispatch(&mut order, &mut couriers);

        assert_eq!(result.unwrap_err(), DispatchError::OrderAlreadyAssigned);
        assert!(!couriers[0].storage_places()[0].is_occupied());
    }

    #[test]
    fn test_dispatch_is_idempotent_per_order() {
        let mut couriers = vec![
            create_courier("Bob", 1, 1, 1),
            create_courier("Alice", 2, 3, 3),
        ];
        let mut order = create_order(1, 1, 5);

        let dispatcher = OrderDispatcher::new();
        dispatcher.dispatch(&mut order, &mut couriers).unwrap();

        // Second dispatch refuses and leaves the untouched courier untouched
        let result = dispatcher.dispatch(&mut order, &mut couriers);
        assert_eq!(result.unwrap_err(), DispatchError::OrderAlreadyAssigned);
        assert!(!couriers[1].storage_places()[0].is_occupied());
    }
}
