//! Courier Aggregate Entity
//!
//! The Courier aggregate represents a delivery courier on the grid.
//! It owns an ordered set of storage places and moves one tick at a time
//! toward an assigned order.

use std::fmt;

use uuid::Uuid;

use crate::domain::model::order::Order;
use crate::domain::model::vo::location::LocationError;
use crate::domain::model::vo::Location;

use super::storage_place::{StoragePlace, StoragePlaceError};

/// Every courier is constructed with this default slot
pub const DEFAULT_BAG_NAME: &str = "Bag";
pub const DEFAULT_BAG_VOLUME: i32 = 10;

/// Courier aggregate errors
#[derive(Debug, Clone, PartialEq)]
pub enum CourierError {
    /// Name must not be empty
    InvalidName,
    /// Speed must be positive
    InvalidSpeed(i32),
    /// Location must come from a validating constructor
    InvalidLocation,
    /// Target location must come from a validating constructor
    InvalidTarget,
    /// The first empty storage place cannot fit the order
    NoSuitablePlace,
    /// No storage place holds the given order
    OrderNotFound(Uuid),
    /// Storage place rule violation
    StoragePlace(StoragePlaceError),
    /// Movement produced an off-grid location
    Location(LocationError),
}

impl fmt::Display for CourierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourierError::InvalidName => write!(f, "Name must not be empty"),
            CourierError::InvalidSpeed(s) => {
                write!(f, "Invalid speed: {}. Must be positive", s)
            }
            CourierError::InvalidLocation => write!(f, "Location is not valid"),
            CourierError::InvalidTarget => write!(f, "Target location is not valid"),
            CourierError::NoSuitablePlace => write!(f, "No suitable place"),
            CourierError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            CourierError::StoragePlace(e) => write!(f, "{}", e),
            CourierError::Location(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CourierError {}

impl From<StoragePlaceError> for CourierError {
    fn from(e: StoragePlaceError) -> Self {
        CourierError::StoragePlace(e)
    }
}

impl From<LocationError> for CourierError {
    fn from(e: LocationError) -> Self {
        CourierError::Location(e)
    }
}

/// Courier aggregate - identified by its id, not its attributes
#[derive(Debug, Clone)]
pub struct Courier {
    /// Unique identifier
    id: Uuid,
    /// Courier name
    name: String,
    /// Grid cells covered per tick
    speed: i32,
    /// Current location
    location: Location,
    /// Ordered storage slots; never empty, slots are never removed
    storage_places: Vec<StoragePlace>,
}

impl PartialEq for Courier {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Courier {}

impl Courier {
    /// Create a new courier carrying the default bag.
    pub fn new(name: &str, speed: i32, location: Location) -> Result<Self, CourierError> {
        if name.is_empty() {
            return Err(CourierError::InvalidName);
        }

        if speed <= 0 {
            return Err(CourierError::InvalidSpeed(speed));
        }

        if !location.is_valid() {
            return Err(CourierError::InvalidLocation);
        }

        let mut courier = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            speed,
            location,
            storage_places: Vec::new(),
        };

        courier.add_storage_place(DEFAULT_BAG_NAME, DEFAULT_BAG_VOLUME)?;

        Ok(courier)
    }

    /// Reconstruct a courier from persistence (used by repository)
    pub fn restore(
        id: Uuid,
        name: String,
        speed: i32,
        location: Location,
        storage_places: Vec<StoragePlace>,
    ) -> Self {
        Self {
            id,
            name,
            speed,
            location,
            storage_places,
        }
    }

    // === Getters ===

    /// Get courier ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get courier name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get speed in cells per tick
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Get current location
    pub fn location(&self) -> Location {
        self.location
    }

    /// Get the storage places in insertion order
    pub fn storage_places(&self) -> &[StoragePlace] {
        &self.storage_places
    }

    // === Business Methods ===

    /// Add another storage slot. Slots may be added but never removed.
    pub fn add_storage_place(&mut self, name: &str, volume: i32) -> Result<(), CourierError> {
        let place = StoragePlace::new(name, volume)?;
        self.storage_places.push(place);

        Ok(())
    }

    /// Check whether this courier could take the order.
    ///
    /// Only the first empty slot is consulted: the courier can take the
    /// order iff the order fits into it. Returns `false` when every slot is
    /// occupied.
    pub fn can_take_order(&self, order: &Order) -> Result<bool, CourierError> {
        for place in &self.storage_places {
            if place.is_occupied() {
                continue;
            }

            return Ok(place.can_store(order.volume())?);
        }

        Ok(false)
    }

    /// Put the order into the first empty slot.
    ///
    /// If the first empty slot cannot fit the order, later empty slots are
    /// not consulted and `NoSuitablePlace` is returned.
    pub fn take_order(&mut self, order: &Order) -> Result<(), CourierError> {
        for place in &mut self.storage_places {
            if place.is_occupied() {
                continue;
            }

            if !place.can_store(order.volume())? {
                return Err(CourierError::NoSuitablePlace);
            }

            place.store(order.id(), order.volume())?;

            return Ok(());
        }

        Err(CourierError::NoSuitablePlace)
    }

    /// Release the slot holding the given order.
    pub fn complete_order(&mut self, order: &Order) -> Result<(), CourierError> {
        let order_id = order.id();

        let place = self
            .storage_places
            .iter_mut()
            .find(|place| place.order_id() == Some(order_id))
            .ok_or(CourierError::OrderNotFound(order_id))?;

        place.clear()?;

        Ok(())
    }

    /// Number of ticks needed to reach the target at the current speed.
    pub fn time_to_location(&self, target: Location) -> Result<f64, CourierError> {
        if !target.is_valid() {
            return Err(CourierError::InvalidTarget);
        }

        let distance = self.location.distance_to(&target);

        Ok(f64::from(distance) / f64::from(self.speed))
    }

    /// Advance by at most `speed` cells toward the target.
    ///
    /// The movement budget is spent on the x axis first; whatever remains
    /// goes to the y axis. The resulting location is always on the grid.
    pub fn move_towards(&mut self, target: Location) -> Result<(), CourierError> {
        if !target.is_valid() {
            return Err(CourierError::InvalidTarget);
        }

        let dx = target.x() - self.location.x();
        let dy = target.y() - self.location.y();
        let mut remaining = self.speed;

        let step_x = dx.signum() * dx.abs().min(remaining);
        remaining -= step_x.abs();

        let step_y = dy.signum() * dy.abs().min(remaining);

        self.location = Location::new(self.location.x() + step_x, self.location.y() + step_y)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(x: i32, y: i32) -> Location {
        Location::new(x, y).unwrap()
    }

    fn create_test_courier() -> Courier {
        Courier::new("Bob", 2, location(1, 1)).unwrap()
    }

    fn create_test_order(volume: i32) -> Order {
        Order::new(Uuid::new_v4(), location(5, 5), volume).unwrap()
    }

    #[test]
    fn test_courier_creation() {
        let courier = create_test_courier();

        assert_eq!(courier.name(), "Bob");
        assert_eq!(courier.speed(), 2);
        assert_eq!(courier.location(), location(1, 1));

        // Construction adds exactly one default bag
        assert_eq!(courier.storage_places().len(), 1);
        assert_eq!(courier.storage_places()[0].name(), DEFAULT_BAG_NAME);
        assert_eq!(courier.storage_places()[0].total_volume(), DEFAULT_BAG_VOLUME);
    }

    #[test]
    fn test_courier_creation_invalid() {
        assert!(matches!(
            Courier::new("", 2, location(1, 1)),
            Err(CourierError::InvalidName)
        ));
        assert!(matches!(
            Courier::new("Bob", 0, location(1, 1)),
            Err(CourierError::InvalidSpeed(0))
        ));
        assert!(matches!(
            Courier::new("Bob", -1, location(1, 1)),
            Err(CourierError::InvalidSpeed(-1))
        ));
        assert!(matches!(
            Courier::new("Bob", 2, Location::default()),
            Err(CourierError::InvalidLocation)
        ));
    }

    #[test]
    fn test_add_storage_place() {
        let mut courier = create_test_courier();

        courier.add_storage_place("Trunk", 20).unwrap();

        assert_eq!(courier.storage_places().len(), 2);
        assert_eq!(courier.storage_places()[1].name(), "Trunk");
    }

    #[test]
    fn test_can_take_order() {
        let courier = create_test_courier();

        assert!(courier.can_take_order(&create_test_order(5)).unwrap());
        assert!(courier.can_take_order(&create_test_order(10)).unwrap());
        assert!(!courier.can_take_order(&create_test_order(11)).unwrap());
    }

    #[test]
    fn test_can_take_order_all_slots_occupied() {
        let mut courier = create_test_courier();
        courier.take_order(&create_test_order(5)).unwrap();

        assert!(!courier.can_take_order(&create_test_order(1)).unwrap());
    }

    #[test]
    fn test_take_order() {
        let mut courier = create_test_courier();
        let order = create_test_order(5);

        courier.take_order(&order).unwrap();

        assert_eq!(courier.storage_places()[0].order_id(), Some(order.id()));
    }

    #[test]
    fn test_take_order_no_suitable_place() {
        let mut courier = create_test_courier();

        let result = courier.take_order(&create_test_order(11));
        assert_eq!(result, Err(CourierError::NoSuitablePlace));
    }

    #[test]
    fn test_take_order_only_first_empty_slot_is_consulted() {
        let mut courier = create_test_courier();
        courier.take_order(&create_test_order(5)).unwrap();

        // First empty slot is now the bag-sized one; a roomier later slot
        // does not rescue an order that exceeds it
        courier.add_storage_place("Small", 2).unwrap();
        courier.add_storage_place("Trunk", 50).unwrap();
        // Occupy nothing else: first empty is "Small"
        let result = courier.take_order(&create_test_order(20));
        assert_eq!(result, Err(CourierError::NoSuitablePlace));
    }

    #[test]
    fn test_complete_order() {
        let mut courier = create_test_courier();
        let order = create_test_order(5);
        courier.take_order(&order).unwrap();

        courier.complete_order(&order).unwrap();

        assert!(!courier.storage_places()[0].is_occupied());
    }

    #[test]
    fn test_complete_order_not_found() {
        let mut courier = create_test_courier();
        let order = create_test_order(5);

        let result = courier.complete_order(&order);
        assert_eq!(result, Err(CourierError::OrderNotFound(order.id())));
    }

    #[test]
    fn test_time_to_location() {
        let courier = create_test_courier(); // at (1,1), speed 2

        let time = courier.time_to_location(location(5, 5)).unwrap();
        assert_eq!(time, 4.0); // distance 8 / speed 2

        let time = courier.time_to_location(location(1, 1)).unwrap();
        assert_eq!(time, 0.0);
    }

    #[test]
    fn test_time_to_location_invalid_target() {
        let courier = create_test_courier();

        assert!(matches!(
            courier.time_to_location(Location::default()),
            Err(CourierError::InvalidTarget)
        ));
    }

    #[test]
    fn test_move_spends_x_budget_first() {
        let mut courier = Courier::new("Bob", 3, location(1, 1)).unwrap();

        courier.move_towards(location(4, 5)).unwrap();
        assert_eq!(courier.location(), location(4, 1));

        courier.move_towards(location(4, 5)).unwrap();
        assert_eq!(courier.location(), location(4, 4));

        courier.move_towards(location(4, 5)).unwrap();
        assert_eq!(courier.location(), location(4, 5));
    }

    #[test]
    fn test_move_does_not_overshoot() {
        let mut courier = Courier::new("Bob", 5, location(9, 9)).unwrap();

        courier.move_towards(location(10, 10)).unwrap();
        assert_eq!(courier.location(), location(10, 10));
    }

    #[test]
    fn test_move_towards_negative_direction() {
        let mut courier = Courier::new("Bob", 3, location(8, 8)).unwrap();

        courier.move_towards(location(5, 1)).unwrap();
        assert_eq!(courier.location(), location(5, 8));

        courier.move_towards(location(5, 1)).unwrap();
        assert_eq!(courier.location(), location(5, 5));
    }

    #[test]
    fn test_move_never_increases_distance_beyond_budget() {
        let mut courier = Courier::new("Bob", 2, location(2, 3)).unwrap();
        let target = location(9, 10);

        loop {
            let before = courier.location().distance_to(&target);
            courier.move_towards(target).unwrap();
            let after = courier.location().distance_to(&target);

            assert!(after <= (before - courier.speed()).max(0));
            assert!(courier.location().is_valid());

            if after == 0 {
                break;
            }
        }

        assert_eq!(courier.location(), target);
    }

    #[test]
    fn test_move_invalid_target() {
        let mut courier = create_test_courier();

        assert!(matches!(
            courier.move_towards(Location::default()),
            Err(CourierError::InvalidTarget)
        ));
    }

    #[test]
    fn test_equality_is_by_identity() {
        let courier1 = create_test_courier();
        let courier2 = create_test_courier();

        assert_ne!(courier1, courier2);

        let restored = Courier::restore(
            courier1.id(),
            "Someone else".to_string(),
            9,
            location(9, 9),
            vec![],
        );
        assert_eq!(courier1, restored);
    }
}
