//! Storage Place Entity
//!
//! A single storage slot inside a courier. A slot is either empty or holds
//! exactly one order.

use std::fmt;

use uuid::Uuid;

/// Storage place errors
#[derive(Debug, Clone, PartialEq)]
pub enum StoragePlaceError {
    /// Name is blank after trimming
    InvalidName,
    /// Volume must be positive
    InvalidVolume(i32),
    /// Order ID must not be nil
    InvalidOrderId,
    /// Slot is occupied or the order does not fit
    CannotStore,
    /// Slot is already empty
    AlreadyClear,
}

impl fmt::Display for StoragePlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoragePlaceError::InvalidName => write!(f, "Name must not be blank"),
            StoragePlaceError::InvalidVolume(v) => {
                write!(f, "Invalid volume: {}. Must be positive", v)
            }
            StoragePlaceError::InvalidOrderId => write!(f, "Order ID must not be nil"),
            StoragePlaceError::CannotStore => write!(f, "Can not store order"),
            StoragePlaceError::AlreadyClear => write!(f, "Store already clear"),
        }
    }
}

impl std::error::Error for StoragePlaceError {}

/// Storage place entity - identified by its id, not its attributes
#[derive(Debug, Clone)]
pub struct StoragePlace {
    /// Unique identifier
    id: Uuid,
    /// Human-readable slot name (e.g. "Bag")
    name: String,
    /// Capacity of the slot
    total_volume: i32,
    /// Occupying order, if any
    order_id: Option<Uuid>,
}

impl PartialEq for StoragePlace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StoragePlace {}

impl StoragePlace {
    /// Create a new empty storage place
    pub fn new(name: &str, total_volume: i32) -> Result<Self, StoragePlaceError> {
        if name.trim().is_empty() {
            return Err(StoragePlaceError::InvalidName);
        }

        if total_volume <= 0 {
            return Err(StoragePlaceError::InvalidVolume(total_volume));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            total_volume,
            order_id: None,
        })
    }

    /// Reconstruct a storage place from persistence (used by repository)
    pub fn restore(id: Uuid, name: String, total_volume: i32, order_id: Option<Uuid>) -> Self {
        Self {
            id,
            name,
            total_volume,
            order_id,
        }
    }

    /// Get slot ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get slot name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get slot capacity
    pub fn total_volume(&self) -> i32 {
        self.total_volume
    }

    /// Get the occupying order, if any
    pub fn order_id(&self) -> Option<Uuid> {
        self.order_id
    }

    /// Whether the slot currently holds an order
    pub fn is_occupied(&self) -> bool {
        self.order_id.is_some()
    }

    /// Check whether a volume would fit into this slot.
    ///
    /// Returns `false` when the slot is occupied; rejects non-positive
    /// volumes with a validation error.
    pub fn can_store(&self, volume: i32) -> Result<bool, StoragePlaceError> {
        if volume <= 0 {
            return Err(StoragePlaceError::InvalidVolume(volume));
        }

        if self.is_occupied() {
            return Ok(false);
        }

        Ok(volume <= self.total_volume)
    }

    /// Put an order into the slot.
    pub fn store(&mut self, order_id: Uuid, volume: i32) -> Result<(), StoragePlaceError> {
        if order_id.is_nil() {
            return Err(StoragePlaceError::InvalidOrderId);
        }

        if !self.can_store(volume)? {
            return Err(StoragePlaceError::CannotStore);
        }

        self.order_id = Some(order_id);

        Ok(())
    }

    /// Empty the slot.
    pub fn clear(&mut self) -> Result<(), StoragePlaceError> {
        if !self.is_occupied() {
            return Err(StoragePlaceError::AlreadyClear);
        }

        self.order_id = None;

        Ok(())
    }
}
