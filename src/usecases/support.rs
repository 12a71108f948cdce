//! In-memory unit of work for handler tests.
//!
//! Writes apply immediately and are visible through the shared store; the
//! transaction flags only reproduce the begin/commit bookkeeping so that
//! handlers exercise the same call sequence they use in production.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::model::courier::Courier;
use crate::domain::model::order::{Order, OrderStatus};
use crate::domain::model::vo::Location;
use crate::domain::ports::{
    CourierRepository, LocationProvider, OrderRepository, RepositoryError, UnitOfWork,
    UnitOfWorkFactory,
};

/// Deterministic start location for courier-creation tests.
pub struct FixedLocationProvider {
    location: Location,
}

impl FixedLocationProvider {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn next_location(&self) -> Location {
        self.location
    }
}

/// Shared backing state for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    couriers: Mutex<Vec<Courier>>,
    orders: Mutex<Vec<Order>>,
    writes: AtomicUsize,
}

impl InMemoryStore {
    /// Seed a courier without counting it as a repository write.
    pub fn seed_courier(&self, courier: Courier) {
        self.couriers.lock().unwrap().push(courier);
    }

    /// Seed an order without counting it as a repository write.
    pub fn seed_order(&self, order: Order) {
        self.orders.lock().unwrap().push(order);
    }

    pub fn courier(&self, id: Uuid) -> Option<Courier> {
        self.couriers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned()
    }

    pub fn order(&self, id: Uuid) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id() == id)
            .cloned()
    }

    pub fn all_couriers(&self) -> Vec<Courier> {
        self.couriers.lock().unwrap().clone()
    }

    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    /// Number of repository writes (add/update) seen so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct InMemoryCourierRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl CourierRepository for InMemoryCourierRepository {
    async fn add(&self, courier: &Courier) -> Result<(), RepositoryError> {
        self.store.count_write();
        self.store.couriers.lock().unwrap().push(courier.clone());
        Ok(())
    }

    async fn update(&self, courier: &Courier) -> Result<(), RepositoryError> {
        self.store.count_write();
        let mut couriers = self.store.couriers.lock().unwrap();
        let existing = couriers
            .iter_mut()
            .find(|c| c.id() == courier.id())
            .ok_or(RepositoryError::NotFound("Courier", courier.id()))?;
        *existing = courier.clone();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Courier, RepositoryError> {
        self.store
            .courier(id)
            .ok_or(RepositoryError::NotFound("Courier", id))
    }

    async fn get_all_free(&self) -> Result<Vec<Courier>, RepositoryError> {
        Ok(self
            .store
            .couriers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.storage_places().iter().any(|p| !p.is_occupied()))
            .cloned()
            .collect())
    }
}

pub struct InMemoryOrderRepository {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn add(&self, order: &Order) -> Result<(), RepositoryError> {
        self.store.count_write();
        self.store.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        self.store.count_write();
        let mut orders = self.store.orders.lock().unwrap();
        let existing = orders
            .iter_mut()
            .find(|o| o.id() == order.id())
            .ok_or(RepositoryError::NotFound("Order", order.id()))?;
        *existing = order.clone();
        Ok(())
    }

    async fn update_in_status(
        &self,
        order: &Order,
        expected: OrderStatus,
    ) -> Result<(), RepositoryError> {
        self.store.count_write();
        let mut orders = self.store.orders.lock().unwrap();
        let existing = orders
            .iter_mut()
            .find(|o| o.id() == order.id())
            .ok_or(RepositoryError::NotFound("Order", order.id()))?;

        if existing.status() != expected {
            return Err(RepositoryError::Conflict("Order", order.id()));
        }

        *existing = order.clone();
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Order, RepositoryError> {
        self.store
            .order(id)
            .ok_or(RepositoryError::NotFound("Order", id))
    }

    async fn get_first_in_created_status(&self) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .store
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.status() == OrderStatus::Created)
            .min_by_key(|o| o.id())
            .cloned())
    }

    async fn get_all_in_assigned_status(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .store
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.status() == OrderStatus::Assigned)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct TxFlags {
    open: bool,
}

pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    flags: Mutex<TxFlags>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Couriers = InMemoryCourierRepository;
    type Orders = InMemoryOrderRepository;

    fn courier_repository(&self) -> Self::Couriers {
        InMemoryCourierRepository {
            store: self.store.clone(),
        }
    }

    fn order_repository(&self) -> Self::Orders {
        InMemoryOrderRepository {
            store: self.store.clone(),
        }
    }

    async fn begin(&self) -> Result<(), RepositoryError> {
        let mut flags = self.flags.lock().unwrap();
        if flags.open {
            return Err(RepositoryError::TransactionError(
                "transaction already open".to_string(),
            ));
        }
        flags.open = true;
        Ok(())
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        let mut flags = self.flags.lock().unwrap();
        if !flags.open {
            return Err(RepositoryError::TransactionError(
                "no open transaction".to_string(),
            ));
        }
        flags.open = false;
        Ok(())
    }

    async fn rollback_unless_committed(&self) -> Result<(), RepositoryError> {
        let mut flags = self.flags.lock().unwrap();
        flags.open = false;
        Ok(())
    }

    async fn in_tx(&self) -> bool {
        self.flags.lock().unwrap().open
    }
}

pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::default()),
        }
    }

    pub fn store(&self) -> Arc<InMemoryStore> {
        self.store.clone()
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    type Uow = InMemoryUnitOfWork;

    async fn create(&self) -> Result<Self::Uow, RepositoryError> {
        Ok(InMemoryUnitOfWork {
            store: self.store.clone(),
            flags: Mutex::new(TxFlags::default()),
        })
    }
}
