//! Dependency Injection Module
//!
//! Provides application state and dependency wiring.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::info;

use crate::config::Config;
use crate::domain::ports::RandomLocationProvider;
use crate::domain::services::OrderDispatcher;
use crate::infrastructure::geo::GeoGrpcClient;
use crate::infrastructure::messaging::BasketConfirmedConsumer;
use crate::infrastructure::repository::PostgresUnitOfWorkFactory;
use crate::jobs::{assign_orders_job, move_couriers_job, AssignOrdersJob, MoveCouriersJob};
use crate::usecases::command::{assign_orders, create_courier, create_order, move_couriers};
use crate::usecases::query::{get_couriers, get_orders};

/// Concrete handler types wired against PostgreSQL and the gRPC geo client
pub type CreateCourierHandler =
    create_courier::Handler<PostgresUnitOfWorkFactory, RandomLocationProvider>;
pub type CreateOrderHandler = create_order::Handler<PostgresUnitOfWorkFactory, GeoGrpcClient>;
pub type AssignOrdersHandler = assign_orders::Handler<PostgresUnitOfWorkFactory>;
pub type MoveCouriersHandler = move_couriers::Handler<PostgresUnitOfWorkFactory>;
pub type BasketConsumer = BasketConfirmedConsumer<PostgresUnitOfWorkFactory, GeoGrpcClient>;

/// DI initialization errors
#[derive(Debug, Error)]
pub enum DiError {
    #[error("Database connection failed: {0}")]
    DatabaseError(String),

    #[error("Migration failed: {0}")]
    MigrationError(String),

    #[error("Geo client setup failed: {0}")]
    GeoError(String),

    #[error("Kafka connection failed: {0}")]
    KafkaError(String),
}

/// Application state containing all dependencies
pub struct AppState {
    /// Command handlers
    pub create_courier_handler: Arc<CreateCourierHandler>,
    pub create_order_handler: Arc<CreateOrderHandler>,
    pub assign_orders_handler: Arc<AssignOrdersHandler>,
    pub move_couriers_handler: Arc<MoveCouriersHandler>,

    /// Query handlers (read straight from the shared connection)
    pub get_couriers_handler: get_couriers::Handler,
    pub get_orders_handler: get_orders::Handler,

    /// Database connection
    pub db: DatabaseConnection,

    /// Shutdown signal sender
    pub shutdown_tx: broadcast::Sender<()>,

    config: Config,
}

impl AppState {
    /// Create a new AppState with all dependencies initialized
    pub async fn new(config: &Config) -> Result<Self, DiError> {
        info!("Initializing application state...");

        info!("Connecting to PostgreSQL...");
        let db = Database::connect(&config.database_url)
            .await
            .map_err(|e| DiError::DatabaseError(e.to_string()))?;
        info!("PostgreSQL connected");

        info!("Running migrations...");
        Migrator::up(&db, None)
            .await
            .map_err(|e| DiError::MigrationError(e.to_string()))?;
        info!("Migrations applied");

        let geo_client = Arc::new(
            GeoGrpcClient::connect(&config.geo_service_grpc_host)
                .map_err(|e| DiError::GeoError(e.to_string()))?,
        );

        let uow_factory = Arc::new(PostgresUnitOfWorkFactory::new(db.clone()));
        let location_provider = Arc::new(RandomLocationProvider);

        let create_courier_handler = Arc::new(create_courier::Handler::new(
            uow_factory.clone(),
            location_provider,
        ));
        let create_order_handler = Arc::new(create_order::Handler::new(
            uow_factory.clone(),
            geo_client,
        ));
        let assign_orders_handler = Arc::new(assign_orders::Handler::new(
            uow_factory.clone(),
            OrderDispatcher::new(),
        ));
        let move_couriers_handler = Arc::new(move_couriers::Handler::new(uow_factory));

        let get_couriers_handler = get_couriers::Handler::new(db.clone());
        let get_orders_handler = get_orders::Handler::new(db.clone());

        let (shutdown_tx, _) = broadcast::channel(1);

        info!("Application state initialized");

        Ok(Self {
            create_courier_handler,
            create_order_handler,
            assign_orders_handler,
            move_couriers_handler,
            get_couriers_handler,
            get_orders_handler,
            db,
            shutdown_tx,
            config: config.clone(),
        })
    }

    /// Start the basket confirmation consumer as a background task
    pub async fn start_consumers(&self) -> Result<(), DiError> {
        info!("Starting basket consumer...");

        let consumer: BasketConsumer = BasketConfirmedConsumer::new(
            &self.config.kafka_host,
            &self.config.kafka_consumer_group,
            &self.config.kafka_basket_confirmed_topic,
            self.create_order_handler.clone(),
            self.shutdown_tx.subscribe(),
        )
        .map_err(DiError::KafkaError)?;

        tokio::spawn(async move {
            consumer.run().await;
        });

        info!("Basket consumer started");

        Ok(())
    }

    /// Start the assignment and movement jobs as background tasks
    pub fn start_jobs(&self) {
        let assign_job = AssignOrdersJob::new(
            self.assign_orders_handler.clone(),
            assign_orders_job::DEFAULT_PERIOD,
        );
        let assign_shutdown = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            assign_job.run(assign_shutdown).await;
        });

        let move_job = MoveCouriersJob::new(
            self.move_couriers_handler.clone(),
            move_couriers_job::DEFAULT_PERIOD,
        );
        let move_shutdown = self.shutdown_tx.subscribe();
        tokio::spawn(async move {
            move_job.run(move_shutdown).await;
        });
    }

    /// Shutdown the application
    pub fn shutdown(&self) {
        info!("Sending shutdown signal...");
        let _ = self.shutdown_tx.send(());
    }
}
