//! Kafka Basket Consumer
//!
//! Consumes `BasketConfirmed` events and turns each one into a CreateOrder
//! command. Offsets are committed only after the handler succeeds, so
//! delivery is at-least-once and relies on the handler being idempotent on
//! the order id. Payloads that can never succeed (malformed JSON, invalid
//! fields) are logged and committed to keep the partition moving.

use std::sync::Arc;

use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use rdkafka::ClientConfig;
use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::ports::{GeoClient, UnitOfWorkFactory};
use crate::usecases::command::create_order;

/// Basket confirmation event from the ordering service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketConfirmedEvent {
    /// Order ID, reused as the aggregate id for idempotency
    pub order_id: Uuid,
    /// Delivery street to geocode
    pub street: String,
    /// Order volume
    pub volume: i32,
}

enum ProcessError {
    /// The payload can never be handled; commit and move on
    Malformed(String),
    /// The handler failed; withhold the offset for redelivery
    Handler(create_order::CreateOrderError),
}

/// Consumer for basket confirmations
pub struct BasketConfirmedConsumer<F, G>
where
    F: UnitOfWorkFactory,
    G: GeoClient,
{
    consumer: StreamConsumer,
    handler: Arc<create_order::Handler<F, G>>,
    topic: String,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<F, G> BasketConfirmedConsumer<F, G>
where
    F: UnitOfWorkFactory + 'static,
    G: GeoClient + 'static,
{
    /// Create a new consumer subscribed to the basket topic
    pub fn new(
        brokers: &str,
        group_id: &str,
        topic: &str,
        handler: Arc<create_order::Handler<F, G>>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<Self, String> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "30000")
            .create()
            .map_err(|e| format!("Failed to create Kafka consumer: {}", e))?;

        consumer
            .subscribe(&[topic])
            .map_err(|e| format!("Failed to subscribe to topic {}: {}", topic, e))?;

        info!(topic = %topic, "basket consumer subscribed");

        Ok(Self {
            consumer,
            handler,
            topic: topic.to_string(),
            shutdown_rx,
        })
    }

    /// Run the consumer loop until shutdown
    pub async fn run(mut self) {
        info!(topic = %self.topic, "starting basket consumer");

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("basket consumer received shutdown signal");
                    break;
                }
                message = self.consumer.recv() => {
                    match message {
                        Ok(msg) => {
                            let payload = msg.payload().unwrap_or_default();
                            match self.process_payload(payload).await {
                                Ok(()) => {
                                    if let Err(e) = self.consumer.commit_message(&msg, CommitMode::Async) {
                                        error!(error = %e, "failed to commit offset");
                                    }
                                }
                                Err(ProcessError::Malformed(e)) => {
                                    error!(error = %e, "dropping malformed basket event");
                                    if let Err(e) = self.consumer.commit_message(&msg, CommitMode::Async) {
                                        error!(error = %e, "failed to commit offset");
                                    }
                                }
                                Err(ProcessError::Handler(e)) => {
                                    // No commit: the event is redelivered
                                    error!(error = %e, "failed to create order from basket event");
                                }
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "error receiving message from Kafka");
                        }
                    }
                }
            }
        }

        info!("basket consumer stopped");
    }

    /// Process a single basket confirmation payload
    async fn process_payload(&self, payload: &[u8]) -> Result<(), ProcessError> {
        let event: BasketConfirmedEvent = serde_json::from_slice(payload)
            .map_err(|e| ProcessError::Malformed(format!("invalid basket event: {}", e)))?;

        let command = create_order::Command::new(event.order_id, &event.street, event.volume)
            .map_err(|e| ProcessError::Malformed(e.to_string()))?;

        self.handler
            .handle(command)
            .await
            .map_err(ProcessError::Handler)
    }
}
