//! Kafka Messaging
//!
//! Event-bus ingress adapters.

pub mod basket_consumer;

pub use basket_consumer::BasketConfirmedConsumer;
