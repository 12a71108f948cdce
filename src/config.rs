//! Configuration Module
//!
//! Loads configuration from environment variables. Every value is required
//! at startup; a missing one aborts the process.

use std::env;

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// HTTP bind address (e.g. "0.0.0.0:8080")
    pub http_addr: String,

    /// Geo service gRPC host (e.g. "geo:5004")
    pub geo_service_grpc_host: String,

    /// Kafka bootstrap host
    pub kafka_host: String,

    /// Kafka consumer group for basket confirmations
    pub kafka_consumer_group: String,

    /// Kafka topic carrying BasketConfirmed events
    pub kafka_basket_confirmed_topic: String,

    /// Log level (e.g. "info", "debug")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required env vars:
    /// - DATABASE_URL: PostgreSQL connection string
    /// - HTTP_ADDR: HTTP bind address
    /// - GEO_SERVICE_GRPC_HOST: geo service host
    /// - KAFKA_HOST: Kafka bootstrap host
    /// - KAFKA_CONSUMER_GROUP: consumer group id
    /// - KAFKA_BASKET_CONFIRMED_TOPIC: basket confirmation topic
    ///
    /// Optional env vars:
    /// - RUST_LOG: log level (default: "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            http_addr: required("HTTP_ADDR")?,
            geo_service_grpc_host: required("GEO_SERVICE_GRPC_HOST")?,
            kafka_host: required("KAFKA_HOST")?,
            kafka_consumer_group: required("KAFKA_CONSUMER_GROUP")?,
            kafka_basket_confirmed_topic: required("KAFKA_BASKET_CONFIRMED_TOPIC")?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key.to_string()))
}
