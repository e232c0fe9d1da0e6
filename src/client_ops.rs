// src/client_ops.rs
//
// Trait abstraction over the billing provider's resource operations.
// Integration code written against `ResourceOps` runs unchanged against the
// simulator in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ProviderError;

/// The four verbs the provider client exposes per resource collection
/// (`customers`, `subscriptions`).
#[async_trait]
pub trait ResourceOps: Send + Sync {
    /// Create the resource from `options`.
    async fn create(&self, options: Value) -> Result<Value, ProviderError>;

    /// Fetch the resource by id.
    async fn retrieve(&self, id: &str) -> Result<Value, ProviderError>;

    /// Apply `options` to the resource with the given id.
    async fn update(&self, id: &str, options: Value) -> Result<Value, ProviderError>;

    /// Delete the resource; resolves to the provider's deletion acknowledgement.
    async fn del(&self, id: &str) -> Result<Value, ProviderError>;
}

/// Trait for time providers.
/// Allows the simulator to use real time or virtual time for testing.
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real clock implementation using system time.
#[derive(Clone, Default)]
pub struct RealClock;

impl Clock for RealClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
