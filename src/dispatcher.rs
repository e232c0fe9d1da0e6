// src/dispatcher.rs
//
// The provider verbs for one entity type, applied against the registry's
// resident resource.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::{json, Value};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cfg::cards::CardCatalog;
use crate::client_ops::{Clock, ResourceOps};
use crate::entity::{EntityType, Operation};
use crate::error::ProviderError;
use crate::handlers::HandlerContext;
use crate::registry::EntityRegistry;
use crate::utils::{add_one_month, to_epoch_seconds};

/// Client for one simulated resource collection, e.g. `customers`.
/// Cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct EntityClient<C: Clock> {
    entity: EntityType,
    registry: Arc<RwLock<EntityRegistry>>,
    cards: Arc<CardCatalog>,
    clock: C,
}

impl<C: Clock> EntityClient<C> {
    pub(crate) fn new(
        entity: EntityType,
        registry: Arc<RwLock<EntityRegistry>>,
        cards: Arc<CardCatalog>,
        clock: C,
    ) -> Self {
        Self {
            entity,
            registry,
            cards,
            clock,
        }
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    /// Current resident without recording a call.
    pub fn peek(&self) -> Option<Value> {
        self.read().get_resident(self.entity).cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityRegistry> {
        self.registry.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityRegistry> {
        self.registry.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn resident(&self, registry: &EntityRegistry) -> Result<Value, ProviderError> {
        registry
            .get_resident(self.entity)
            .cloned()
            .ok_or(ProviderError::NotConfigured(self.entity))
    }

    /// Apply each option in order: registered special fields go through their
    /// handler, anything else is assigned as-is. Stops at the first rejection;
    /// options applied before it stay applied.
    fn apply_options(
        &self,
        registry: &mut EntityRegistry,
        options: &Value,
        now: DateTime<Utc>,
    ) -> Result<(), ProviderError> {
        let options = match options {
            Value::Object(map) => map,
            Value::Null => return Ok(()),
            other => {
                return Err(ProviderError::InvalidRequest(format!(
                    "options must be an object, got {}",
                    other
                )))
            }
        };
        let ctx = HandlerContext {
            now,
            cards: &self.cards,
        };

        for (key, value) in options {
            let handler = registry.handler(self.entity, key);
            let resident = registry
                .get_resident_mut(self.entity)
                .ok_or(ProviderError::NotConfigured(self.entity))?;
            match handler {
                Some(field) => field.apply(resident, value, &ctx)?,
                None => {
                    debug!("{}.{} = {}", self.entity, key, value);
                    resident[key.as_str()] = value.clone();
                }
            }
        }
        Ok(())
    }

    fn run_create(&self, options: &Value) -> Result<Value, ProviderError> {
        let now = self.clock.now();
        let mut registry = self.write();
        registry.record_call(self.entity, Operation::Create);

        if self.entity == EntityType::Subscriptions {
            // A new subscription starts a fresh one-month period before any
            // option can override it.
            let resident = registry
                .get_resident_mut(self.entity)
                .ok_or(ProviderError::NotConfigured(self.entity))?;
            resident["current_period_start"] = json!(to_epoch_seconds(now));
            resident["current_period_end"] = json!(to_epoch_seconds(add_one_month(now)));
        }

        self.apply_options(&mut registry, options, now)?;
        self.resident(&registry)
    }

    fn run_update(&self, id: &str, options: &Value) -> Result<Value, ProviderError> {
        let now = self.clock.now();
        let mut registry = self.write();
        registry.record_call(self.entity, Operation::Update);
        debug!("{}.update({})", self.entity, id);

        self.apply_options(&mut registry, options, now)?;
        self.resident(&registry)
    }

    fn log_rejection(&self, op: Operation, result: Result<Value, ProviderError>) -> Result<Value, ProviderError> {
        if let Err(e) = &result {
            warn!("{}.{} rejected: {}", self.entity, op, e);
        }
        result
    }
}

#[async_trait]
impl<C: Clock + 'static> ResourceOps for EntityClient<C> {
    async fn create(&self, options: Value) -> Result<Value, ProviderError> {
        self.log_rejection(Operation::Create, self.run_create(&options))
    }

    /// The id is not checked against the resident: there is only ever one.
    async fn retrieve(&self, id: &str) -> Result<Value, ProviderError> {
        let resident = {
            let mut registry = self.write();
            registry.record_call(self.entity, Operation::Retrieve);
            self.resident(&registry)
        };
        debug!("{}.retrieve({})", self.entity, id);
        resident
    }

    async fn update(&self, id: &str, options: Value) -> Result<Value, ProviderError> {
        self.log_rejection(Operation::Update, self.run_update(id, &options))
    }

    /// Acknowledges the deletion without removing the resident.
    async fn del(&self, id: &str) -> Result<Value, ProviderError> {
        self.write().record_call(self.entity, Operation::Del);
        debug!("{}.del({})", self.entity, id);
        Ok(json!({
            "deleted": true,
            "id": id
        }))
    }
}
