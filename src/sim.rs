// src/sim.rs
//
// The simulated billing provider: one owned registry per instance, so each
// test gets its own state.

use log::info;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cfg::cards::CardCatalog;
use crate::cfg::config::{DefaultPlan, HarnessConfig};
use crate::client_ops::{Clock, RealClock};
use crate::dispatcher::EntityClient;
use crate::entity::{EntityType, Operation};
use crate::error::HarnessError;
use crate::factory::{build_customer, build_subscription};
use crate::handlers::SpecialField;
use crate::registry::EntityRegistry;
use crate::seed::DomainSeed;
use crate::snapshot::{take_snapshot, Snapshot};

pub struct BillingSim<C: Clock = RealClock> {
    registry: Arc<RwLock<EntityRegistry>>,
    cards: Arc<CardCatalog>,
    plan: DefaultPlan,
    clock: C,
}

impl BillingSim<RealClock> {
    /// Simulator with the built-in configuration and wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(HarnessConfig::default(), RealClock)
    }
}

impl Default for BillingSim<RealClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> BillingSim<C> {
    pub fn with_clock(config: HarnessConfig, clock: C) -> Self {
        let mut registry = EntityRegistry::new();
        for entity in EntityType::ALL {
            let trim_fields = config.trim_fields_for(entity).map(<[String]>::to_vec);
            registry
                .register(entity, &SpecialField::defaults_for(entity), trim_fields)
                .expect("default handlers belong to their own entity type");
        }
        Self {
            registry: Arc::new(RwLock::new(registry)),
            cards: Arc::new(config.cards),
            plan: config.default_plan,
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityRegistry> {
        self.registry.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityRegistry> {
        self.registry.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Install fresh resources derived from `seed`, replacing whatever the
    /// previous configure left behind. Call once per test before any operation.
    pub fn configure(&self, seed: &DomainSeed) -> Result<(), HarnessError> {
        info!(
            "configuring billing simulation for {} ({} active members)",
            seed.id,
            seed.active_member_count()
        );
        let mut registry = self.write();
        registry.install(EntityType::Customers, build_customer(seed))?;
        registry.install(EntityType::Subscriptions, build_subscription(seed, &self.plan))?;
        Ok(())
    }

    pub fn client(&self, entity: EntityType) -> EntityClient<C> {
        EntityClient::new(
            entity,
            Arc::clone(&self.registry),
            Arc::clone(&self.cards),
            self.clock.clone(),
        )
    }

    pub fn customers(&self) -> EntityClient<C> {
        self.client(EntityType::Customers)
    }

    pub fn subscriptions(&self) -> EntityClient<C> {
        self.client(EntityType::Subscriptions)
    }

    /// Trimmed view of every entity type a mutating call touched.
    pub fn snapshot(&self) -> Result<Snapshot, HarnessError> {
        take_snapshot(&self.read())
    }

    /// Full resident resource, for assertions beyond the snapshot.
    pub fn resident(&self, entity: EntityType) -> Option<Value> {
        self.read().get_resident(entity).cloned()
    }

    pub fn call_count(&self, entity: EntityType, op: Operation) -> usize {
        self.read().call_count(entity, op)
    }

    pub fn was_touched(&self, entity: EntityType) -> bool {
        self.read().was_touched(entity)
    }

    /// Forget recorded calls; residents are left as they are.
    pub fn reset_calls(&self) {
        self.write().reset_calls();
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
