// src/registry.rs
//
// Per-entity-type state: the resident resource, its special handlers, its
// trim spec and the log of calls made against it.

use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::entity::{EntityType, Operation};
use crate::error::HarnessError;
use crate::handlers::SpecialField;

/// Invocation counts per operation for one entity type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallLog {
    counts: BTreeMap<Operation, usize>,
}

impl CallLog {
    pub fn record(&mut self, op: Operation) {
        *self.counts.entry(op).or_insert(0) += 1;
    }

    pub fn count(&self, op: Operation) -> usize {
        self.counts.get(&op).copied().unwrap_or(0)
    }

    /// True iff a creating, updating or deleting call was made.
    pub fn has_trigger(&self) -> bool {
        self.counts.iter().any(|(op, n)| op.is_trigger() && *n > 0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

#[derive(Debug)]
struct EntityState {
    resident: Option<Value>,
    handlers: BTreeMap<&'static str, SpecialField>,
    trim_fields: Option<Vec<String>>,
    calls: CallLog,
}

/// Owned by one harness instance; never shared between tests.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<EntityType, EntityState>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `entity` simulate-able. Every handler must belong to `entity` and
    /// claim a distinct option key.
    pub fn register(
        &mut self,
        entity: EntityType,
        handlers: &[SpecialField],
        trim_fields: Option<Vec<String>>,
    ) -> Result<(), HarnessError> {
        let mut table = BTreeMap::new();
        for field in handlers {
            if field.owner() != entity {
                return Err(HarnessError::HandlerMismatch {
                    field: field.key(),
                    owner: field.owner(),
                    entity,
                });
            }
            if table.insert(field.key(), *field).is_some() {
                return Err(HarnessError::DuplicateHandler {
                    field: field.key(),
                    entity,
                });
            }
        }
        let trim_fields = trim_fields.filter(|paths| !paths.is_empty());

        debug!(
            "registered {} with handlers {:?} and trim fields {:?}",
            entity,
            table.keys().collect::<Vec<_>>(),
            trim_fields
        );
        self.entities.insert(
            entity,
            EntityState {
                resident: None,
                handlers: table,
                trim_fields,
                calls: CallLog::default(),
            },
        );
        Ok(())
    }

    /// Replace the resident resource and start a fresh call log.
    pub fn install(&mut self, entity: EntityType, resource: Value) -> Result<(), HarnessError> {
        let state = self
            .entities
            .get_mut(&entity)
            .ok_or(HarnessError::Unregistered(entity))?;
        state.resident = Some(resource);
        state.calls.clear();
        Ok(())
    }

    pub fn get_resident(&self, entity: EntityType) -> Option<&Value> {
        self.entities.get(&entity)?.resident.as_ref()
    }

    pub fn get_resident_mut(&mut self, entity: EntityType) -> Option<&mut Value> {
        self.entities.get_mut(&entity)?.resident.as_mut()
    }

    pub fn handler(&self, entity: EntityType, key: &str) -> Option<SpecialField> {
        self.entities.get(&entity)?.handlers.get(key).copied()
    }

    pub fn trim_fields(&self, entity: EntityType) -> Option<&[String]> {
        self.entities.get(&entity)?.trim_fields.as_deref()
    }

    pub fn record_call(&mut self, entity: EntityType, op: Operation) {
        if let Some(state) = self.entities.get_mut(&entity) {
            debug!("{}.{} called", entity, op);
            state.calls.record(op);
        }
    }

    pub fn call_count(&self, entity: EntityType, op: Operation) -> usize {
        self.entities
            .get(&entity)
            .map_or(0, |state| state.calls.count(op))
    }

    /// Retrieval alone never marks an entity type as touched.
    pub fn was_touched(&self, entity: EntityType) -> bool {
        self.entities
            .get(&entity)
            .is_some_and(|state| state.calls.has_trigger())
    }

    pub fn reset_calls(&mut self) {
        for state in self.entities.values_mut() {
            state.calls.clear();
        }
    }

    /// Registered entity types, in a stable order.
    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.entities.keys().copied()
    }
}
