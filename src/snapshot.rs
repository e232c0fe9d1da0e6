// src/snapshot.rs
//
// Minimal, stable view of the resources a test actually exercised.

use log::info;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::entity::EntityType;
use crate::error::HarnessError;
use crate::registry::EntityRegistry;
use crate::utils::trim;

/// Trimmed resources keyed by entity type; untouched types are absent.
pub type Snapshot = BTreeMap<EntityType, Value>;

/// Build a snapshot of every touched entity type, trimmed to its trim spec.
///
/// A touched entity type without a trim spec is a harness configuration
/// error, never an empty entry. Read-only with respect to the registry.
pub fn take_snapshot(registry: &EntityRegistry) -> Result<Snapshot, HarnessError> {
    let mut snapshot = Snapshot::new();
    for entity in registry.entity_types() {
        if !registry.was_touched(entity) {
            continue;
        }
        let paths = registry
            .trim_fields(entity)
            .ok_or(HarnessError::MissingTrimFields(entity))?;
        let resident = registry.get_resident(entity).cloned().unwrap_or(Value::Null);
        snapshot.insert(entity, trim(&resident, paths));
    }
    info!(
        "snapshot covers {:?}",
        snapshot.keys().map(ToString::to_string).collect::<Vec<_>>()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Operation;
    use serde_json::json;

    fn registry(customer_trim: Option<Vec<String>>) -> EntityRegistry {
        let mut registry = EntityRegistry::new();
        registry.register(EntityType::Customers, &[], customer_trim).unwrap();
        registry
            .register(EntityType::Subscriptions, &[], Some(vec!["id".to_string()]))
            .unwrap();
        registry
            .install(EntityType::Customers, json!({ "id": "cus_1", "email": null }))
            .unwrap();
        registry
            .install(EntityType::Subscriptions, json!({ "id": "sub_1", "status": "active" }))
            .unwrap();
        registry
    }

    #[test]
    fn test_untouched_registry_gives_empty_snapshot() {
        let mut registry = registry(None);
        registry.record_call(EntityType::Customers, Operation::Retrieve);
        assert!(take_snapshot(&registry).unwrap().is_empty());
    }

    #[test]
    fn test_only_touched_types_are_included() {
        let mut registry = registry(None);
        registry.record_call(EntityType::Subscriptions, Operation::Update);

        let snapshot = take_snapshot(&registry).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[&EntityType::Subscriptions], json!({ "id": "sub_1" }));
    }

    #[test]
    fn test_touched_type_without_trim_fields_fails() {
        let mut registry = registry(None);
        registry.record_call(EntityType::Customers, Operation::Del);

        assert_eq!(
            take_snapshot(&registry),
            Err(HarnessError::MissingTrimFields(EntityType::Customers))
        );
    }

    #[test]
    fn test_snapshot_is_repeatable() {
        let mut registry = registry(Some(vec!["id".to_string()]));
        registry.record_call(EntityType::Customers, Operation::Create);

        let first = take_snapshot(&registry).unwrap();
        let second = take_snapshot(&registry).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[&EntityType::Customers], json!({ "id": "cus_1" }));
    }
}
