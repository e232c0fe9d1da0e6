// src/entity.rs
//
// Entity types the harness can simulate, and the provider verbs that act on them.

use serde::{Deserialize, Serialize};

/// A provider resource collection, named the way the provider client names it
/// (`stripe.customers`, `stripe.subscriptions`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Customers,
    Subscriptions,
}

serde_plain::derive_display_from_serialize!(EntityType);
serde_plain::derive_fromstr_from_deserialize!(EntityType);

impl EntityType {
    pub const ALL: [EntityType; 2] = [EntityType::Customers, EntityType::Subscriptions];
}

/// The four provider verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Retrieve,
    Update,
    Del,
}

serde_plain::derive_display_from_serialize!(Operation);
serde_plain::derive_fromstr_from_deserialize!(Operation);

impl Operation {
    /// Whether a call to this verb marks its entity type as touched.
    /// Pure retrieval never does.
    pub fn is_trigger(&self) -> bool {
        !matches!(self, Operation::Retrieve)
    }
}
