// src/cfg/config.rs

use eyre::{eyre, Result};
use log::{debug, error, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::cfg::cards::CardCatalog;
use crate::entity::EntityType;

/// The plan every simulated subscription starts on.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DefaultPlan {
    pub id: String,
    pub name: String,
    /// unit amount in the smallest currency unit
    pub amount: i64,
}

impl Default for DefaultPlan {
    fn default() -> Self {
        Self {
            id: "action-monthly-test".to_string(),
            name: "Action Monthly | TEST".to_string(),
            amount: 19_999_900,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// dot-paths kept in a snapshot, per entity type
    #[serde(alias = "trim-fields")]
    pub trim_fields: BTreeMap<EntityType, Vec<String>>,

    #[serde(alias = "default-plan")]
    pub default_plan: DefaultPlan,

    /// payment-method token → card
    pub cards: CardCatalog,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            trim_fields: default_trim_fields(),
            default_plan: DefaultPlan::default(),
            cards: CardCatalog::builtin(),
        }
    }
}

pub fn default_trim_fields() -> BTreeMap<EntityType, Vec<String>> {
    let paths = |ps: &[&str]| ps.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    BTreeMap::from([
        (
            EntityType::Customers,
            paths(&["id", "metadata.orgId", "sources.url", "sources.data.customer"]),
        ),
        (
            EntityType::Subscriptions,
            paths(&["customer", "id", "items.url", "metadata.orgId"]),
        ),
    ])
}

impl HarnessConfig {
    /// Trim spec for `entity`, if one is configured and non-empty.
    pub fn trim_fields_for(&self, entity: EntityType) -> Option<&[String]> {
        self.trim_fields
            .get(&entity)
            .filter(|paths| !paths.is_empty())
            .map(Vec::as_slice)
    }

    pub fn validate(&self) -> Result<()> {
        self.cards.validate()?;
        for entity in EntityType::ALL {
            if self.trim_fields_for(entity).is_none() {
                warn!("No trim fields configured for {}; snapshotting it will fail", entity);
            }
        }
        Ok(())
    }
}

pub fn load_config(config_path: &Path) -> Result<HarnessConfig> {
    debug!("Loading configuration from {:?}", config_path);

    let content = fs::read_to_string(config_path).map_err(|e| {
        error!("Failed to read config file {}: {}", config_path.display(), e);
        eyre!("Failed to read config file {}: {}", config_path.display(), e)
    })?;

    let cfg: HarnessConfig = serde_yaml::from_str(&content).map_err(|e| {
        error!("Failed to parse YAML: {}", e);
        eyre!("Failed to parse YAML: {}", e)
    })?;

    cfg.validate()?;

    debug!("Successfully loaded configuration");
    Ok(cfg)
}
