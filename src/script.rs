// src/script.rs
//
// Replays a scripted sequence of provider calls against a simulator.

use eyre::{eyre, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::client_ops::{Clock, ResourceOps};
use crate::entity::{EntityType, Operation};
use crate::sim::BillingSim;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub entity: EntityType,
    pub op: Operation,

    /// required for retrieve, update and del
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub options: Value,
}

/// A step the simulator rejected.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepError {
    pub step: usize,
    pub entity: EntityType,
    pub op: Operation,
    pub error: String,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let content = fs::read_to_string(path)
        .map_err(|e| eyre!("Failed to read script {}: {}", path.display(), e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| eyre!("Failed to parse script {}: {}", path.display(), e))
}

/// Run every step in order. Rejections are collected, not fatal.
pub async fn run_script<C: Clock + 'static>(
    sim: &BillingSim<C>,
    steps: &[Step],
) -> Result<Vec<StepError>> {
    let mut errors = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let client = sim.client(step.entity);
        let id = step.id.as_deref();
        let needs_id = || eyre!("step {}: {}.{} needs an id", i, step.entity, step.op);

        debug!("step {}: {}.{}", i, step.entity, step.op);
        let result = match step.op {
            Operation::Create => client.create(step.options.clone()).await,
            Operation::Retrieve => client.retrieve(id.ok_or_else(needs_id)?).await,
            Operation::Update => {
                client
                    .update(id.ok_or_else(needs_id)?, step.options.clone())
                    .await
            }
            Operation::Del => client.del(id.ok_or_else(needs_id)?).await,
        };

        if let Err(e) = result {
            warn!("step {} rejected: {}", i, e);
            errors.push(StepError {
                step: i,
                entity: step.entity,
                op: step.op,
                error: e.to_string(),
            });
        }
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::config::HarnessConfig;
    use crate::seed::DomainSeed;
    use crate::virtual_clock::VirtualClock;

    const SEED: &str = r#"
id: org_1
customer_id: cus_1
subscription_id: sub_1
created_at: 2024-01-01T00:00:00Z
period_start: 2024-01-15T00:00:00Z
period_end: 2024-02-15T00:00:00Z
members:
  - id: u1
"#;

    const SCRIPT: &str = r#"
- entity: customers
  op: update
  id: cus_1
  options:
    source: tok_visa
- entity: customers
  op: update
  id: cus_1
  options:
    source: tok_missing
- entity: subscriptions
  op: retrieve
  id: sub_1
"#;

    fn sim() -> BillingSim<VirtualClock> {
        let sim = BillingSim::with_clock(HarnessConfig::default(), VirtualClock::new());
        let seed: DomainSeed = serde_yaml::from_str(SEED).unwrap();
        sim.configure(&seed).unwrap();
        sim
    }

    #[tokio::test]
    async fn test_run_script_collects_rejections() {
        let sim = sim();
        let steps: Vec<Step> = serde_yaml::from_str(SCRIPT).unwrap();

        let errors = run_script(&sim, &steps).await.unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].step, 1);
        assert_eq!(errors[0].error, "No such token: tok_missing");
        assert_eq!(
            sim.resident(EntityType::Customers).unwrap()["default_source"],
            "card_visa"
        );
        assert!(!sim.was_touched(EntityType::Subscriptions));
    }

    #[tokio::test]
    async fn test_run_script_requires_id() {
        let sim = sim();
        let steps: Vec<Step> = serde_yaml::from_str("- entity: customers\n  op: del\n").unwrap();
        assert!(run_script(&sim, &steps).await.is_err());
    }

    #[test]
    fn test_load_script_missing_file() {
        assert!(load_script(Path::new("/nonexistent/script.yml")).is_err());
    }
}
