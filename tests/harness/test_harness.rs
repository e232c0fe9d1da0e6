// tests/harness/test_harness.rs
//
// High-level test harness combining the simulator and a virtual clock.

use billing_sim::cfg::config::HarnessConfig;
use billing_sim::dispatcher::EntityClient;
use billing_sim::seed::DomainSeed;
use billing_sim::{BillingSim, EntityType, Operation, Snapshot, VirtualClock};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::harness::fixtures::ts;

pub struct TestHarness {
    pub clock: VirtualClock,
    pub sim: BillingSim<VirtualClock>,
}

impl TestHarness {
    /// Harness at a fixed instant with the default configuration.
    pub fn new(seed: &DomainSeed) -> Self {
        Self::with_config(seed, HarnessConfig::default())
    }

    pub fn with_config(seed: &DomainSeed, config: HarnessConfig) -> Self {
        let clock = VirtualClock::at(ts("2024-03-10T08:30:00Z"));
        let sim = BillingSim::with_clock(config, clock.clone());
        sim.configure(seed).unwrap();
        Self { clock, sim }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn customers(&self) -> EntityClient<VirtualClock> {
        self.sim.customers()
    }

    pub fn subscriptions(&self) -> EntityClient<VirtualClock> {
        self.sim.subscriptions()
    }

    pub fn customer(&self) -> Value {
        self.sim.resident(EntityType::Customers).unwrap()
    }

    pub fn subscription(&self) -> Value {
        self.sim.resident(EntityType::Subscriptions).unwrap()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot().unwrap()
    }

    // ===== Assertion Helpers =====

    pub fn assert_calls(&self, entity: EntityType, op: Operation, expected: usize) {
        let actual = self.sim.call_count(entity, op);
        assert_eq!(
            actual, expected,
            "expected {} {}.{} calls, found {}",
            expected, entity, op, actual
        );
    }

    pub fn assert_untouched(&self) {
        let snapshot = self.snapshot();
        assert!(snapshot.is_empty(), "expected empty snapshot, found {:?}", snapshot);
    }
}
