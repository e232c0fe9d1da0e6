// tests/harness/mod.rs
//
// Integration testing harness for billing-sim.
// Provides seed fixtures and a simulator wired to a virtual clock.

pub mod fixtures;
pub mod test_harness;

pub use fixtures::SeedBuilder;
pub use test_harness::TestHarness;
