// src/lib.rs
//
// Library entry point for billing-sim.
// A stateful stand-in for the billing provider's customer and subscription API.

pub mod cfg;
pub mod client_ops;
pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod factory;
pub mod handlers;
pub mod registry;
pub mod script;
pub mod seed;
pub mod sim;
pub mod snapshot;
pub mod utils;
pub mod virtual_clock;

pub use client_ops::{Clock, RealClock, ResourceOps};
pub use entity::{EntityType, Operation};
pub use error::{HarnessError, ProviderError};
pub use sim::BillingSim;
pub use snapshot::Snapshot;
pub use virtual_clock::VirtualClock;
