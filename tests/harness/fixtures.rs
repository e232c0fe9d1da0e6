// tests/harness/fixtures.rs
//
// Domain seed fixtures.

use billing_sim::seed::{CreditCard, DomainSeed, Member};
use chrono::{DateTime, Utc};

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

/// Builder for an organization seed with sensible defaults.
pub struct SeedBuilder {
    seed: DomainSeed,
}

impl SeedBuilder {
    pub fn new() -> Self {
        Self {
            seed: DomainSeed {
                id: "org_123".to_string(),
                customer_id: "cus_123".to_string(),
                subscription_id: "sub_123".to_string(),
                created_at: ts("2024-01-01T09:15:30.250Z"),
                period_start: ts("2024-01-15T00:00:00Z"),
                period_end: ts("2024-02-15T00:00:00Z"),
                credit_card: None,
                members: vec![Member::active("user_1")],
            },
        }
    }

    /// `active` members followed by `inactive` ones.
    pub fn members(mut self, active: usize, inactive: usize) -> Self {
        let mut members: Vec<Member> = (0..active)
            .map(|i| Member::active(&format!("user_a{}", i)))
            .collect();
        members.extend((0..inactive).map(|i| Member::inactive(&format!("user_i{}", i))));
        self.seed.members = members;
        self
    }

    pub fn with_card(mut self) -> Self {
        self.seed.credit_card = Some(CreditCard::new("card_123", "Visa", "4242", "12/28"));
        self
    }

    pub fn build(self) -> DomainSeed {
        self.seed
    }
}

impl Default for SeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}
