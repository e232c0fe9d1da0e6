// src/seed.rs
//
// The business-level object a simulation is derived from: an organization
// with its billing fields and members.

use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Member {
    pub id: String,

    /// optional, defaults to false
    #[serde(default)]
    pub inactive: bool,
}

impl Member {
    pub fn active(id: &str) -> Self {
        Self {
            id: id.to_string(),
            inactive: false,
        }
    }

    pub fn inactive(id: &str) -> Self {
        Self {
            id: id.to_string(),
            inactive: true,
        }
    }
}

/// Payment method the organization has on file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreditCard {
    #[serde(default = "default_card_id")]
    pub id: String,
    pub brand: String,
    pub last4: String,
    /// `MM/YY`
    pub expiry: String,
}

fn default_card_id() -> String {
    "card_123".to_string()
}

impl CreditCard {
    pub fn new(id: &str, brand: &str, last4: &str, expiry: &str) -> Self {
        Self {
            id: id.to_string(),
            brand: brand.to_string(),
            last4: last4.to_string(),
            expiry: expiry.to_string(),
        }
    }

    /// Split the `MM/YY` expiry into (month, four-digit year).
    pub fn exp_month_year(&self) -> Result<(u32, i32)> {
        let (mm, yy) = self
            .expiry
            .split_once('/')
            .ok_or_else(|| eyre!("Card expiry '{}' is not MM/YY", self.expiry))?;
        let month: u32 = mm
            .trim()
            .parse()
            .map_err(|e| eyre!("Bad expiry month in '{}': {}", self.expiry, e))?;
        let year: i32 = yy
            .trim()
            .parse()
            .map_err(|e| eyre!("Bad expiry year in '{}': {}", self.expiry, e))?;
        if !(1..=12).contains(&month) || !(0..100).contains(&year) {
            return Err(eyre!("Card expiry '{}' is out of range", self.expiry));
        }
        Ok((month, 2000 + year))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DomainSeed {
    pub id: String,

    /// provider customer id
    #[serde(alias = "customer-id")]
    pub customer_id: String,

    /// provider subscription id
    #[serde(alias = "subscription-id")]
    pub subscription_id: String,

    #[serde(alias = "created-at")]
    pub created_at: DateTime<Utc>,

    #[serde(alias = "period-start")]
    pub period_start: DateTime<Utc>,

    #[serde(alias = "period-end")]
    pub period_end: DateTime<Utc>,

    #[serde(default, alias = "credit-card")]
    pub credit_card: Option<CreditCard>,

    #[serde(default)]
    pub members: Vec<Member>,
}

impl DomainSeed {
    /// Billable seats: every member not flagged inactive.
    pub fn active_member_count(&self) -> usize {
        self.members.iter().filter(|m| !m.inactive).count()
    }
}

/// Load a seed from a YAML (or JSON, which is valid YAML) file.
pub fn load_seed(path: &Path) -> Result<DomainSeed> {
    let content = fs::read_to_string(path)
        .map_err(|e| eyre!("Failed to read seed file {}: {}", path.display(), e))?;
    serde_yaml::from_str(&content)
        .map_err(|e| eyre!("Failed to parse seed {}: {}", path.display(), e))
}
