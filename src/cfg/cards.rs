// src/cfg/cards.rs
//
// Lookup table from opaque payment-method tokens to card descriptors.

use eyre::{eyre, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::seed::CreditCard;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CardCatalog {
    cards: BTreeMap<String, CreditCard>,
}

impl CardCatalog {
    pub fn empty() -> Self {
        Self {
            cards: BTreeMap::new(),
        }
    }

    /// Test tokens every harness knows about.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.insert("tok_visa", CreditCard::new("card_visa", "Visa", "4242", "12/28"));
        catalog.insert(
            "tok_mastercard",
            CreditCard::new("card_mastercard", "MasterCard", "4444", "06/27"),
        );
        catalog.insert(
            "tok_amex",
            CreditCard::new("card_amex", "American Express", "8431", "03/30"),
        );
        catalog
    }

    pub fn insert(&mut self, token: &str, card: CreditCard) {
        self.cards.insert(token.to_string(), card);
    }

    pub fn get(&self, token: &str) -> Option<&CreditCard> {
        self.cards.get(token)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Every card must carry a parseable `MM/YY` expiry.
    pub fn validate(&self) -> Result<()> {
        for (token, card) in &self.cards {
            card.exp_month_year()
                .map_err(|e| eyre!("Card for token '{}': {}", token, e))?;
        }
        Ok(())
    }
}

impl Default for CardCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = CardCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.get("tok_visa").unwrap().last4, "4242");
        assert!(catalog.get("tok_unknown").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_expiry() {
        let mut catalog = CardCatalog::empty();
        catalog.insert("tok_bad", CreditCard::new("card_bad", "Visa", "0000", "2028-12"));
        let err = catalog.validate().unwrap_err().to_string();
        assert!(err.contains("tok_bad"));
    }

    #[test]
    fn test_catalog_deserializes_from_yaml_map() {
        let yaml = r#"
tok_test:
  id: card_test
  brand: Visa
  last4: "1881"
  expiry: 01/31
"#;
        let catalog: CardCatalog = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(catalog.get("tok_test").unwrap().id, "card_test");
    }
}
