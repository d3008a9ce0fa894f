//! Saved delivery addresses.

use crate::ids::{AddressId, UserId};
use serde::{Deserialize, Serialize};

/// A saved delivery address owned by a user.
///
/// At most one address per user carries `is_default`; the store keeps
/// that invariant when adding, updating, or switching defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAddress {
    pub id: AddressId,
    pub user_id: UserId,
    /// Short label shown in pickers, e.g. "Home".
    pub label: String,
    pub street: String,
    /// Apartment or suite.
    pub unit: Option<String>,
    pub city: String,
    pub zip: String,
    pub phone: Option<String>,
    pub is_default: bool,
}

impl DeliveryAddress {
    pub fn new(
        user_id: UserId,
        label: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        Self {
            id: AddressId::generate(),
            user_id,
            label: label.into(),
            street: street.into(),
            unit: None,
            city: city.into(),
            zip: zip.into(),
            phone: None,
            is_default: false,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Single-line summary for order confirmations.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.clone()];
        if let Some(unit) = &self.unit {
            parts.push(unit.clone());
        }
        parts.push(self.city.clone());
        parts.push(self.zip.clone());
        parts.join(", ")
    }
}
