//! Newtype IDs for type-safe identifiers.
//!
//! String-backed newtypes keep the different entity ids from being mixed
//! up, e.g. passing a `MerchantId` where an `ItemId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        /// A unique, string-backed identifier.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mint a fresh process-unique id.
            pub fn generate() -> Self {
                Self(mint($prefix))
            }

            /// The id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(MerchantId, "mer");
define_id!(ItemId, "itm");
define_id!(OptionGroupId, "grp");
define_id!(ChoiceId, "cho");
define_id!(CartLineId, "crt");
define_id!(OrderId, "ord");
define_id!(DiscountId, "dsc");
define_id!(AddressId, "adr");
define_id!(UserId, "usr");

/// Build a prefixed id from the wall clock and a process-wide counter.
fn mint(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{prefix}-{millis:x}{seq:04x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = MerchantId::generate();
        let b = MerchantId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("mer-"));
    }

    #[test]
    fn test_new_and_display() {
        let id = ItemId::new("itm-42");
        assert_eq!(id.as_str(), "itm-42");
        assert_eq!(id.to_string(), "itm-42");
    }

    #[test]
    fn test_from_str() {
        let id: OrderId = "ord-7".into();
        assert_eq!(id, OrderId::new("ord-7"));
    }
}
