//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `LineId` where a `CategoryId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(ProjectId, "Unique identifier for a film project.");
typed_id!(CategoryId, "Unique identifier for a budget category.");
typed_id!(SubcategoryId, "Unique identifier for a budget subcategory.");
typed_id!(LineId, "Unique identifier for a budget line.");
typed_id!(ContractorId, "Unique identifier for a contractor.");
typed_id!(TaxSchemeId, "Unique identifier for a tax scheme.");
typed_id!(TaxComponentId, "Unique identifier for a tax scheme component.");
typed_id!(ContractId, "Unique identifier for a contract.");
typed_id!(ReportId, "Unique identifier for a daily production report.");
typed_id!(EntryId, "Unique identifier for a production report entry.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
