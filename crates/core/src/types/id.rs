//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Catalog identifiers are opaque strings (`"7"`, `"non-seasonal"`), so the
/// wrapper holds a `String` and creates:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use greenbasket_core::define_id;
/// define_id!(ShelfId);
/// define_id!(AisleId);
///
/// let shelf = ShelfId::new("a1");
/// let aisle = AisleId::new("a1");
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = aisle;
/// assert_eq!(shelf.as_str(), aisle.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Catalog entity IDs
define_id!(ProductId);
define_id!(CategoryId);

/// Identifier of one shopping session.
///
/// Sessions live only in memory; the ID exists so log lines from one session
/// can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new random session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display_and_str() {
        let id = ProductId::new("7");
        assert_eq!(id.as_str(), "7");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::from("11");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"11\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
