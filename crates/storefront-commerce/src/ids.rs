//! Newtype IDs for type-safe identifiers.
//!
//! Product ids arrive from the catalog source as either JSON numbers or
//! strings. They are canonicalized on construction so `1`, `"1"` and `"01"`
//! compare equal everywhere downstream. Line ids are kept verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw id as it appears in JSON.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident, $normalize:path) => {
        /// A string identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID, normalizing the input.
            pub fn new(id: impl AsRef<str>) -> Self {
                Self($normalize(id.as_ref()))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Ok(match RawId::deserialize(deserializer)? {
                    RawId::Number(n) => Self(n.to_string()),
                    RawId::Text(s) => Self::new(s),
                })
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, canonical_id);
define_id!(LineId, String::from);

impl LineId {
    /// Derive the cart line key for a (product, color, size) triple.
    ///
    /// Parts are joined with `-`; a `-` or `%` inside a part is
    /// percent-escaped, so distinct triples never share a key.
    pub fn derive(product_id: &ProductId, color: &str, size: &str) -> Self {
        Self(format!(
            "{}-{}-{}",
            escape_part(product_id.as_str()),
            escape_part(color),
            escape_part(size)
        ))
    }
}

fn escape_part(part: &str) -> String {
    part.replace('%', "%25").replace('-', "%2D")
}

/// Trim, and reduce purely numeric ids to their integer form.
fn canonical_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = trimmed.parse::<u64>() {
            return n.to_string();
        }
    }
    trimmed.to_string()
}
