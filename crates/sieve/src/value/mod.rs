mod compare;


use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::{canonical_cmp, compare_eq, compare_order};

///
/// Value
///
/// Dynamic operand carried by field criteria and produced by record accessors.
///
/// Null  → the field is absent on the record (`Option::None`).
/// Map   → ordered key/value pairs; order is preserved as written.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(f64),
    Int(i64),
    List(Vec<Self>),
    Map(Vec<(Self, Self)>),
    Null,
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this list contains an element equal to `needle`.
    #[must_use]
    pub fn list_contains(&self, needle: &Self) -> bool {
        self.as_list()
            .is_some_and(|items| items.iter().any(|item| compare_eq(item, needle)))
    }

    /// Whether this map has a key equal to `key`.
    #[must_use]
    pub fn map_contains_key(&self, key: &Self) -> bool {
        match self {
            Self::Map(entries) => entries.iter().any(|(k, _)| compare_eq(k, key)),
            _ => false,
        }
    }

    /// Text used for pattern matching: text is taken verbatim, everything
    /// else uses its display form.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("<nil>"),
            Self::Text(text) => f.write_str(text),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}
