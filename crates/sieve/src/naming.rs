//! Field addressing convention.
//!
//! The empty name addresses the record key. Any other name is addressable
//! only when its first character is uppercase (exported).

use crate::KEY_FIELD;

/// Whether `field` may be named in criteria or sort keys.
#[must_use]
pub fn is_exported(field: &str) -> bool {
    if field == KEY_FIELD {
        return true;
    }

    field.chars().next().is_some_and(char::is_uppercase)
}
