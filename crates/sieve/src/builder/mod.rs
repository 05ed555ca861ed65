//! Module: builder
//! Responsibility: fluent named-field criteria and the composite query they build.
//! Does not own: typed predicate algebra (see `query`) or storage access.
//! Boundary: user-facing ergonomic builder layer; stores consume `CompositeQuery`.

mod criterion;
mod eval;
mod query;
mod validate;


use crate::naming::is_exported;
use thiserror::Error as ThisError;

// re-exports
pub use criterion::{Criterion, CriterionBuilder, Operand, Operator};
pub use query::CompositeQuery;
pub use validate::ValidateError;

///
/// BuilderError
///
/// Builder misuse, reported at the call that violated the contract.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuilderError {
    #[error("field '{field}' is not exported and cannot be queried")]
    NotExported { field: String },

    #[error("{what} must be non-negative, got {amount}")]
    Negative { what: &'static str, amount: i64 },

    #[error("{what} is already set to {current}")]
    AlreadySet { what: &'static str, current: u64 },

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Start a composite query on `field`.
///
/// `field` must be the key sentinel (`""`) or begin with an uppercase
/// character.
pub fn where_field(field: impl Into<String>) -> Result<CriterionBuilder, BuilderError> {
    let field = checked_field(field.into())?;

    Ok(CriterionBuilder::new(CompositeQuery::on_field(field)))
}

pub(crate) fn checked_field(field: String) -> Result<String, BuilderError> {
    if is_exported(&field) {
        Ok(field)
    } else {
        tracing::debug!(field = %field, "rejected unexported field");
        Err(BuilderError::NotExported { field })
    }
}
