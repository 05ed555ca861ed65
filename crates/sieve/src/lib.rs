//! Sieve: typed predicate composition for key-value stores.
//!
//! - `compare`: comparison primitives over caller-supplied orderings.
//! - `query`: the `Query<T>` predicate algebra (AND/OR lists, composition).
//! - `builder`: the named-field `where_field(..)` criterion builder.
//! - `store`: the store/transaction boundary that consumes predicates.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod builder;
pub mod compare;
pub mod error;
pub mod model;
pub mod naming;
pub mod query;
pub mod registry;
pub mod store;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// CONSTANTS
///

/// Field name that addresses a record's key rather than one of its fields.
pub const KEY_FIELD: &str = "";

///
/// Prelude
///
/// Prelude contains only construction vocabulary.
/// Errors, stores and the registry stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        builder::{CompositeQuery, CriterionBuilder, where_field},
        compare::{CompFunc, CondFunc},
        model::{FieldDescriptor, RecordModel},
        query::{
            Accessor, Query, QueryFunc, compose_query, eq_query, gt_eq_query, gt_query, lt_eq_query,
            lt_query, match_all, match_any, not_eq_query,
        },
        traits::{FieldValue, Record},
        value::Value,
    };
}
