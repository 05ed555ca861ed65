//! Module: query
//! Responsibility: the typed predicate algebra (`Query<T>`) and its combinators.
//! Does not own: named-field criteria (see `builder`) or store execution.
//! Boundary: consumed directly by typed callers and by `store::Tx::for_each`.

mod compose;
mod ops;

#[cfg(test)]
mod tests;

use crate::compare::CompareError;
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
    sync::Arc,
};
use thiserror::Error as ThisError;

// re-exports
pub use compose::{Accessor, compose_query};
pub use ops::{
    eq_query, eq_query_fn, eq_query_fn2, gt_eq_query, gt_eq_query_fn, gt_eq_query_fn2, gt_query,
    gt_query_fn, gt_query_fn2, lt_eq_query, lt_eq_query_fn, lt_eq_query_fn2, lt_query,
    lt_query_fn, lt_query_fn2, not_eq_query, not_eq_query_fn, not_eq_query_fn2,
};

pub(crate) type MatchFn<T> = dyn Fn(&T) -> bool + Send + Sync;

///
/// QueryError
///
/// Construction-time failures. Nothing here is ever raised while matching.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("accessor function is absent")]
    NilAccessor,

    #[error("value query is absent")]
    NilQuery,
}

///
/// QueryFunc
///
/// Plain function predicate. The absent function matches everything.
///

pub struct QueryFunc<T>(Option<Arc<MatchFn<T>>>);

impl<T> QueryFunc<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        self.0.as_ref().is_none_or(|f| f(value))
    }
}

impl<T> Clone for QueryFunc<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for QueryFunc<T> {
    fn default() -> Self {
        Self::absent()
    }
}

///
/// Query
///
/// Pure predicate over `T`, composable with AND/OR.
///
/// Lists hold `Option<Query<T>>`; `None` elements are skipped and never flip
/// the outer result. `and`/`or` consume the receiver, so growing an AND-list
/// (or OR-list) in place cannot be observed through another handle.
///

pub enum Query<T> {
    /// Function predicate.
    Func(QueryFunc<T>),

    /// Matches iff every present element matches; empty matches everything.
    All(Vec<Option<Self>>),

    /// Matches iff some present element matches; empty matches nothing.
    Any(Vec<Option<Self>>),

    /// Negation.
    Not(Box<Self>),
}

impl<T> Query<T> {
    /// Wrap a plain predicate function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::Func(QueryFunc::new(f))
    }

    /// Test `value` against this query.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Func(f) => f.matches(value),
            Self::All(children) => children.iter().flatten().all(|q| q.matches(value)),
            Self::Any(children) => children.iter().flatten().any(|q| q.matches(value)),
            Self::Not(inner) => !inner.matches(value),
        }
    }

    /// Combine with `other` using logical AND.
    #[must_use]
    pub fn and(self, other: impl Into<Option<Self>>) -> Self {
        self.and_all([other.into()])
    }

    /// Combine with every element of `others` using logical AND.
    /// An AND-list receiver is extended rather than nested.
    #[must_use]
    pub fn and_all<I>(self, others: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Self>>,
    {
        let others = others.into_iter().map(Into::into);

        match self {
            Self::All(mut children) => {
                children.extend(others);
                Self::All(children)
            }
            other => Self::All(join(other, others)),
        }
    }

    /// Combine with `other` using logical OR.
    #[must_use]
    pub fn or(self, other: impl Into<Option<Self>>) -> Self {
        self.or_all([other.into()])
    }

    /// Combine with every element of `others` using logical OR.
    /// An OR-list receiver is extended rather than nested.
    #[must_use]
    pub fn or_all<I>(self, others: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Self>>,
    {
        let others = others.into_iter().map(Into::into);

        match self {
            Self::Any(mut children) => {
                children.extend(others);
                Self::Any(children)
            }
            other => Self::Any(join(other, others)),
        }
    }
}

/// OR-list over `queries`. Matches nothing when empty.
#[must_use]
pub fn match_any<T, I>(queries: I) -> Query<T>
where
    I: IntoIterator,
    I::Item: Into<Option<Query<T>>>,
{
    Query::Any(queries.into_iter().map(Into::into).collect())
}

/// AND-list over `queries`. Matches everything when empty.
#[must_use]
pub fn match_all<T, I>(queries: I) -> Query<T>
where
    I: IntoIterator,
    I::Item: Into<Option<Query<T>>>,
{
    Query::All(queries.into_iter().map(Into::into).collect())
}

fn join<T>(first: Query<T>, rest: impl Iterator<Item = Option<Query<T>>>) -> Vec<Option<Query<T>>> {
    std::iter::once(Some(first)).chain(rest).collect()
}

// ----------------------------------------------------------------------
// Boundary traits
// ----------------------------------------------------------------------

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Func(f) => Self::Func(f.clone()),
            Self::All(children) => Self::All(children.clone()),
            Self::Any(children) => Self::Any(children.clone()),
            Self::Not(inner) => Self::Not(inner.clone()),
        }
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::Func(QueryFunc::absent())
    }
}

impl<T> From<QueryFunc<T>> for Query<T> {
    fn from(f: QueryFunc<T>) -> Self {
        Self::Func(f)
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Func(func) if func.is_absent() => f.write_str("Func(absent)"),
            Self::Func(_) => f.write_str("Func"),
            Self::All(children) => f.debug_tuple("All").field(children).finish(),
            Self::Any(children) => f.debug_tuple("Any").field(children).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

impl<T> BitAnd for Query<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<T> BitOr for Query<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<T> Not for Query<T> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}
