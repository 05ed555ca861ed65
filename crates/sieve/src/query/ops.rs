//! Value-binding predicate constructors.
//!
//! Each constructor binds a constant into a `Query<T>`. The `*_fn` variants
//! take a comparator, the `*_fn2` variants a condition (equality for the
//! eq family, less-than for the ordering family). Absent functions are
//! rejected here, never at match time.

use crate::{
    compare::{CompFunc, CondFunc},
    query::{Query, QueryError},
};
use std::cmp::Ordering;

// ------------------------------------------------------------------
// Equality
// ------------------------------------------------------------------

/// Matches values equal to `v`.
#[must_use]
pub fn eq_query<T>(v: T) -> Query<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x == v)
}

/// Matches values comparing equal to `v` under `cmp`.
pub fn eq_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_eq)
}

/// Matches values `eq` reports equal to `v`.
pub fn eq_query_fn2<T>(v: T, eq: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let eq = eq.present()?;

    Ok(Query::func(move |x: &T| eq(x, &v)))
}

/// Matches values not equal to `v`.
#[must_use]
pub fn not_eq_query<T>(v: T) -> Query<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x != v)
}

pub fn not_eq_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_ne)
}

pub fn not_eq_query_fn2<T>(v: T, eq: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let eq = eq.present()?;

    Ok(Query::func(move |x: &T| !eq(x, &v)))
}

// ------------------------------------------------------------------
// Ordering
// ------------------------------------------------------------------

/// Matches values strictly greater than `v`.
#[must_use]
pub fn gt_query<T>(v: T) -> Query<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x > v)
}

pub fn gt_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_gt)
}

/// `x > v` expressed as `less(v, x)`.
pub fn gt_query_fn2<T>(v: T, less: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let less = less.present()?;

    Ok(Query::func(move |x: &T| less(&v, x)))
}

/// Matches values greater than or equal to `v`.
#[must_use]
pub fn gt_eq_query<T>(v: T) -> Query<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x >= v)
}

pub fn gt_eq_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_ge)
}

/// `x >= v` expressed as `!less(x, v)`.
pub fn gt_eq_query_fn2<T>(v: T, less: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let less = less.present()?;

    Ok(Query::func(move |x: &T| !less(x, &v)))
}

/// Matches values strictly less than `v`.
#[must_use]
pub fn lt_query<T>(v: T) -> Query<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x < v)
}

pub fn lt_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_lt)
}

pub fn lt_query_fn2<T>(v: T, less: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let less = less.present()?;

    Ok(Query::func(move |x: &T| less(x, &v)))
}

/// Matches values less than or equal to `v`.
#[must_use]
pub fn lt_eq_query<T>(v: T) -> Query<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Query::func(move |x: &T| *x <= v)
}

pub fn lt_eq_query_fn<T>(v: T, cmp: &CompFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    bind_cmp(v, cmp, Ordering::is_le)
}

/// `x <= v` expressed as `!less(v, x)`.
pub fn lt_eq_query_fn2<T>(v: T, less: &CondFunc<T>) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let less = less.present()?;

    Ok(Query::func(move |x: &T| !less(&v, x)))
}

// ------------------------------------------------------------------
// Internal helpers (not public API)
// ------------------------------------------------------------------

fn bind_cmp<T>(v: T, cmp: &CompFunc<T>, accept: fn(Ordering) -> bool) -> Result<Query<T>, QueryError>
where
    T: Send + Sync + 'static,
{
    let cmp = cmp.present()?;

    Ok(Query::func(move |x: &T| accept(cmp(x, &v))))
}
