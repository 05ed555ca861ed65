//! Module: compare
//! Responsibility: comparison primitives over caller-supplied orderings.
//! Does not own: predicate composition or value-binding queries.
//! Boundary: leaf layer consumed by `query`.

#[cfg(test)]
mod tests;

use std::{cmp::Ordering, fmt, sync::Arc};
use thiserror::Error as ThisError;

pub(crate) type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;
pub(crate) type ConditionFn<T> = dyn Fn(&T, &T) -> bool + Send + Sync;

///
/// CompareError
///
/// A required comparison or condition function was absent.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum CompareError {
    #[error("comparison function is absent")]
    NilCompFunc,

    #[error("condition function is absent")]
    NilCondFunc,
}

///
/// CompFunc
///
/// Three-way comparator over `T`. Only the sign of the result is meaningful,
/// so `Ordering` carries it. `CompFunc::default()` is the absent comparator;
/// every consumer rejects it before evaluating anything.
///
/// Callers own the strict-weak-ordering contract; it is not checked.
///

pub struct CompFunc<T>(Option<Arc<CompareFn<T>>>);

impl<T> CompFunc<T> {
    /// Wrap a comparator.
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self(Some(Arc::new(cmp)))
    }

    /// Wrap a signed-integer comparator (`a.key - b.key` style).
    /// The magnitude is ignored; the caller must keep the subtraction in range.
    pub fn from_sign<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> i64 + Send + Sync + 'static,
    {
        Self::new(move |a, b| cmp(a, b).cmp(&0))
    }

    /// The absent comparator.
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Compare two values.
    pub fn compare(&self, a: &T, b: &T) -> Result<Ordering, CompareError> {
        self.present().map(|cmp| cmp(a, b))
    }

    pub(crate) fn present(&self) -> Result<Arc<CompareFn<T>>, CompareError> {
        self.0.clone().ok_or(CompareError::NilCompFunc)
    }
}

impl<T: Ord> CompFunc<T> {
    /// Comparator backed by `Ord`.
    #[must_use]
    pub fn natural() -> Self
    where
        T: 'static,
    {
        Self::new(T::cmp)
    }
}

impl<T> Clone for CompFunc<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for CompFunc<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> fmt::Debug for CompFunc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_absent() { "absent" } else { "present" };
        f.debug_tuple("CompFunc").field(&state).finish()
    }
}

///
/// CondFunc
///
/// Boolean condition over a pair of values, used directly as an equality or
/// less-than test without a full ordering. Absent by default.
///

pub struct CondFunc<T>(Option<Arc<ConditionFn<T>>>);

impl<T> CondFunc<T> {
    /// Wrap a condition.
    pub fn new<F>(cond: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        Self(Some(Arc::new(cond)))
    }

    /// The absent condition.
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Evaluate the condition.
    pub fn test(&self, a: &T, b: &T) -> Result<bool, CompareError> {
        self.present().map(|cond| cond(a, b))
    }

    pub(crate) fn present(&self) -> Result<Arc<ConditionFn<T>>, CompareError> {
        self.0.clone().ok_or(CompareError::NilCondFunc)
    }
}

impl<T> Clone for CondFunc<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Default for CondFunc<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> fmt::Debug for CondFunc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_absent() { "absent" } else { "present" };
        f.debug_tuple("CondFunc").field(&state).finish()
    }
}

// ----------------------------------------------------------------------
// Adapters
// ----------------------------------------------------------------------

/// Less-than condition derived from a comparator: `cmp(a, b) < 0`.
pub fn as_less<T: 'static>(cmp: &CompFunc<T>) -> Result<CondFunc<T>, CompareError> {
    let cmp = cmp.present()?;

    Ok(CondFunc::new(move |a, b| cmp(a, b).is_lt()))
}

/// Equality condition derived from a comparator: `cmp(a, b) == 0`.
pub fn as_equal<T: 'static>(cmp: &CompFunc<T>) -> Result<CondFunc<T>, CompareError> {
    let cmp = cmp.present()?;

    Ok(CondFunc::new(move |a, b| cmp(a, b).is_eq()))
}

/// Comparator with the opposite ordering. Applying it twice is the identity.
pub fn reverse<T: 'static>(cmp: &CompFunc<T>) -> Result<CompFunc<T>, CompareError> {
    let cmp = cmp.present()?;

    Ok(CompFunc::new(move |a, b| cmp(a, b).reverse()))
}

// ----------------------------------------------------------------------
// Derived operators
// ----------------------------------------------------------------------

#[must_use]
pub fn eq<T: PartialEq + ?Sized>(a: &T, b: &T) -> bool {
    a == b
}

pub fn eq_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_eq)
}

/// Equality through an equality condition.
pub fn eq_fn2<T>(a: &T, b: &T, eq: &CondFunc<T>) -> Result<bool, CompareError> {
    eq.test(a, b)
}

#[must_use]
pub fn not_eq<T: PartialEq + ?Sized>(a: &T, b: &T) -> bool {
    a != b
}

pub fn not_eq_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_ne)
}

/// Inequality through an equality condition.
pub fn not_eq_fn2<T>(a: &T, b: &T, eq: &CondFunc<T>) -> Result<bool, CompareError> {
    eq.test(a, b).map(|equal| !equal)
}

#[must_use]
pub fn gt<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
    a > b
}

pub fn gt_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_gt)
}

/// `a > b` through a less-than condition, i.e. `less(b, a)`.
pub fn gt_fn2<T>(a: &T, b: &T, less: &CondFunc<T>) -> Result<bool, CompareError> {
    less.test(b, a)
}

#[must_use]
pub fn gt_eq<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
    a >= b
}

pub fn gt_eq_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_ge)
}

/// `a >= b` through a less-than condition, i.e. `!less(a, b)`.
pub fn gt_eq_fn2<T>(a: &T, b: &T, less: &CondFunc<T>) -> Result<bool, CompareError> {
    less.test(a, b).map(|lt| !lt)
}

#[must_use]
pub fn lt<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
    a < b
}

pub fn lt_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_lt)
}

pub fn lt_fn2<T>(a: &T, b: &T, less: &CondFunc<T>) -> Result<bool, CompareError> {
    less.test(a, b)
}

#[must_use]
pub fn lt_eq<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
    a <= b
}

pub fn lt_eq_fn<T>(a: &T, b: &T, cmp: &CompFunc<T>) -> Result<bool, CompareError> {
    cmp.compare(a, b).map(Ordering::is_le)
}

/// `a <= b` through a less-than condition, i.e. `!less(b, a)`.
pub fn lt_eq_fn2<T>(a: &T, b: &T, less: &CondFunc<T>) -> Result<bool, CompareError> {
    less.test(b, a).map(|gt| !gt)
}
