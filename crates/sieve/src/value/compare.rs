use crate::value::Value;
use std::cmp::Ordering;

/// Ordering between two values, widening across numeric variants.
///
/// Returns `None` for mismatched or non-orderable variants, and for floats
/// that do not compare (NaN). Maps are never ordered.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Blob(a), Value::Blob(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::List(a), Value::List(b)) => compare_list(a, b),
        (Value::Map(_), _) | (_, Value::Map(_)) => None,
        _ => compare_numeric(left, right),
    }
}

/// Equality under the same widening rules as `compare_order`.
/// Maps compare entry by entry in written order.
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ak, av), (bk, bv))| compare_eq(ak, bk) && compare_eq(av, bv))
        }
        _ => compare_order(left, right) == Some(Ordering::Equal),
    }
}

/// Total canonical comparator used for sorting.
///
/// Ordering rules:
/// 1. Canonical variant rank (numeric variants share one rank)
/// 2. Variant-specific comparison for same-ranked values
///
/// Numbers order by exact value across `Int`, `Uint` and `Float64`, with
/// `-0.0 == 0.0` and every NaN after every other number.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::List(a), Value::List(b)) => a
            .iter()
            .zip(b)
            .map(|(x, y)| canonical_cmp(x, y))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        (Value::Map(a), Value::Map(b)) => a
            .iter()
            .zip(b)
            .map(|((ak, av), (bk, bv))| canonical_cmp(ak, bk).then_with(|| canonical_cmp(av, bv)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ if canonical_rank(left) == NUMERIC_RANK => canonical_numeric(left, right),
        _ => compare_order(left, right).unwrap_or(Ordering::Equal),
    }
}

const NUMERIC_RANK: u8 = 2;

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Float64(_) | Value::Int(_) | Value::Uint(_) => NUMERIC_RANK,
        Value::Text(_) => 3,
        Value::Blob(_) => 4,
        Value::List(_) => 5,
        Value::Map(_) => 6,
    }
}

fn compare_list(left: &[Value], right: &[Value]) -> Option<Ordering> {
    for (a, b) in left.iter().zip(right) {
        match compare_order(a, b)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
    }

    Some(left.len().cmp(&right.len()))
}

// NaN sorts after every other number; all NaNs tie.
fn canonical_numeric(left: &Value, right: &Value) -> Ordering {
    match (is_nan(left), is_nan(right)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_numeric(left, right).unwrap_or(Ordering::Equal),
    }
}

const fn is_nan(value: &Value) -> bool {
    matches!(value, Value::Float64(f) if f.is_nan())
}

fn compare_numeric(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Float64(a), other) => {
            integer(other).and_then(|b| cmp_int_float(b, *a).map(Ordering::reverse))
        }
        (other, Value::Float64(b)) => integer(other).and_then(|a| cmp_int_float(a, *b)),
        _ => Some(integer(left)?.cmp(&integer(right)?)),
    }
}

// Every `Int` and `Uint` fits in an `i128`, so integer pairs compare exactly.
fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Int(v) => Some(i128::from(*v)),
        Value::Uint(v) => Some(i128::from(*v)),
        _ => None,
    }
}

/// Exact comparison of an integer with a float, without rounding the
/// integer through `f64`. `None` only when `float` is NaN.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float.is_infinite() {
        return Some(if float > 0.0 { Ordering::Less } else { Ordering::Greater });
    }

    // Integer-valued floats convert exactly; anything beyond the i128 range
    // saturates, which still dominates every 64-bit integer.
    let whole = float.trunc();
    let fraction = float - whole;

    Some(int.cmp(&(whole as i128)).then_with(|| {
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}
