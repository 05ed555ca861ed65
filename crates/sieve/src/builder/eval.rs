use crate::{
    KEY_FIELD,
    builder::{CompositeQuery, Criterion, Operand, Operator},
    traits::Record,
    value::{Value, canonical_cmp, compare_eq, compare_order},
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of reading a named field from a record. Distinguishes a field the
/// model does not declare from one that is declared but null.
///

#[derive(Clone, Debug, PartialEq)]
enum FieldPresence {
    Present(Value),
    Missing,
}

fn read_field<R: Record>(record: &R, field: &str) -> FieldPresence {
    if field == KEY_FIELD {
        return FieldPresence::Present(record.key_value());
    }

    match R::MODEL.field(field) {
        Some(descriptor) => FieldPresence::Present(descriptor.read(record)),
        None => FieldPresence::Missing,
    }
}

impl CompositeQuery {
    /// Evaluate this query against one record.
    ///
    /// Own criteria are AND-ed across fields and within each field. The
    /// query also matches when any OR-branch matches. A query with no own
    /// criteria matches only through its branches, unless it has none.
    #[must_use]
    pub fn matches_record<R: Record>(&self, record: &R) -> bool {
        let own = self.field_criteria();
        let branches = self.or_branches();

        if own.is_empty() && branches.is_empty() {
            return true;
        }

        let own_match = !own.is_empty()
            && own.iter().all(|(field, criteria)| match read_field(record, field) {
                FieldPresence::Present(actual) => {
                    criteria.iter().all(|criterion| eval_criterion(&actual, criterion))
                }
                FieldPresence::Missing => false,
            });

        own_match || branches.iter().any(|branch| branch.matches_record(record))
    }

    /// Filter, order and paginate `records`.
    ///
    /// Ordering uses the sort keys in turn under the canonical value order,
    /// then the record key. `reverse` inverts the final order before skip and
    /// limit are applied.
    #[must_use]
    pub fn apply<'a, R, I>(&self, records: I) -> Vec<&'a R>
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        let mut rows: Vec<(Vec<Value>, Value, &'a R)> = records
            .into_iter()
            .filter(|record| self.matches_record(*record))
            .map(|record| {
                let keys = self
                    .sort_keys()
                    .iter()
                    .map(|field| match read_field(record, field) {
                        FieldPresence::Present(value) => value,
                        FieldPresence::Missing => Value::Null,
                    })
                    .collect();

                (keys, record.key_value(), record)
            })
            .collect();

        rows.sort_by(|(a_keys, a_key, _), (b_keys, b_key, _)| {
            a_keys
                .iter()
                .zip(b_keys)
                .map(|(a, b)| canonical_cmp(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| canonical_cmp(a_key, b_key))
        });

        if self.is_reversed() {
            rows.reverse();
        }

        let skip = usize::try_from(self.skip_amount()).unwrap_or(usize::MAX);
        let limit = self
            .limit_amount()
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        let out: Vec<&'a R> = rows
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, _, record)| record)
            .collect();

        tracing::trace!(
            path = R::MODEL.path,
            returned = out.len(),
            "applied composite query"
        );

        out
    }
}

///
/// Evaluate one criterion against a present field value.
///
/// Unsupported comparisons evaluate to `false`.
///
fn eval_criterion(actual: &Value, criterion: &Criterion) -> bool {
    let Criterion { operator, operand } = criterion;

    match operator {
        Operator::Eq => single(operand, |expected| compare_eq(actual, expected)),
        Operator::Ne => single(operand, |expected| !compare_eq(actual, expected)),
        Operator::Gt => ordered(actual, operand, Ordering::is_gt),
        Operator::Lt => ordered(actual, operand, Ordering::is_lt),
        Operator::Ge => ordered(actual, operand, Ordering::is_ge),
        Operator::Le => ordered(actual, operand, Ordering::is_le),
        Operator::In => operand
            .values()
            .iter()
            .any(|expected| compare_eq(actual, expected)),

        Operator::Regex => match operand {
            Operand::Pattern(regex) => regex.is_match(&actual.render()),
            _ => false,
        },
        Operator::HasPrefix => text_pair(actual, operand, |text, prefix| text.starts_with(prefix)),
        Operator::HasSuffix => text_pair(actual, operand, |text, suffix| text.ends_with(suffix)),

        Operator::IsNil => actual.is_null(),
        Operator::HasKey => single(operand, |key| actual.map_contains_key(key)),
        Operator::Contains => single(operand, |needle| actual.list_contains(needle)),
        Operator::ContainsAny => {
            actual.as_list().is_some()
                && operand
                    .values()
                    .iter()
                    .any(|needle| actual.list_contains(needle))
        }
        Operator::ContainsAll => {
            actual.as_list().is_some()
                && operand
                    .values()
                    .iter()
                    .all(|needle| actual.list_contains(needle))
        }
    }
}

// ----------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------

fn single(operand: &Operand, f: impl FnOnce(&Value) -> bool) -> bool {
    match operand {
        Operand::Value(expected) => f(expected),
        _ => false,
    }
}

fn ordered(actual: &Value, operand: &Operand, accept: fn(Ordering) -> bool) -> bool {
    single(operand, |expected| {
        compare_order(actual, expected).is_some_and(accept)
    })
}

fn text_pair(actual: &Value, operand: &Operand, f: fn(&str, &str) -> bool) -> bool {
    single(operand, |expected| match (actual.as_text(), expected.as_text()) {
        (Some(actual), Some(expected)) => f(actual, expected),
        _ => false,
    })
}
