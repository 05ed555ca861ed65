use crate::builder::{BuilderError, Criterion, CriterionBuilder, checked_field};
use std::collections::BTreeMap;

///
/// CompositeQuery
///
/// Accumulated field criteria, OR-branches and pagination/order modifiers.
///
/// This builder:
/// - Records criteria per field; insertion order is AND order within a field
/// - Holds alternate branches that match when its own criteria do not
/// - Is purely declarative; evaluation lives in `eval`
///
/// Created by `where_field`, mutated through chained calls, and consumed
/// once by the store that executes it.
///

#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct CompositeQuery {
    current_field: String,
    field_criteria: BTreeMap<String, Vec<Criterion>>,
    ors: Vec<Self>,
    index: Option<String>,
    skip: Option<u64>,
    limit: Option<u64>,
    sort: Vec<String>,
    reverse: bool,
}

impl CompositeQuery {
    pub(crate) fn on_field(field: String) -> Self {
        Self {
            current_field: field,
            ..Self::default()
        }
    }

    /// Select another field; its criteria are AND-ed with everything so far.
    pub fn and(mut self, field: impl Into<String>) -> Result<CriterionBuilder, BuilderError> {
        self.current_field = checked_field(field.into())?;

        Ok(CriterionBuilder::new(self))
    }

    /// Add an alternate branch: the query matches if its own criteria hold or
    /// any branch matches.
    pub fn or(mut self, branch: Self) -> Self {
        self.ors.push(branch);
        self
    }

    /// Skip `amount` matching records. May be set once; negatives are rejected.
    pub fn skip(mut self, amount: i64) -> Result<Self, BuilderError> {
        self.skip = Some(set_once("skip", self.skip, amount)?);
        Ok(self)
    }

    /// Return at most `amount` records. May be set once; negatives are rejected.
    ///
    /// Zero is a real limit and yields no records. Leave the limit unset for
    /// an unbounded result.
    pub fn limit(mut self, amount: i64) -> Result<Self, BuilderError> {
        self.limit = Some(set_once("limit", self.limit, amount)?);
        Ok(self)
    }

    /// Append sort keys; ties fall back to the record key.
    pub fn sort_by<I, S>(mut self, fields: I) -> Result<Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = checked_field(field.into())?;
            self.sort.push(field);
        }

        Ok(self)
    }

    /// Invert the final ordering. Applying it twice restores the original.
    pub const fn reverse(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Ask the executing store to scan the named index.
    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.index = Some(name.into());
        self
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// No index, no field criteria and no OR-branches: matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_none() && self.field_criteria.is_empty() && self.ors.is_empty()
    }

    #[must_use]
    pub fn current_field(&self) -> &str {
        &self.current_field
    }

    /// Criteria recorded against `field`, in insertion order.
    #[must_use]
    pub fn criteria(&self, field: &str) -> &[Criterion] {
        self.field_criteria
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fields with at least one criterion, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.field_criteria.keys().map(String::as_str)
    }

    pub(crate) const fn field_criteria(&self) -> &BTreeMap<String, Vec<Criterion>> {
        &self.field_criteria
    }

    #[must_use]
    pub fn or_branches(&self) -> &[Self] {
        &self.ors
    }

    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Skip amount; zero when unset.
    #[must_use]
    pub fn skip_amount(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    /// Limit amount; `None` when unset.
    ///
    /// `Some(0)` is an explicit limit of zero and must yield no records; it
    /// never means "unlimited".
    #[must_use]
    pub const fn limit_amount(&self) -> Option<u64> {
        self.limit
    }

    #[must_use]
    pub fn sort_keys(&self) -> &[String] {
        &self.sort
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reverse
    }

    pub(crate) fn push_criterion(&mut self, criterion: Criterion) {
        self.field_criteria
            .entry(self.current_field.clone())
            .or_default()
            .push(criterion);
    }
}

fn set_once(what: &'static str, current: Option<u64>, amount: i64) -> Result<u64, BuilderError> {
    let Ok(amount) = u64::try_from(amount) else {
        tracing::debug!(what, amount, "rejected negative amount");
        return Err(BuilderError::Negative { what, amount });
    };

    if let Some(current) = current {
        tracing::debug!(what, current, "rejected second assignment");
        return Err(BuilderError::AlreadySet { what, current });
    }

    Ok(amount)
}
