use crate::{
    builder::{BuilderError, CompositeQuery},
    traits::FieldValue,
    value::Value,
};
use derive_more::Display;
use regex::Regex;
use serde::{Deserialize, Serialize};

///
/// Operator
///
/// Closed tag set bound by one criterion. Serialized and displayed by tag.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[display("eq")]
    Eq,
    #[display("ne")]
    Ne,
    #[display("gt")]
    Gt,
    #[display("lt")]
    Lt,
    #[display("ge")]
    Ge,
    #[display("le")]
    Le,
    #[display("in")]
    In,
    #[display("re")]
    #[serde(rename = "re")]
    Regex,
    #[display("sw")]
    #[serde(rename = "sw")]
    HasPrefix,
    #[display("ew")]
    #[serde(rename = "ew")]
    HasSuffix,
    #[display("isnil")]
    IsNil,
    #[display("hk")]
    #[serde(rename = "hk")]
    HasKey,
    #[display("contains")]
    Contains,
    #[display("any")]
    #[serde(rename = "any")]
    ContainsAny,
    #[display("all")]
    #[serde(rename = "all")]
    ContainsAll,
}

///
/// Operand
///
/// What a criterion compares against. Variadic operators store a single
/// `Value` when given exactly one argument and `Values` otherwise.
///

#[derive(Clone, Debug)]
pub enum Operand {
    None,
    Value(Value),
    Values(Vec<Value>),
    Pattern(Regex),
}

impl Operand {
    fn from_values(mut values: Vec<Value>) -> Self {
        if values.len() == 1 {
            values.pop().map_or(Self::None, Self::Value)
        } else {
            Self::Values(values)
        }
    }

    /// Every value this operand carries, regardless of storage shape.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Value(value) => std::slice::from_ref(value),
            Self::Values(values) => values,
            Self::None | Self::Pattern(_) => &[],
        }
    }
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Values(a), Self::Values(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

///
/// Criterion
///
/// One operator/operand assertion recorded against a field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Criterion {
    pub operator: Operator,
    pub operand: Operand,
}

///
/// CriterionBuilder
///
/// A field has been selected; exactly one operator call binds a criterion
/// and hands the owning `CompositeQuery` back for chaining.
///

#[derive(Debug)]
#[must_use = "a field without an operator records nothing"]
pub struct CriterionBuilder {
    query: CompositeQuery,
}

impl CriterionBuilder {
    pub(crate) const fn new(query: CompositeQuery) -> Self {
        Self { query }
    }

    /// Field this builder will record against.
    #[must_use]
    pub fn field(&self) -> &str {
        self.query.current_field()
    }

    /// Abandon the field and return the composite query unchanged.
    #[must_use]
    pub fn into_query(self) -> CompositeQuery {
        self.query
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Field equals `value`.
    pub fn eq(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Eq, value)
    }

    /// Field does not equal `value`.
    pub fn ne(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Ne, value)
    }

    /// Field is greater than `value`.
    pub fn gt(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Gt, value)
    }

    /// Field is lower than `value`.
    pub fn lt(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Lt, value)
    }

    /// Field is greater than or equal to `value`.
    pub fn ge(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Ge, value)
    }

    /// Field is lower than or equal to `value`.
    pub fn le(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Le, value)
    }

    /// Field equals one of `values`.
    pub fn in_values<I, V>(self, values: I) -> CompositeQuery
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        self.many(Operator::In, values)
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Field, rendered as text, matches `pattern`.
    pub fn matches(self, pattern: Regex) -> CompositeQuery {
        self.bind(Operator::Regex, Operand::Pattern(pattern))
    }

    /// Compile `pattern` and bind it like `matches`.
    pub fn matches_str(self, pattern: &str) -> Result<CompositeQuery, BuilderError> {
        let regex = Regex::new(pattern).map_err(|err| {
            tracing::debug!(pattern, error = %err, "rejected pattern");
            BuilderError::InvalidPattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            }
        })?;

        Ok(self.matches(regex))
    }

    /// Text field starts with `prefix`.
    pub fn has_prefix(self, prefix: impl Into<String>) -> CompositeQuery {
        self.bind(Operator::HasPrefix, Operand::Value(Value::Text(prefix.into())))
    }

    /// Text field ends with `suffix`.
    pub fn has_suffix(self, suffix: impl Into<String>) -> CompositeQuery {
        self.bind(Operator::HasSuffix, Operand::Value(Value::Text(suffix.into())))
    }

    // ------------------------------------------------------------------
    // Structural
    // ------------------------------------------------------------------

    /// Field is null.
    pub fn is_nil(self) -> CompositeQuery {
        self.bind(Operator::IsNil, Operand::None)
    }

    /// Map field has key `key`.
    pub fn has_key(self, key: impl FieldValue) -> CompositeQuery {
        self.single(Operator::HasKey, key)
    }

    /// List field contains `value`.
    pub fn contains(self, value: impl FieldValue) -> CompositeQuery {
        self.single(Operator::Contains, value)
    }

    /// List field contains at least one of `values`.
    pub fn contains_any<I, V>(self, values: I) -> CompositeQuery
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        self.many(Operator::ContainsAny, values)
    }

    /// List field contains every one of `values`.
    pub fn contains_all<I, V>(self, values: I) -> CompositeQuery
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        self.many(Operator::ContainsAll, values)
    }

    // ------------------------------------------------------------------
    // Internal helpers (not public API)
    // ------------------------------------------------------------------

    fn single(self, operator: Operator, value: impl FieldValue) -> CompositeQuery {
        self.bind(operator, Operand::Value(value.to_value()))
    }

    fn many<I, V>(self, operator: Operator, values: I) -> CompositeQuery
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        let values = values.into_iter().map(|v| v.to_value()).collect();

        self.bind(operator, Operand::from_values(values))
    }

    fn bind(self, operator: Operator, operand: Operand) -> CompositeQuery {
        let mut query = self.query;
        query.push_criterion(Criterion { operator, operand });

        query
    }
}
