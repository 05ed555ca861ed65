use crate::{
    builder::{BuilderError, ValidateError},
    compare::CompareError,
    query::QueryError,
    registry::RegistryError,
    store::StoreError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error aggregating every module concern.
/// Each module returns its own error; this type exists for callers that
/// mix several of them behind one `?`.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Stable classification of what went wrong.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Compare(_) => ErrorClass::InvariantViolation,
            Self::Query(err) => match err {
                QueryError::Compare(_) | QueryError::NilAccessor | QueryError::NilQuery => {
                    ErrorClass::InvariantViolation
                }
            },
            Self::Builder(err) => match err {
                BuilderError::AlreadySet { .. } => ErrorClass::Conflict,
                BuilderError::NotExported { .. }
                | BuilderError::Negative { .. }
                | BuilderError::InvalidPattern { .. } => ErrorClass::InvalidInput,
            },
            Self::Validate(err) => match err {
                ValidateError::UnknownField { .. } => ErrorClass::NotFound,
                ValidateError::NotExported { .. } => ErrorClass::InvalidInput,
            },
            Self::Registry(err) => match err {
                RegistryError::Uninitialized => ErrorClass::Unavailable,
                RegistryError::Duplicate { .. } => ErrorClass::Conflict,
                RegistryError::Poisoned => ErrorClass::Internal,
            },
            Self::Store(err) => match err {
                StoreError::Closed | StoreError::TxFinished => ErrorClass::Unavailable,
                StoreError::ReadOnlyTx => ErrorClass::Conflict,
                StoreError::NotFound { .. } => ErrorClass::NotFound,
                StoreError::AppendUnsupported { .. } => ErrorClass::Unsupported,
                StoreError::Poisoned => ErrorClass::Internal,
            },
        }
    }

    /// Module that raised the error.
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Compare(_) => ErrorOrigin::Compare,
            Self::Query(_) => ErrorOrigin::Query,
            Self::Builder(_) => ErrorOrigin::Builder,
            Self::Validate(_) => ErrorOrigin::Validate,
            Self::Registry(_) => ErrorOrigin::Registry,
            Self::Store(_) => ErrorOrigin::Store,
        }
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Internal,
    InvalidInput,
    InvariantViolation,
    NotFound,
    Unavailable,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Internal => "internal",
            Self::InvalidInput => "invalid_input",
            Self::InvariantViolation => "invariant_violation",
            Self::NotFound => "not_found",
            Self::Unavailable => "unavailable",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Compare,
    Query,
    Builder,
    Validate,
    Registry,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Compare => "compare",
            Self::Query => "query",
            Self::Builder => "builder",
            Self::Validate => "validate",
            Self::Registry => "registry",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_errors_convert_and_classify() {
        let err: Error = BuilderError::AlreadySet {
            what: "skip",
            current: 3,
        }
        .into();

        assert_eq!(err.class(), ErrorClass::Conflict);
        assert_eq!(err.origin(), ErrorOrigin::Builder);
        assert_eq!(err.to_string(), "skip is already set to 3");
    }

    #[test]
    fn absent_function_errors_are_invariant_violations() {
        let err: Error = QueryError::NilAccessor.into();

        assert_eq!(err.class(), ErrorClass::InvariantViolation);
        assert_eq!(err.origin().to_string(), "query");
    }

    #[test]
    fn store_errors_keep_their_message() {
        let err: Error = StoreError::NotFound {
            key: "alice".to_string(),
        }
        .into();

        assert_eq!(err.class().to_string(), "not_found");
        assert!(err.to_string().contains("alice"));
    }
}
