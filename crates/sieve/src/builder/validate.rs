use crate::{KEY_FIELD, builder::CompositeQuery, traits::Record};
use thiserror::Error as ThisError;

///
/// ValidateError
///
/// A composite query names a field the target record model cannot serve.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidateError {
    #[error("unknown field '{field}' on {path}")]
    UnknownField { path: &'static str, field: String },

    #[error("field '{field}' on {path} is not exported")]
    NotExported { path: &'static str, field: String },
}

impl CompositeQuery {
    /// Check every criterion field, sort key and OR-branch against `R`'s model.
    ///
    /// The key sentinel is always valid. Unknown fields would otherwise
    /// evaluate to a silent mismatch.
    pub fn validate<R: Record>(&self) -> Result<(), ValidateError> {
        for field in self.fields().chain(self.sort_keys().iter().map(String::as_str)) {
            check_field::<R>(field)?;
        }

        for branch in self.or_branches() {
            branch.validate::<R>()?;
        }

        Ok(())
    }
}

fn check_field<R: Record>(field: &str) -> Result<(), ValidateError> {
    if field == KEY_FIELD {
        return Ok(());
    }

    let path = R::MODEL.path;

    match R::MODEL.field(field) {
        Some(descriptor) if descriptor.exported => Ok(()),
        Some(_) => Err(ValidateError::NotExported {
            path,
            field: field.to_string(),
        }),
        None => Err(ValidateError::UnknownField {
            path,
            field: field.to_string(),
        }),
    }
}
