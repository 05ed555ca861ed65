use crate::value::Value;
use std::fmt;

///
/// FieldDescriptor
///
/// One addressable field: its name, whether callers outside the record may
/// query it, and how to read it.
///

pub struct FieldDescriptor<R> {
    /// Field name as used in criteria and sort keys.
    pub name: &'static str,

    /// Unexported fields exist in the schema but reject criteria.
    pub exported: bool,

    /// Reads the field from a record.
    pub accessor: fn(&R) -> Value,
}

impl<R> FieldDescriptor<R> {
    #[must_use]
    pub const fn exported(name: &'static str, accessor: fn(&R) -> Value) -> Self {
        Self {
            name,
            exported: true,
            accessor,
        }
    }

    #[must_use]
    pub const fn unexported(name: &'static str, accessor: fn(&R) -> Value) -> Self {
        Self {
            name,
            exported: false,
            accessor,
        }
    }

    /// Read this field from `record`.
    #[must_use]
    pub fn read(&self, record: &R) -> Value {
        (self.accessor)(record)
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("exported", &self.exported)
            .finish_non_exhaustive()
    }
}
