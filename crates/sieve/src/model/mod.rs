//! Runtime record schema: typed field descriptors in place of reflection.

mod field;

pub use field::FieldDescriptor;

///
/// RecordModel
///
/// Static schema for one record type: a path used by the registry and the
/// ordered list of addressable fields.
///

pub struct RecordModel<R: 'static> {
    /// Fully-qualified record path (stable name).
    pub path: &'static str,

    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor<R>],
}

impl<R: 'static> RecordModel<R> {
    #[must_use]
    pub const fn new(path: &'static str, fields: &'static [FieldDescriptor<R>]) -> Self {
        Self { path, fields }
    }

    /// Look up a field descriptor by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Names of every exported field.
    pub fn exported_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.exported)
            .map(|field| field.name)
    }
}
