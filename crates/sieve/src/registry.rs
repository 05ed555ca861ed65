//! Module: registry
//! Responsibility: process-wide index of record schemas by path.
//! Does not own: the schemas themselves (static `RecordModel`s) or evaluation.
//! Boundary: explicit `init` before `register`; no implicit global construction.

use crate::traits::Record;
use std::{
    any::TypeId,
    collections::BTreeMap,
    sync::{OnceLock, RwLock},
};
use thiserror::Error as ThisError;

///
/// RegistryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum RegistryError {
    #[error("registry is not initialized")]
    Uninitialized,

    #[error("record '{path}' already registered")]
    Duplicate { path: &'static str },

    #[error("registry lock poisoned")]
    Poisoned,
}

///
/// RecordEntry
///
/// Registered summary of one record type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordEntry {
    pub path: &'static str,
    pub type_id: TypeId,

    /// Exported field names in declaration order.
    pub fields: Vec<&'static str>,
}

impl RecordEntry {
    fn of<R: Record>() -> Self {
        Self {
            path: R::MODEL.path,
            type_id: TypeId::of::<R>(),
            fields: R::MODEL.exported_names().collect(),
        }
    }

    /// Whether this entry describes `R`.
    #[must_use]
    pub fn is<R: Record>(&self) -> bool {
        self.type_id == TypeId::of::<R>()
    }
}

///
/// Registry
///
/// Record schemas keyed by path. Usable standalone; the process-wide
/// instance is reached through `init`, `register` and `lookup`.
///

#[derive(Debug, Default)]
pub struct Registry {
    records: BTreeMap<&'static str, RecordEntry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` under its model path.
    pub fn register<R: Record>(&mut self) -> Result<RecordEntry, RegistryError> {
        let path = R::MODEL.path;
        if self.records.contains_key(path) {
            return Err(RegistryError::Duplicate { path });
        }

        let entry = RecordEntry::of::<R>();
        self.records.insert(path, entry.clone());
        tracing::debug!(path, fields = entry.fields.len(), "registered record");

        Ok(entry)
    }

    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&RecordEntry> {
        self.records.get(path)
    }

    /// Registered entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = &RecordEntry> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

///
/// GLOBAL
///

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

/// Initialize the process-wide registry. Returns `false` if it already was.
pub fn init() -> bool {
    let mut created = false;
    GLOBAL.get_or_init(|| {
        created = true;
        RwLock::new(Registry::new())
    });

    if created {
        tracing::debug!("record registry initialized");
    }

    created
}

/// Register `R` with the process-wide registry.
pub fn register<R: Record>() -> Result<RecordEntry, RegistryError> {
    let lock = GLOBAL.get().ok_or(RegistryError::Uninitialized)?;
    let mut registry = lock.write().map_err(|_| RegistryError::Poisoned)?;

    registry.register::<R>()
}

/// Look up a record entry by path in the process-wide registry.
pub fn lookup(path: &str) -> Result<Option<RecordEntry>, RegistryError> {
    let lock = GLOBAL.get().ok_or(RegistryError::Uninitialized)?;
    let registry = lock.read().map_err(|_| RegistryError::Poisoned)?;

    Ok(registry.lookup(path).cloned())
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Person;

    #[test]
    fn register_records_exported_fields() {
        let mut registry = Registry::new();
        let entry = registry.register::<Person>().expect("first registration");

        assert_eq!(entry.path, "test::Person");
        assert_eq!(entry.fields, ["Name", "Age", "Nickname", "Tags", "Attrs", "Score"]);
        assert!(entry.is::<Person>());
        assert_eq!(registry.lookup("test::Person"), Some(&entry));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register::<Person>().expect("first registration");

        assert_eq!(
            registry.register::<Person>(),
            Err(RegistryError::Duplicate {
                path: "test::Person"
            })
        );
    }

    #[test]
    fn missing_path_resolves_to_none() {
        let registry = Registry::new();

        assert!(registry.lookup("test::Missing").is_none());
        assert!(registry.is_empty());
    }

    // The process-wide instance is shared by every test in this binary, so
    // its whole lifecycle is exercised in one test.
    #[test]
    fn global_registry_requires_init() {
        assert_eq!(register::<Person>(), Err(RegistryError::Uninitialized));
        assert_eq!(lookup("test::Person"), Err(RegistryError::Uninitialized));

        assert!(init());
        assert!(!init());

        register::<Person>().expect("registration after init");
        let entry = lookup("test::Person")
            .expect("initialized")
            .expect("registered path");
        assert!(entry.is::<Person>());
        assert!(matches!(
            register::<Person>(),
            Err(RegistryError::Duplicate { .. })
        ));
    }
}
