use crate::{
    query::Query,
    store::{Append, Store, StoreError, Tx},
};
use std::{
    collections::BTreeMap,
    fmt,
    ops::Deref,
    sync::{
        RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicBool, Ordering},
    },
};

///
/// MemoryStore
///
/// Ordered in-process store. Readers share the lock; a read-write
/// transaction holds it exclusively until it finishes.
///

#[derive(Debug)]
pub struct MemoryStore<K, V> {
    inner: RwLock<Snapshot<K, V>>,
    closed: AtomicBool,
}

#[derive(Debug)]
struct Snapshot<K, V> {
    version: u64,
    data: BTreeMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Snapshot {
                version: 0,
                data: BTreeMap::new(),
            }),
            closed: AtomicBool::new(false),
        }
    }

    fn check_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

impl<K, V> Store<K, V> for MemoryStore<K, V>
where
    K: Clone + fmt::Debug + Ord,
    V: Append + Clone,
{
    fn version(&self) -> u64 {
        self.inner
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().version, |guard| guard.version)
    }

    fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx<K, V>) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.check_open()?;
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let mut tx = MemoryTx::new(Guard::Read(guard));

        let result = f(&mut tx);
        tx.close()?;

        result
    }

    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx<K, V>) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.check_open()?;
        let guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let mut tx = MemoryTx::new(Guard::Write(guard));

        match f(&mut tx) {
            Ok(value) => {
                if !tx.finished {
                    tx.commit()?;
                }
                Ok(value)
            }
            Err(err) => {
                tx.close()?;
                Err(err)
            }
        }
    }

    fn close(&self) -> Result<(), StoreError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("memory store closed");
        }

        Ok(())
    }
}

impl<K: Ord, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// Guard
///

enum Guard<'a, K, V> {
    Read(RwLockReadGuard<'a, Snapshot<K, V>>),
    Write(RwLockWriteGuard<'a, Snapshot<K, V>>),
}

impl<K, V> Deref for Guard<'_, K, V> {
    type Target = Snapshot<K, V>;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Read(guard) => guard,
            Self::Write(guard) => guard,
        }
    }
}

///
/// MemoryTx
///
/// Staged writes map a key to its new value, or to `None` for a delete.
///

struct MemoryTx<'a, K, V> {
    guard: Guard<'a, K, V>,
    staged: BTreeMap<K, Option<V>>,
    version: u64,
    finished: bool,
}

impl<'a, K, V> MemoryTx<'a, K, V>
where
    K: Clone + fmt::Debug + Ord,
    V: Append + Clone,
{
    fn new(guard: Guard<'a, K, V>) -> Self {
        let version = guard.version;

        Self {
            guard,
            staged: BTreeMap::new(),
            version,
            finished: false,
        }
    }

    fn writable(&self) -> Result<(), StoreError> {
        if self.finished {
            return Err(StoreError::TxFinished);
        }
        match self.guard {
            Guard::Read(_) => Err(StoreError::ReadOnlyTx),
            Guard::Write(_) => Ok(()),
        }
    }

    fn readable(&self) -> Result<(), StoreError> {
        if self.finished {
            Err(StoreError::TxFinished)
        } else {
            Ok(())
        }
    }

    // Current value of `key` as seen by this transaction.
    fn current(&self, key: &K) -> Option<&V> {
        match self.staged.get(key) {
            Some(staged) => staged.as_ref(),
            None => self.guard.data.get(key),
        }
    }
}

impl<K, V> Tx<K, V> for MemoryTx<'_, K, V>
where
    K: Clone + fmt::Debug + Ord,
    V: Append + Clone,
{
    fn version(&self) -> u64 {
        self.version
    }

    fn for_each(
        &self,
        f: &mut dyn FnMut(&K, &V) -> bool,
        ors: &[Query<V>],
    ) -> Result<(), StoreError> {
        self.readable()?;

        let mut merged: BTreeMap<&K, &V> = self.guard.data.iter().collect();
        for (key, staged) in &self.staged {
            match staged {
                Some(value) => {
                    merged.insert(key, value);
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        for (key, value) in merged {
            if !ors.is_empty() && !ors.iter().any(|query| query.matches(value)) {
                continue;
            }
            if !f(key, value) {
                break;
            }
        }

        Ok(())
    }

    fn get(&self, key: &K) -> Result<V, StoreError> {
        self.readable()?;

        self.current(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: format!("{key:?}"),
            })
    }

    fn set(&mut self, key: K, value: V) -> Result<(), StoreError> {
        self.writable()?;
        self.staged.insert(key, Some(value));

        Ok(())
    }

    fn append(&mut self, key: K, value: V) -> Result<(), StoreError> {
        self.writable()?;

        let next = match self.current(&key) {
            Some(existing) => {
                let mut existing = existing.clone();
                Append::append(&mut existing, value)?;
                existing
            }
            None => value,
        };
        self.staged.insert(key, Some(next));

        Ok(())
    }

    fn delete(&mut self, key: &K) -> Result<(), StoreError> {
        self.writable()?;

        if self.current(key).is_none() {
            return Err(StoreError::NotFound {
                key: format!("{key:?}"),
            });
        }
        self.staged.insert(key.clone(), None);

        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.writable()?;

        let Guard::Write(snapshot) = &mut self.guard else {
            return Err(StoreError::ReadOnlyTx);
        };

        let writes = self.staged.len();
        for (key, staged) in std::mem::take(&mut self.staged) {
            match staged {
                Some(value) => {
                    snapshot.data.insert(key, value);
                }
                None => {
                    snapshot.data.remove(&key);
                }
            }
        }
        snapshot.version += 1;
        self.finished = true;

        tracing::trace!(version = snapshot.version, writes, "memory store commit");

        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if !self.finished {
            self.staged.clear();
            self.finished = true;
        }

        Ok(())
    }
}
