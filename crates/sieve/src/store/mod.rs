//! Module: store
//! Responsibility: the store/transaction boundary that consumes value predicates.
//! Does not own: persistence, durability or isolation beyond one process lock.
//! Boundary: `Store` hands out `Tx` handles; `for_each` filters with `Query<V>`.

mod memory;


use crate::query::Query;
use thiserror::Error as ThisError;

// re-exports
pub use memory::MemoryStore;

///
/// StoreError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,

    #[error("transaction is read-only")]
    ReadOnlyTx,

    #[error("transaction already finished")]
    TxFinished,

    #[error("key not found: {key}")]
    NotFound { key: String },

    #[error("append is not supported for {type_name}")]
    AppendUnsupported { type_name: &'static str },

    #[error("store lock poisoned")]
    Poisoned,
}

///
/// Store
///
/// Versioned key-value store. Every access runs inside a transaction that
/// lives for the duration of the callback.
///

pub trait Store<K, V> {
    /// Version of the committed data.
    fn version(&self) -> u64;

    /// Run `f` in a read-only transaction.
    fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx<K, V>) -> Result<T, E>,
        E: From<StoreError>;

    /// Run `f` in a read-write transaction, committing when it returns `Ok`
    /// and discarding staged writes when it returns `Err`.
    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Tx<K, V>) -> Result<T, E>,
        E: From<StoreError>;

    /// Reject further transactions.
    fn close(&self) -> Result<(), StoreError>;
}

///
/// Tx
///
/// One transaction. Reads observe this transaction's own staged writes.
///

pub trait Tx<K, V> {
    /// Data version this transaction started from.
    fn version(&self) -> u64;

    /// Visit entries in key order that match any of `ors` (every entry when
    /// `ors` is empty). Returning `false` from `f` stops the walk.
    fn for_each(
        &self,
        f: &mut dyn FnMut(&K, &V) -> bool,
        ors: &[Query<V>],
    ) -> Result<(), StoreError>;

    fn get(&self, key: &K) -> Result<V, StoreError>;

    fn set(&mut self, key: K, value: V) -> Result<(), StoreError>;

    /// Append `value` onto the value stored at `key`, or store it when the
    /// key is absent.
    fn append(&mut self, key: K, value: V) -> Result<(), StoreError>;

    fn delete(&mut self, key: &K) -> Result<(), StoreError>;

    fn commit(&mut self) -> Result<(), StoreError>;

    /// Abort unless already committed. Idempotent.
    fn close(&mut self) -> Result<(), StoreError>;
}

///
/// Append
///
/// How a stored value absorbs an appended one. Types without a natural
/// append keep the provided method and reject it.
///

pub trait Append: Sized {
    fn append(&mut self, _other: Self) -> Result<(), StoreError> {
        Err(StoreError::AppendUnsupported {
            type_name: std::any::type_name::<Self>(),
        })
    }
}

impl<T> Append for Vec<T> {
    fn append(&mut self, other: Self) -> Result<(), StoreError> {
        self.extend(other);
        Ok(())
    }
}

impl Append for String {
    fn append(&mut self, other: Self) -> Result<(), StoreError> {
        self.push_str(&other);
        Ok(())
    }
}

impl Append for crate::value::Value {
    fn append(&mut self, other: Self) -> Result<(), StoreError> {
        match (self, other) {
            (Self::List(items), Self::List(more)) => items.extend(more),
            (Self::List(items), other) => items.push(other),
            (Self::Text(text), Self::Text(more)) => text.push_str(&more),
            (Self::Blob(bytes), Self::Blob(more)) => bytes.extend(more),
            _ => {
                return Err(StoreError::AppendUnsupported {
                    type_name: "mismatched Value variants",
                });
            }
        }

        Ok(())
    }
}
