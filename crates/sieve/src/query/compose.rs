use crate::query::{Query, QueryError};
use std::{fmt, sync::Arc};

///
/// Accessor
///
/// Extracts a derived value `V` from a `T`, typically a field read.
/// `Accessor::default()` is absent and rejected by `compose_query`.
///

pub struct Accessor<T, V>(Option<Arc<dyn Fn(&T) -> V + Send + Sync>>);

impl<T, V> Accessor<T, V> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        Self(Some(Arc::new(f)))
    }

    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T, V> Default for Accessor<T, V> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T, V> fmt::Debug for Accessor<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_absent() { "absent" } else { "present" };
        f.debug_tuple("Accessor").field(&state).finish()
    }
}

/// Lift a query over `V` to a query over `T` by reading `V` through `accessor`.
///
/// Both arguments are checked here; the returned query never fails.
pub fn compose_query<T, V>(
    accessor: Accessor<T, V>,
    query: impl Into<Option<Query<V>>>,
) -> Result<Query<T>, QueryError>
where
    T: 'static,
    V: 'static,
{
    let accessor = accessor.0.ok_or(QueryError::NilAccessor)?;
    let query = query.into().ok_or(QueryError::NilQuery)?;

    Ok(Query::func(move |x: &T| query.matches(&accessor(x))))
}
