use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use orgguard_core::Entity;
use orgguard_directory::{RepositoryError, RepositoryResult};

/// Id-keyed rows with a storage-assigned, monotonically increasing key.
#[derive(Debug)]
pub(crate) struct Table<E: Entity> {
    rows: RwLock<BTreeMap<E::Id, E>>,
    last_id: AtomicI64,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            last_id: AtomicI64::new(0),
        }
    }
}

impl<E> Table<E>
where
    E: Entity + Clone,
    E::Id: From<i64>,
{
    /// Next id, starting at 1.
    pub(crate) fn next_id(&self) -> E::Id {
        E::Id::from(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub(crate) fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, BTreeMap<E::Id, E>>> {
        self.rows
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))
    }

    pub(crate) fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, BTreeMap<E::Id, E>>> {
        self.rows
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))
    }

    pub(crate) fn get(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        Ok(self.read()?.get(&id).cloned())
    }

    pub(crate) fn filter<F>(&self, mut keep: F) -> RepositoryResult<Vec<E>>
    where
        F: FnMut(&E) -> bool,
    {
        Ok(self.read()?.values().filter(|row| keep(*row)).cloned().collect())
    }

    /// Replace an existing row; writes to unknown ids are rejected.
    pub(crate) fn replace(&self, row: E) -> RepositoryResult<E> {
        let mut rows = self.write()?;
        let id = row.id();
        match rows.get_mut(&id) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row)
            }
            None => Err(RepositoryError::Missing(format!("no record with id {id}"))),
        }
    }
}
