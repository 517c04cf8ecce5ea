//! Typed in-memory record collections, one per domain table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tally_core::records::{Invoice, Quote, Receipt, Subscription, Task, TimeEntry};
use tally_core::{ActorId, RecordId};

/// Row types storable in a [`RecordStore`] collection.
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> &RecordId;
    fn actor(&self) -> &ActorId;
}

macro_rules! impl_record {
    ($($ty:ty),+) => {
        $(impl Record for $ty {
            fn id(&self) -> &RecordId {
                &self.id
            }
            fn actor(&self) -> &ActorId {
                &self.actor
            }
        })+
    };
}

impl_record!(Task, TimeEntry, Invoice, Quote, Receipt, Subscription);

/// In-memory collection keyed by record id.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    inner: Arc<RwLock<HashMap<RecordId, T>>>,
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Record> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: T) {
        self.inner
            .write()
            .unwrap()
            .insert(record.id().clone(), record);
    }

    pub fn get(&self, id: &RecordId) -> Option<T> {
        self.inner.read().unwrap().get(id).cloned()
    }

    pub fn remove(&self, id: &RecordId) -> Option<T> {
        self.inner.write().unwrap().remove(id)
    }

    pub fn list(&self) -> Vec<T> {
        self.inner.read().unwrap().values().cloned().collect()
    }

    pub fn list_by_actor(&self, actor: &ActorId) -> Vec<T> {
        self.inner
            .read()
            .unwrap()
            .values()
            .filter(|r| r.actor() == actor)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn update(&self, id: &RecordId, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut map = self.inner.write().unwrap();
        if let Some(record) = map.get_mut(id) {
            f(record);
            Some(record.clone())
        } else {
            None
        }
    }
}
