//! Optimistic list mutations.

use std::future::Future;
use std::sync::Arc;
use taskdeck_core::task::{Task, TaskStatus};
use taskdeck_core::{Result, TaskdeckError};
use tokio::sync::RwLock;

/// An item addressable by id inside an [`OptimisticList`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Lens onto one mutable field of a record.
pub struct Field<T, V> {
    pub name: &'static str,
    pub get: fn(&T) -> V,
    pub set: fn(&mut T, V),
}

impl Field<Task, TaskStatus> {
    pub fn task_status() -> Self {
        Field {
            name: "status",
            get: |task| task.status,
            set: |task, status| task.status = status,
        }
    }
}

impl Field<Task, Option<String>> {
    pub fn task_assignee() -> Self {
        Field {
            name: "assignee",
            get: |task| task.assignee_id.clone(),
            set: |task, assignee| task.assignee_id = assignee,
        }
    }
}

/// A list whose items are edited before the server confirms the edit.
///
/// Only the mutated field is captured and restored, so concurrent edits to
/// different fields of one record may race. The last write wins.
#[derive(Clone)]
pub struct OptimisticList<T: Record> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T: Record> Default for OptimisticList<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Record> OptimisticList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.items.read().await.iter().find(|i| i.id() == id).cloned()
    }

    pub async fn replace(&self, items: Vec<T>) {
        *self.items.write().await = items;
    }

    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    /// Writes `next` into `field` of record `id`, then confirms remotely.
    ///
    /// `remote` receives the full record as it stands after the local write.
    /// On failure the field is restored to its previous value, if the record
    /// is still present, and the error is returned.
    pub async fn mutate<V, F, Fut>(
        &self,
        id: &str,
        field: &Field<T, V>,
        next: V,
        remote: F,
    ) -> Result<()>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let (previous, current) = {
            let mut items = self.items.write().await;
            let item = items
                .iter_mut()
                .find(|i| i.id() == id)
                .ok_or_else(|| TaskdeckError::validation(format!("No record with id {id}")))?;
            let previous = (field.get)(item);
            (field.set)(item, next);
            (previous, item.clone())
        };

        if let Err(e) = remote(current).await {
            tracing::debug!(
                target: "taskdeck::tasks",
                "Reverting {} on {}: {}",
                field.name,
                id,
                e
            );
            let mut items = self.items.write().await;
            if let Some(item) = items.iter_mut().find(|i| i.id() == id) {
                (field.set)(item, previous);
            }
            return Err(e);
        }
        Ok(())
    }
}
