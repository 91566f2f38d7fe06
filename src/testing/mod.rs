use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::app::{self, AppState};
use crate::config::AppConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::demo::{next_update, timestamp_now, Demo, NewDemo};
use crate::services::DemoStore;

/// In-process `DemoStore` for router tests.
///
/// Counts every call so tests can assert a request never reached the store,
/// and can be switched into a failing mode to exercise store errors.
#[derive(Default)]
pub struct MemoryStore {
    demos: RwLock<BTreeMap<ObjectId, Demo>>,
    calls: AtomicUsize,
    failure: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn fail_with(&self, message: &str) {
        *self.failure.write().await = Some(message.to_string());
    }

    pub async fn len(&self) -> usize {
        self.demos.read().await.len()
    }

    async fn enter(&self) -> Result<(), DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().await.as_deref() {
            Some(message) => Err(DatabaseError::Mongo(
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, message.to_string()).into(),
            )),
            None => Ok(()),
        }
    }

    fn missing(id: ObjectId) -> DatabaseError {
        DatabaseError::NotFound(format!("demo {} not found", id))
    }
}

#[async_trait]
impl DemoStore for MemoryStore {
    async fn add_demo(&self, input: NewDemo) -> Result<ObjectId, DatabaseError> {
        self.enter().await?;
        let demo = Demo::new(input, timestamp_now());
        let id = demo.id;
        self.demos.write().await.insert(id, demo);
        Ok(id)
    }

    async fn get_demo(&self, id: ObjectId) -> Result<Demo, DatabaseError> {
        self.enter().await?;
        self.demos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing(id))
    }

    async fn all_demos(&self) -> Result<Vec<Demo>, DatabaseError> {
        self.enter().await?;
        Ok(self.demos.read().await.values().cloned().collect())
    }

    async fn update_demo(&self, id: ObjectId, score: i64) -> Result<(), DatabaseError> {
        self.enter().await?;
        let mut demos = self.demos.write().await;
        let demo = demos.get_mut(&id).ok_or_else(|| Self::missing(id))?;
        demo.score = score;
        demo.last_update = next_update(demo.last_update, timestamp_now());
        Ok(())
    }

    async fn delete_demo(&self, id: ObjectId) -> Result<(), DatabaseError> {
        self.enter().await?;
        self.demos
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::missing(id))
    }

    async fn count_demos(&self) -> Result<u64, DatabaseError> {
        self.enter().await?;
        Ok(self.demos.read().await.len() as u64)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.enter().await
    }
}

/// Router wired to a fresh `MemoryStore`
pub fn test_app(config: AppConfig) -> (axum::Router, Arc<MemoryStore>) {
    let store = MemoryStore::new();
    let state = AppState::new(config, store.clone());
    (app::app(state), store)
}
