use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use tracing::info;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::demo::{timestamp_now, Demo, NewDemo};
use crate::database::repository::Repository;

/// Collection holding every Demo document
pub const COLLECTION_NAME: &str = "Demo";

/// Storage operations the HTTP handlers depend on
#[async_trait]
pub trait DemoStore: Send + Sync {
    /// Insert a new document and return its generated id
    async fn add_demo(&self, input: NewDemo) -> Result<ObjectId, DatabaseError>;

    async fn get_demo(&self, id: ObjectId) -> Result<Demo, DatabaseError>;

    async fn all_demos(&self) -> Result<Vec<Demo>, DatabaseError>;

    /// Set a new score and refresh `last_update`
    async fn update_demo(&self, id: ObjectId, score: i64) -> Result<(), DatabaseError>;

    async fn delete_demo(&self, id: ObjectId) -> Result<(), DatabaseError>;

    async fn count_demos(&self) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Reword a repository `NotFound` so it names the requested id
fn missing_demo(id: ObjectId) -> impl FnOnce(DatabaseError) -> DatabaseError {
    move |e| match e {
        DatabaseError::NotFound(_) => DatabaseError::NotFound(format!("demo {} not found", id)),
        other => other,
    }
}

/// MongoDB-backed store
pub struct DemoService {
    manager: DatabaseManager,
    repository: Repository<Demo>,
}

impl DemoService {
    pub fn new(manager: DatabaseManager) -> Self {
        let repository = Repository::new(COLLECTION_NAME, manager.clone());
        Self { manager, repository }
    }
}

#[async_trait]
impl DemoStore for DemoService {
    async fn add_demo(&self, input: NewDemo) -> Result<ObjectId, DatabaseError> {
        let demo = Demo::new(input, timestamp_now());
        self.repository.insert_one(&demo).await?;
        info!(id = %demo.id, "created demo");
        Ok(demo.id)
    }

    async fn get_demo(&self, id: ObjectId) -> Result<Demo, DatabaseError> {
        self.repository
            .find_404(doc! { "_id": id })
            .await
            .map_err(missing_demo(id))
    }

    async fn all_demos(&self) -> Result<Vec<Demo>, DatabaseError> {
        self.repository.find_all(doc! {}).await
    }

    async fn update_demo(&self, id: ObjectId, score: i64) -> Result<(), DatabaseError> {
        // Pipeline form so the store keeps last_update strictly increasing,
        // even within one millisecond or across a clock step.
        let update = vec![doc! {
            "$set": {
                "score": score,
                "last_update": {
                    "$max": [BsonDateTime::now(), { "$add": ["$last_update", 1] }]
                }
            }
        }];
        self.repository
            .update_one(doc! { "_id": id }, update)
            .await
            .map_err(missing_demo(id))?;
        info!(%id, score, "updated demo");
        Ok(())
    }

    async fn delete_demo(&self, id: ObjectId) -> Result<(), DatabaseError> {
        self.repository
            .delete_one(doc! { "_id": id })
            .await
            .map_err(missing_demo(id))?;
        info!(%id, "deleted demo");
        Ok(())
    }

    async fn count_demos(&self) -> Result<u64, DatabaseError> {
        self.repository.count(doc! {}).await
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.manager.health_check().await
    }
}
