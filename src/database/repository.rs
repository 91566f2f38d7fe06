use futures::TryStreamExt;
use mongodb::bson::{Bson, Document};
use mongodb::options::UpdateModifications;
use mongodb::Collection;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Single-operation access to one named collection.
///
/// Every call checks out its own session from the manager, issues exactly one
/// request and lets the session drop on return, whichever way it returns.
pub struct Repository<T> {
    collection_name: String,
    manager: DatabaseManager,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(collection_name: impl Into<String>, manager: DatabaseManager) -> Self {
        Self {
            collection_name: collection_name.into(),
            manager,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn collection(&self) -> Collection<T> {
        self.manager.collection::<T>(&self.collection_name)
    }

    /// Insert one document, returning the stored `_id`
    pub async fn insert_one(&self, doc: &T) -> Result<Bson, DatabaseError> {
        let mut session = self.manager.session().await?;
        let result = self
            .collection()
            .insert_one_with_session(doc, None, &mut session)
            .await?;
        debug!(collection = %self.collection_name, "inserted one document");
        Ok(result.inserted_id)
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, DatabaseError> {
        let mut session = self.manager.session().await?;
        Ok(self
            .collection()
            .find_one_with_session(filter, None, &mut session)
            .await?)
    }

    /// Like `find_one`, but a missing document is an error
    pub async fn find_404(&self, filter: Document) -> Result<T, DatabaseError> {
        self.find_one(filter)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("document not found in {}", self.collection_name)))
    }

    pub async fn find_all(&self, filter: Document) -> Result<Vec<T>, DatabaseError> {
        let mut session = self.manager.session().await?;
        let mut cursor = self
            .collection()
            .find_with_session(filter, None, &mut session)
            .await?;
        let docs: Vec<T> = cursor.stream(&mut session).try_collect().await?;
        Ok(docs)
    }

    /// Apply `update` (an operator document or an aggregation pipeline) to the
    /// first match. Zero matches is `NotFound`.
    pub async fn update_one(
        &self,
        filter: Document,
        update: impl Into<UpdateModifications>,
    ) -> Result<(), DatabaseError> {
        let mut session = self.manager.session().await?;
        let result = self
            .collection()
            .update_one_with_session(filter, update, None, &mut session)
            .await?;
        if result.matched_count == 0 {
            return Err(DatabaseError::NotFound(format!("no document matched in {}", self.collection_name)));
        }
        debug!(collection = %self.collection_name, modified = result.modified_count, "updated one document");
        Ok(())
    }

    /// Remove the first match. Zero removals is `NotFound`.
    pub async fn delete_one(&self, filter: Document) -> Result<(), DatabaseError> {
        let mut session = self.manager.session().await?;
        let result = self
            .collection()
            .delete_one_with_session(filter, None, &mut session)
            .await?;
        if result.deleted_count == 0 {
            return Err(DatabaseError::NotFound(format!("no document matched in {}", self.collection_name)));
        }
        debug!(collection = %self.collection_name, "deleted one document");
        Ok(())
    }

    pub async fn count(&self, filter: Document) -> Result<u64, DatabaseError> {
        let mut session = self.manager.session().await?;
        Ok(self
            .collection()
            .count_documents_with_session(filter, None, &mut session)
            .await?)
    }
}
