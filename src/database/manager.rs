use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, SessionOptions};
use mongodb::{Client, ClientSession, Collection};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the document store
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URI: {0}")]
    InvalidUri(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Owns the pooled MongoDB client for one database.
///
/// Built once at startup and handed to repositories; closed at shutdown.
#[derive(Clone)]
pub struct DatabaseManager {
    client: Client,
    database: String,
}

impl DatabaseManager {
    /// Upper bound on pooled connections
    pub const POOL_LIMIT: u32 = 4096;

    /// Dial timeout for new connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

    const APP_NAME: &'static str = "demo-api";

    /// Create the pooled client. The driver dials lazily, so this succeeds
    /// without a reachable server; use `health_check` to verify connectivity.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let uri = config.uri();
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(|e| DatabaseError::InvalidUri(format!("{} ({})", e, uri)))?;
        options.app_name = Some(Self::APP_NAME.to_string());
        options.max_pool_size = Some(Self::POOL_LIMIT);
        options.connect_timeout = Some(Self::CONNECT_TIMEOUT);

        let client = Client::with_options(options)?;
        info!("Created database pool for: {} ({})", config.database, uri);

        Ok(Self {
            client,
            database: config.database.clone(),
        })
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    /// Typed handle to a collection in the managed database
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync,
    {
        self.client.database(&self.database).collection::<T>(name)
    }

    /// Check out a causally consistent session. Reads issued through it
    /// never observe state older than its own earlier writes. The server
    /// session returns to the pool when the value is dropped.
    pub async fn session(&self) -> Result<ClientSession, DatabaseError> {
        let options = SessionOptions::builder().causal_consistency(true).build();
        Ok(self.client.start_session(Some(options)).await?)
    }

    /// Pings the database to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map(|_: Document| ())
            .map_err(DatabaseError::from)
    }

    /// Close the pool, waiting for checked-out sessions to be returned
    pub async fn shutdown(self) {
        let database = self.database.clone();
        self.client.shutdown().await;
        info!("Closed database pool: {}", database);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_is_lazy_and_keeps_database_name() {
        let config = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 27017,
            database: "demo_test".into(),
        };
        let manager = DatabaseManager::connect(&config).await.unwrap();
        assert_eq!(manager.database_name(), "demo_test");
    }
}
