// src/services/interaction_log.rs
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One question/answer exchange. Records are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub user_query: String,
    pub ai_response: String,
    pub timestamp: DateTime<Utc>,
}

impl InteractionRecord {
    pub fn now(user_query: impl Into<String>, ai_response: impl Into<String>) -> Self {
        Self {
            user_query: user_query.into(),
            ai_response: ai_response.into(),
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn insert(&self, record: &InteractionRecord) -> Result<(), StoreError>;

    /// Release the underlying resource. Called once at shutdown.
    async fn close(&self) {}
}

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS interactions (
    id BIGSERIAL PRIMARY KEY,
    user_query TEXT NOT NULL,
    ai_response TEXT NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL
)
"#;

#[derive(Debug, Clone)]
pub struct PgInteractionStore {
    pool: PgPool,
}

impl PgInteractionStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self::from_pool(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl InteractionStore for PgInteractionStore {
    async fn insert(&self, record: &InteractionRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO interactions (user_query, ai_response, timestamp) VALUES ($1, $2, $3)",
        )
        .bind(&record.user_query)
        .bind(&record.ai_response)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Appends each record as one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonlInteractionStore {
    path: PathBuf,
}

impl JsonlInteractionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl InteractionStore for JsonlInteractionStore {
    async fn insert(&self, record: &InteractionRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
