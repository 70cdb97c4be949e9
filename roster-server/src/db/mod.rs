//! Database Module
//!
//! Handles the embedded SurrealDB (RocksDB) connection and schema

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::core::{Result, ServerError};

/// Schema applied on every startup (idempotent)
///
/// `employee_email_unique` is the source of truth for email uniqueness.
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS employee_email_unique ON employee FIELDS email UNIQUE;
    DEFINE TABLE IF NOT EXISTS task SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS task_employee_id ON task FIELDS employeeId;
"#;

/// Database service, owns the embedded store handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB store at `path` and apply the schema
    pub async fn new(path: &str, namespace: &str, database: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;
        db.use_ns(namespace).use_db(database).await?;

        tracing::info!(path = %path, namespace = %namespace, database = %database, "Database connection established (SurrealDB RocksDB)");

        apply_schema(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}

/// Define tables and indexes
pub async fn apply_schema(db: &Surreal<Db>) -> Result<()> {
    db.query(SCHEMA).await?.check()?;
    Ok(())
}
