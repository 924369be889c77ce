use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

use crate::shared::document_store::SqliteDocumentStore;

/// URL SQLite для файла БД; пути в стиле Windows получают ведущий `/`
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

async fn connect(url: String, max_connections: u32) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Ok(Database::connect(options).await?)
}

/// Открыть (или создать) файл БД и подготовить таблицу документов
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<SqliteDocumentStore> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening document database at {}", db_url);

    let store = SqliteDocumentStore::new(connect(db_url, 8).await?);
    store.ensure_schema().await?;
    Ok(store)
}

/// База в памяти. Одно соединение: у каждого соединения SQLite `:memory:`
/// своя отдельная база.
pub async fn connect_in_memory() -> anyhow::Result<SqliteDocumentStore> {
    let store = SqliteDocumentStore::new(connect("sqlite::memory:".to_string(), 1).await?);
    store.ensure_schema().await?;
    Ok(store)
}
