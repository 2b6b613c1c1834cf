use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::document::apply_update;
use common::{Collection, Document, DocumentId, DocumentStore, Fields, MemoryStore, StoreError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::LockType,
};
use serde_json::Value;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::document;

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    // Set connection pool options
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("catgame_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Build the store selected by `database.url`.
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, DbErr> {
    if config.is_memory() {
        info!("Using in-memory document store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let db = init_db(config).await?;
    info!(max_connections = config.max_connections, "Database connected");
    Ok(Arc::new(SeaOrmStore::new(db)))
}

/// Document store backed by a single SeaORM `document` table.
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_error(err: DbErr) -> StoreError {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Backend(other.to_string()),
    }
}

fn new_row(collection: Collection, id: DocumentId, fields: Fields) -> document::ActiveModel {
    let mut body = Fields::new();
    apply_update(&mut body, fields);

    document::ActiveModel {
        id: Set(id.as_uuid()),
        collection: Set(collection),
        body: Set(Value::Object(body)),
        created_at: Set(Utc::now()),
    }
}

fn into_fields(model: &document::Model) -> Result<Fields, StoreError> {
    match &model.body {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(StoreError::Backend(format!(
            "document {} has a non-object body",
            model.id
        ))),
    }
}

#[async_trait]
impl DocumentStore for SeaOrmStore {
    async fn insert_one(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        document::Entity::insert(new_row(collection, id, fields))
            .exec_without_returning(&self.db)
            .await
            .map_err(store_error)?;
        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Fields>,
    ) -> Result<Vec<DocumentId>, StoreError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::with_capacity(documents.len());
        let rows: Vec<_> = documents
            .into_iter()
            .map(|fields| {
                let id = DocumentId::generate();
                ids.push(id);
                new_row(collection, id, fields)
            })
            .collect();

        document::Entity::insert_many(rows)
            .exec_without_returning(&self.db)
            .await
            .map_err(store_error)?;
        Ok(ids)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let rows = document::Entity::find()
            .filter(document::Column::Collection.eq(collection))
            .order_by_asc(document::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        rows.iter()
            .map(|row| into_fields(row).map(|fields| Document::new(row.id.into(), fields)))
            .collect()
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Fields,
    ) -> Result<bool, StoreError> {
        let txn = self.db.begin().await.map_err(store_error)?;

        let existing = document::Entity::find_by_id(id.as_uuid())
            .filter(document::Column::Collection.eq(collection))
            .lock(LockType::Update)
            .one(&txn)
            .await
            .map_err(store_error)?;

        // Dropping the transaction rolls it back.
        let Some(row) = existing else {
            return Ok(false);
        };

        let mut body = into_fields(&row)?;
        apply_update(&mut body, fields);

        let mut active: document::ActiveModel = row.into();
        active.body = Set(Value::Object(body));
        active.update(&txn).await.map_err(store_error)?;

        txn.commit().await.map_err(store_error)?;
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError> {
        let result = document::Entity::delete_many()
            .filter(document::Column::Id.eq(id.as_uuid()))
            .filter(document::Column::Collection.eq(collection))
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .ping()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}
