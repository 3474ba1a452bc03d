use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, FindOptions, ServerAddress},
    Client, Collection, Database,
};
use tracing::warn;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::Item;

const ITEMS_COLLECTION: &str = "items";

/// Builds the driver client once at startup. The driver maintains its own
/// bounded connection pool; nothing connects until the first operation.
pub fn build_client(config: &Config) -> mongodb::error::Result<Client> {
    let timeout = Duration::from_millis(config.mongo_timeout_ms);
    let options = ClientOptions::builder()
        .hosts(vec![ServerAddress::Tcp {
            host: config.mongo_host.clone(),
            port: Some(config.mongo_port),
        }])
        .app_name(Some("ecs-inventory".to_string()))
        .server_selection_timeout(Some(timeout))
        .connect_timeout(Some(timeout))
        .build();
    Client::with_options(options)
}

/// Verifies store liveness with an admin `ping` and hands back the database
/// scoped to the configured name. Every connectivity failure collapses to
/// `None`; callers treat that as the sole failure signal and degrade.
pub async fn acquire(client: &Client, config: &Config) -> Option<Database> {
    match client.database("admin").run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => Some(client.database(&config.mongo_db)),
        Err(e) => {
            warn!(
                host = %config.mongo_host,
                port = config.mongo_port,
                "MongoDB ping failed: {}",
                e
            );
            None
        }
    }
}

fn items(db: &Database) -> Collection<Item> {
    db.collection::<Item>(ITEMS_COLLECTION)
}

// ── Items ─────────────────────────────────────────────────────────────────────

/// All items in natural (store) order, identifiers included.
pub async fn fetch_all_items(db: &Database) -> AppResult<Vec<Item>> {
    let cursor = items(db).find(None, None).await?;
    Ok(cursor.try_collect().await?)
}

/// All items with `_id` projected out, for external API consumption.
pub async fn fetch_all_items_public(db: &Database) -> AppResult<Vec<Item>> {
    let options = FindOptions::builder().projection(doc! { "_id": 0 }).build();
    let cursor = items(db).find(None, options).await?;
    Ok(cursor.try_collect().await?)
}

/// Inserts one item; the store assigns its identifier.
pub async fn insert_item(db: &Database, item: &Item) -> AppResult<()> {
    items(db).insert_one(item, None).await?;
    Ok(())
}

/// Deletes at most one item. A missing identifier is a no-op, reported by the
/// returned count so callers can log it.
pub async fn delete_item(db: &Database, id: ObjectId) -> AppResult<u64> {
    let result = items(db).delete_one(doc! { "_id": id }, None).await?;
    Ok(result.deleted_count)
}
