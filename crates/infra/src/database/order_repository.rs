//! SQLite-backed order repository.
//!
//! Orders are written once at submission and read back for support lookups.
//! The selection, quote, customer, and consent payloads are stored as JSON
//! alongside a few denormalised columns for querying.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use glasline_core::ordering::ports::OrderStore;
use glasline_domain::types::order::Order;
use glasline_domain::Result as DomainResult;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use tokio::task;
use uuid::Uuid;

use super::manager::{map_sql_error, DbManager};
use super::promotion_repository::map_join_error;

/// SQLite-backed order repository.
pub struct SqliteOrderRepository {
    db: Arc<DbManager>,
}

impl SqliteOrderRepository {
    /// Create a new repository with the given database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn run_blocking<T, F>(&self, f: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> DomainResult<T> {
            let conn = db.get_connection()?;
            f(&conn).map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl OrderStore for SqliteOrderRepository {
    async fn insert_order(&self, order: &Order) -> DomainResult<()> {
        let order = order.clone();
        self.run_blocking(move |conn| insert(conn, &order)).await
    }

    async fn order_by_id(&self, id: Uuid) -> DomainResult<Option<Order>> {
        self.run_blocking(move |conn| query_by_id(conn, id)).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn insert(conn: &Connection, order: &Order) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT INTO orders
             (id, tariff_slug, monthly_total, selection_json, quote_json,
              customer_json, consents_json, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            order.id.to_string(),
            order.quote.tariff_slug,
            order.quote.monthly_total.to_string(),
            to_json(1, &order.selection)?,
            to_json(1, &order.quote)?,
            to_json(1, &order.customer)?,
            to_json(1, &order.consents)?,
            order.created_at.timestamp(),
        ],
    )?;
    Ok(())
}

fn query_by_id(conn: &Connection, id: Uuid) -> Result<Option<Order>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, selection_json, quote_json, customer_json, consents_json, created_at
         FROM orders WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id.to_string()], order_from_row)?;
    rows.next().transpose()
}

fn order_from_row(row: &Row<'_>) -> Result<Order, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    let created_at_secs: i64 = row.get(5)?;
    let created_at = DateTime::from_timestamp(created_at_secs, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Integer,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "created_at out of range",
            )),
        )
    })?;

    Ok(Order {
        id,
        selection: from_json(row, 1)?,
        quote: from_json(row, 2)?,
        customer: from_json(row, 3)?,
        consents: from_json(row, 4)?,
        created_at,
    })
}

fn to_json<T: serde::Serialize>(idx: usize, value: &T) -> Result<String, rusqlite::Error> {
    serde_json::to_string(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn from_json<T: serde::de::DeserializeOwned>(
    row: &Row<'_>,
    idx: usize,
) -> Result<T, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ============================================================================
// Tests
// ============================================================================
