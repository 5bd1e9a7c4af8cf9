//! SQLite-backed promotion repository.
//!
//! Implements the `PromotionStore` port. All database operations run in
//! `spawn_blocking` to avoid blocking the async runtime. Discounts and
//! building associations are separate lookups, mirroring the store layout
//! the admin surface writes.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use glasline_core::promotions::ports::{PromotionRecord, PromotionStore};
use glasline_domain::types::promotion::{Discount, DiscountKind, DiscountTarget};
use glasline_domain::{GlaslineError, Result as DomainResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use tokio::task;
use uuid::Uuid;

use super::manager::{map_sql_error, DbManager};

/// SQLite-backed promotion repository.
pub struct SqlitePromotionRepository {
    db: Arc<DbManager>,
}

impl SqlitePromotionRepository {
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
impl PromotionStore for SqlitePromotionRepository {
    async fn list_active(&self) -> DomainResult<Vec<PromotionRecord>> {
        self.run_blocking(query_active_promotions).await
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<PromotionRecord>> {
        let code = code.to_string();
        self.run_blocking(move |conn| query_promotion_by_code(conn, &code)).await
    }

    async fn discounts_for(&self, promotion_id: Uuid) -> DomainResult<Vec<Discount>> {
        self.run_blocking(move |conn| query_discounts(conn, promotion_id)).await
    }

    async fn buildings_for(&self, promotion_id: Uuid) -> DomainResult<Vec<String>> {
        self.run_blocking(move |conn| query_building_ids(conn, promotion_id)).await
    }

    async fn tariff_slug(&self, tariff_ref: &str) -> DomainResult<Option<String>> {
        let tariff_ref = tariff_ref.to_string();
        self.run_blocking(move |conn| query_slug(conn, "tariffs", &tariff_ref)).await
    }

    async fn router_slug(&self, router_ref: &str) -> DomainResult<Option<String>> {
        let router_ref = router_ref.to_string();
        self.run_blocking(move |conn| query_slug(conn, "routers", &router_ref)).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

const PROMOTION_COLUMNS: &str = "id, name, code, description, is_global, is_active, \
     starts_at, ends_at, requires_customer_number, available_text, unavailable_text";

fn query_active_promotions(conn: &Connection) -> Result<Vec<PromotionRecord>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROMOTION_COLUMNS} FROM promotions WHERE is_active = 1 ORDER BY name"
    ))?;
    let rows = stmt.query_map(params![], promotion_record_from_row)?;
    rows.collect()
}

fn query_promotion_by_code(
    conn: &Connection,
    code: &str,
) -> Result<Option<PromotionRecord>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROMOTION_COLUMNS} FROM promotions WHERE code = ?1"
    ))?;
    let mut rows = stmt.query_map(params![code], promotion_record_from_row)?;
    rows.next().transpose()
}

fn query_discounts(
    conn: &Connection,
    promotion_id: Uuid,
) -> Result<Vec<Discount>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, promotion_id, applies_to, discount_type, discount_amount,
                tariff_ref, router_ref
         FROM promotion_discounts
         WHERE promotion_id = ?1",
    )?;
    let rows = stmt.query_map(params![promotion_id.to_string()], |row| {
        Ok(Discount {
            id: parse_uuid(row, 0)?,
            promotion_id: parse_uuid(row, 1)?,
            applies_to: parse_target(row, 2)?,
            kind: parse_kind(row, 3)?,
            amount: parse_optional_decimal(row, 4)?,
            tariff_ref: row.get(5)?,
            router_ref: row.get(6)?,
        })
    })?;
    rows.collect()
}

fn query_building_ids(
    conn: &Connection,
    promotion_id: Uuid,
) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT building_id FROM promotion_buildings WHERE promotion_id = ?1 ORDER BY building_id",
    )?;
    let rows = stmt.query_map(params![promotion_id.to_string()], |row| row.get(0))?;
    rows.collect()
}

/// Slug lookup for a discount target reference. `table` is one of the two
/// catalog tables; never caller-supplied.
fn query_slug(
    conn: &Connection,
    table: &str,
    id: &str,
) -> Result<Option<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("SELECT slug FROM {table} WHERE id = ?1"))?;
    let mut rows = stmt.query_map(params![id], |row| row.get(0))?;
    rows.next().transpose()
}

fn promotion_record_from_row(row: &Row<'_>) -> Result<PromotionRecord, rusqlite::Error> {
    Ok(PromotionRecord {
        id: parse_uuid(row, 0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        description: row.get(3)?,
        is_global: row.get::<_, i64>(4)? != 0,
        is_active: row.get::<_, i64>(5)? != 0,
        starts_at: parse_optional_timestamp(row, 6)?,
        ends_at: parse_optional_timestamp(row, 7)?,
        requires_customer_number: row.get::<_, i64>(8)? != 0,
        available_text: row.get(9)?,
        unavailable_text: row.get(10)?,
    })
}

// ============================================================================
// Column Conversions
// ============================================================================

fn parse_uuid(row: &Row<'_>, idx: usize) -> Result<Uuid, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_optional_decimal(row: &Row<'_>, idx: usize) -> Result<Option<Decimal>, rusqlite::Error> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        Decimal::from_str(&value).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
    })
    .transpose()
}

fn parse_optional_timestamp(
    row: &Row<'_>,
    idx: usize,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    let raw: Option<i64> = row.get(idx)?;
    Ok(raw.and_then(|secs| DateTime::from_timestamp(secs, 0)))
}

fn parse_target(row: &Row<'_>, idx: usize) -> Result<DiscountTarget, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    match raw.as_str() {
        "option" => Ok(DiscountTarget::Option),
        "setup_fee" => Ok(DiscountTarget::SetupFee),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown discount target: {other}"),
            )),
        )),
    }
}

fn parse_kind(row: &Row<'_>, idx: usize) -> Result<DiscountKind, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    match raw.as_str() {
        "fixed" => Ok(DiscountKind::Fixed),
        "waive" => Ok(DiscountKind::Waive),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown discount type: {other}"),
            )),
        )),
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Map JoinError from spawn_blocking to GlaslineError.
pub(crate) fn map_join_error(err: task::JoinError) -> GlaslineError {
    if err.is_cancelled() {
        GlaslineError::Internal("blocking task cancelled".into())
    } else {
        GlaslineError::Internal(format!("blocking task failed: {err}"))
    }
}

// ============================================================================
// Tests
// ============================================================================
