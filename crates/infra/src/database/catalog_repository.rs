//! SQLite-backed catalog repository for tariffs and router add-ons.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use glasline_core::ordering::ports::CatalogStore;
use glasline_domain::types::building::Infrastructure;
use glasline_domain::types::catalog::{RouterOption, Tariff};
use glasline_domain::Result as DomainResult;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use tokio::task;

use super::manager::{map_sql_error, DbManager};
use super::promotion_repository::map_join_error;

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository {
    db: Arc<DbManager>,
}

impl SqliteCatalogRepository {
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
impl CatalogStore for SqliteCatalogRepository {
    async fn list_tariffs(&self) -> DomainResult<Vec<Tariff>> {
        self.run_blocking(query_all_tariffs).await
    }

    async fn tariff_by_slug(&self, slug: &str) -> DomainResult<Option<Tariff>> {
        let slug = slug.to_string();
        self.run_blocking(move |conn| query_tariff_by_slug(conn, &slug)).await
    }

    async fn list_routers(&self) -> DomainResult<Vec<RouterOption>> {
        self.run_blocking(query_all_routers).await
    }

    async fn router_by_slug(&self, slug: &str) -> DomainResult<Option<RouterOption>> {
        let slug = slug.to_string();
        self.run_blocking(move |conn| query_router_by_slug(conn, &slug)).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

const TARIFF_COLUMNS: &str = "id, slug, name, monthly_price, setup_fee, downstream_mbps, \
     upstream_mbps, infrastructure, sort_order";

fn query_all_tariffs(conn: &Connection) -> Result<Vec<Tariff>, rusqlite::Error> {
    let mut stmt = conn
        .prepare(&format!("SELECT {TARIFF_COLUMNS} FROM tariffs ORDER BY sort_order, slug"))?;
    let rows = stmt.query_map(params![], tariff_from_row)?;
    rows.collect()
}

fn query_tariff_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<Tariff>, rusqlite::Error> {
    let mut stmt =
        conn.prepare(&format!("SELECT {TARIFF_COLUMNS} FROM tariffs WHERE slug = ?1"))?;
    let mut rows = stmt.query_map(params![slug], tariff_from_row)?;
    rows.next().transpose()
}

fn query_all_routers(conn: &Connection) -> Result<Vec<RouterOption>, rusqlite::Error> {
    let mut stmt =
        conn.prepare("SELECT id, slug, name, monthly_price FROM routers ORDER BY slug")?;
    let rows = stmt.query_map(params![], router_from_row)?;
    rows.collect()
}

fn query_router_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<RouterOption>, rusqlite::Error> {
    let mut stmt =
        conn.prepare("SELECT id, slug, name, monthly_price FROM routers WHERE slug = ?1")?;
    let mut rows = stmt.query_map(params![slug], router_from_row)?;
    rows.next().transpose()
}

fn tariff_from_row(row: &Row<'_>) -> Result<Tariff, rusqlite::Error> {
    Ok(Tariff {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        monthly_price: parse_decimal(row, 3)?,
        setup_fee: parse_decimal(row, 4)?,
        downstream_mbps: row.get(5)?,
        upstream_mbps: row.get(6)?,
        infrastructure: parse_infrastructure(row, 7)?,
        sort_order: row.get(8)?,
    })
}

fn router_from_row(row: &Row<'_>) -> Result<RouterOption, rusqlite::Error> {
    Ok(RouterOption {
        id: row.get(0)?,
        slug: row.get(1)?,
        name: row.get(2)?,
        monthly_price: parse_decimal(row, 3)?,
    })
}

pub(crate) fn parse_decimal(row: &Row<'_>, idx: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_infrastructure(
    row: &Row<'_>,
    idx: usize,
) -> Result<Infrastructure, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    match raw.as_str() {
        "ftth" => Ok(Infrastructure::Ftth),
        "fttb" => Ok(Infrastructure::Fttb),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown infrastructure: {other}"),
            )),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
