//! SQLite-backed building/address repository.

use std::sync::Arc;

use async_trait::async_trait;
use glasline_core::availability::ports::BuildingStore;
use glasline_domain::types::building::{AddressQuery, Building};
use glasline_domain::Result as DomainResult;
use rusqlite::{params, Connection, Row};
use tokio::task;

use super::catalog_repository::parse_infrastructure;
use super::manager::{map_sql_error, DbManager};
use super::promotion_repository::map_join_error;

/// SQLite-backed building repository.
pub struct SqliteBuildingRepository {
    db: Arc<DbManager>,
}

impl SqliteBuildingRepository {
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
impl BuildingStore for SqliteBuildingRepository {
    async fn find_by_address(&self, query: &AddressQuery) -> DomainResult<Option<Building>> {
        let query = query.clone();
        self.run_blocking(move |conn| query_building_by_address(conn, &query)).await
    }

    async fn building_by_id(&self, id: &str) -> DomainResult<Option<Building>> {
        let id = id.to_string();
        self.run_blocking(move |conn| query_building_by_id(conn, &id)).await
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

const BUILDING_COLUMNS: &str =
    "id, street, house_number, postal_code, city, infrastructure, serviceable";

/// Address matching is case-insensitive and whitespace-tolerant; the address
/// form feeds through user-typed values verbatim.
fn query_building_by_address(
    conn: &Connection,
    query: &AddressQuery,
) -> Result<Option<Building>, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BUILDING_COLUMNS} FROM buildings
         WHERE postal_code = TRIM(?1)
           AND lower(street) = lower(TRIM(?2))
           AND lower(house_number) = lower(TRIM(?3))
           AND lower(city) = lower(TRIM(?4))"
    ))?;
    let mut rows = stmt.query_map(
        params![query.postal_code, query.street, query.house_number, query.city],
        building_from_row,
    )?;
    rows.next().transpose()
}

fn query_building_by_id(
    conn: &Connection,
    id: &str,
) -> Result<Option<Building>, rusqlite::Error> {
    let mut stmt =
        conn.prepare(&format!("SELECT {BUILDING_COLUMNS} FROM buildings WHERE id = ?1"))?;
    let mut rows = stmt.query_map(params![id], building_from_row)?;
    rows.next().transpose()
}

fn building_from_row(row: &Row<'_>) -> Result<Building, rusqlite::Error> {
    Ok(Building {
        id: row.get(0)?,
        street: row.get(1)?,
        house_number: row.get(2)?,
        postal_code: row.get(3)?,
        city: row.get(4)?,
        infrastructure: parse_infrastructure(row, 5)?,
        serviceable: row.get::<_, i64>(6)? != 0,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use glasline_domain::types::building::Infrastructure;
    use tempfile::TempDir;

    use super::*;

    async fn setup() -> (SqliteBuildingRepository, Arc<DbManager>, TempDir) {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("buildings.db");

        let mgr = Arc::new(DbManager::new(&db_path, 4).expect("db manager created"));
        mgr.run_migrations().expect("migrations run");

        let repo = SqliteBuildingRepository::new(mgr.clone());
        (repo, mgr, temp_dir)
    }

    fn insert_building(mgr: &DbManager, id: &str, serviceable: bool) {
        let conn = mgr.get_connection().expect("connection acquired");
        conn.execute(
            "INSERT INTO buildings
                 (id, street, house_number, postal_code, city, infrastructure, serviceable)
             VALUES (?1, 'Gartenweg', '12a', '10115', 'Berlin', 'ftth', ?2)",
            params![id, i64::from(serviceable)],
        )
        .expect("building inserted");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn address_lookup_is_case_insensitive() {
        let (repo, mgr, _dir) = setup().await;
        insert_building(&mgr, "B1", true);

        let query = AddressQuery {
            street: "gartenweg".into(),
            house_number: "12A".into(),
            postal_code: "10115".into(),
            city: "berlin".into(),
        };

        let building =
            repo.find_by_address(&query).await.expect("query succeeded").expect("building found");
        assert_eq!(building.id, "B1");
        assert_eq!(building.infrastructure, Infrastructure::Ftth);
        assert!(building.serviceable);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_address_yields_none() {
        let (repo, mgr, _dir) = setup().await;
        insert_building(&mgr, "B1", true);

        let query = AddressQuery {
            street: "Anderestrasse".into(),
            house_number: "1".into(),
            postal_code: "10115".into(),
            city: "Berlin".into(),
        };

        assert!(repo.find_by_address(&query).await.expect("query succeeded").is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn lookup_by_id() {
        let (repo, mgr, _dir) = setup().await;
        insert_building(&mgr, "B7", false);

        let building =
            repo.building_by_id("B7").await.expect("query succeeded").expect("building found");
        assert!(!building.serviceable);

        assert!(repo.building_by_id("B8").await.expect("query succeeded").is_none());
    }
}
