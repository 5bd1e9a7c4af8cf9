//! Shared helpers for API route tests

use std::path::Path;
use std::sync::Arc;

use glasline_api::AppContext;
use glasline_domain::{
    Config, DatabaseConfig, RateLimitConfig, ServerConfig, SessionConfig,
};
use glasline_infra::DbManager;
use rusqlite::params;
use tempfile::TempDir;
use uuid::Uuid;

pub const GATE_PASSWORD: &str = "test-password";

/// Build a context over a fresh temp database with the standard seed data.
pub fn test_context() -> (Arc<AppContext>, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir created");
    let db_path = temp_dir.path().join("api.db");

    let ctx = AppContext::new(test_config(&db_path)).expect("context created");
    seed(&ctx.db);

    (Arc::new(ctx), temp_dir)
}

pub fn test_config(db_path: &Path) -> Config {
    Config {
        server: ServerConfig { bind_addr: "127.0.0.1:0".into() },
        database: DatabaseConfig {
            path: db_path.to_string_lossy().into_owned(),
            pool_size: 2,
        },
        session: SessionConfig {
            password: GATE_PASSWORD.into(),
            secret: "test secret".into(),
            generation: 1,
            ttl_seconds: 1800,
        },
        rate_limit: RateLimitConfig { endpoint: None },
    }
}

/// One FTTH tariff, one router, one serviceable building, and one global
/// promotion giving 3.00 off the router.
fn seed(db: &DbManager) {
    let conn = db.get_connection().expect("connection acquired");

    conn.execute(
        "INSERT INTO tariffs
             (id, slug, name, monthly_price, setup_fee,
              downstream_mbps, upstream_mbps, infrastructure, sort_order)
         VALUES ('t-100', 'einfach-100', 'Einfach 100', '39.99', '69.99',
                 100, 50, 'ftth', 1)",
        [],
    )
    .expect("tariff inserted");

    conn.execute(
        "INSERT INTO routers (id, slug, name, monthly_price)
         VALUES ('r-1', 'fritzbox-7590', 'FRITZ!Box 7590', '4.99')",
        [],
    )
    .expect("router inserted");

    conn.execute(
        "INSERT INTO buildings
             (id, street, house_number, postal_code, city, infrastructure, serviceable)
         VALUES ('B1', 'Gartenweg', '12', '10115', 'Berlin', 'ftth', 1)",
        [],
    )
    .expect("building inserted");

    let promo_id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO promotions (id, name, is_global, is_active)
         VALUES (?1, 'Routeraktion', 1, 1)",
        params![promo_id.to_string()],
    )
    .expect("promotion inserted");
    conn.execute(
        "INSERT INTO promotion_discounts
             (id, promotion_id, applies_to, discount_type, discount_amount)
         VALUES (?1, ?2, 'option', 'fixed', '3.00')",
        params![Uuid::new_v4().to_string(), promo_id.to_string()],
    )
    .expect("discount inserted");
}
