use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::*;

/// How long a connection waits on a locked database before the store reports an error.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

// ── Pool ──────────────────────────────────────────────────────────────────────

/// Open (creating if missing) the SQLite file at `path` and apply pending migrations.
pub async fn connect(path: &Path, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(BUSY_TIMEOUT)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    info!(path = %path.display(), "Database ready");

    Ok(pool)
}

/// Private in-memory database. A single connection that never expires, so the data
/// lives exactly as long as the pool.
pub async fn connect_in_memory() -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

pub async fn ping(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, price_cents, created_at FROM products ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn fetch_product_by_id(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, price_cents, created_at FROM products WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
}

pub async fn insert_product(
    pool: &SqlitePool,
    name: &str,
    price_cents: i64,
    created_at: DateTime<Utc>,
) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, price_cents, created_at)
        VALUES (?1, ?2, ?3)
        RETURNING id, name, price_cents, created_at
        "#,
    )
    .bind(name)
    .bind(price_cents)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Validation("Product already exists".to_string())
        }
        other => AppError::from(other),
    })
}

// ── Sales ─────────────────────────────────────────────────────────────────────

pub async fn fetch_all_sales(pool: &SqlitePool) -> AppResult<Vec<Sale>> {
    let sales = sqlx::query_as::<_, Sale>(
        "SELECT id, product_id, quantity, unit_price_cents, sold_at FROM sales ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(sales)
}

/// Sales with `start <= sold_at < end`.
pub async fn fetch_sales_between(
    pool: &SqlitePool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<Sale>> {
    let sales = sqlx::query_as::<_, Sale>(
        r#"
        SELECT id, product_id, quantity, unit_price_cents, sold_at
        FROM sales
        WHERE sold_at >= ?1 AND sold_at < ?2
        ORDER BY id ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(sales)
}

pub async fn insert_sale(
    pool: &SqlitePool,
    product_id: i64,
    quantity: i64,
    unit_price_cents: i64,
    sold_at: DateTime<Utc>,
) -> AppResult<Sale> {
    let sale = sqlx::query_as::<_, Sale>(
        r#"
        INSERT INTO sales (product_id, quantity, unit_price_cents, sold_at)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, product_id, quantity, unit_price_cents, sold_at
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .bind(unit_price_cents)
    .bind(sold_at)
    .fetch_one(pool)
    .await?;

    Ok(sale)
}
