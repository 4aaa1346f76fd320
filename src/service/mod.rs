//! Domain operations. Every read and write of the store goes through here; the
//! HTTP handlers only translate requests and responses.

use sqlx::SqlitePool;
use tracing::info;

use crate::clock::Clock;
use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::money::{cents_from_decimal, MAX_CENTS};
use crate::models::*;

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn create_product(
    pool: &SqlitePool,
    clock: &dyn Clock,
    payload: &CreateProduct,
) -> AppResult<Product> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if payload.price < 0.0 {
        return Err(AppError::Validation("price must be >= 0".to_string()));
    }
    let price_cents =
        cents_from_decimal(payload.price).map_err(|e| AppError::Validation(e.to_string()))?;

    let product = db::insert_product(pool, name, price_cents, clock.now()).await?;
    info!(id = product.id, name = %product.name, price_cents, "Created product");

    Ok(product)
}

pub async fn list_products(pool: &SqlitePool) -> AppResult<Vec<Product>> {
    db::fetch_all_products(pool).await
}

// ── Sales ─────────────────────────────────────────────────────────────────────

/// Record a sale at the product's current price. The sale total is capped at
/// `MAX_CENTS`. Nothing is written on failure.
pub async fn create_sale(
    pool: &SqlitePool,
    clock: &dyn Clock,
    payload: &CreateSale,
) -> AppResult<Sale> {
    if payload.quantity <= 0 {
        return Err(AppError::Validation("quantity must be > 0".to_string()));
    }

    let product = db::fetch_product_by_id(pool, payload.product_id).await?;
    payload
        .quantity
        .checked_mul(product.price_cents)
        .filter(|total| *total <= MAX_CENTS)
        .ok_or_else(|| AppError::Validation("sale total exceeds maximum".to_string()))?;

    let sale = db::insert_sale(
        pool,
        product.id,
        payload.quantity,
        product.price_cents,
        clock.now(),
    )
    .await?;

    info!(
        id = sale.id,
        product_id = sale.product_id,
        quantity = sale.quantity,
        unit_price_cents = sale.unit_price_cents,
        "Created sale"
    );

    Ok(sale)
}

pub async fn list_sales(pool: &SqlitePool) -> AppResult<Vec<Sale>> {
    db::fetch_all_sales(pool).await
}

// ── Reports ───────────────────────────────────────────────────────────────────

pub async fn daily_report(pool: &SqlitePool, date: Option<&str>) -> AppResult<DailyReport> {
    let raw = date.ok_or_else(|| {
        AppError::Validation("query parameter `d` (YYYY-MM-DD) is required".to_string())
    })?;
    let date = parse_report_date(raw).ok_or_else(|| {
        AppError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", raw))
    })?;

    let (start, end) = day_bounds(date);
    let sales = db::fetch_sales_between(pool, start, end).await?;

    Ok(DailyReport::from_sales(date, &sales))
}
