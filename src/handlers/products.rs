use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    error::AppResult,
    models::{CreateProduct, Product},
    service, AppState,
};

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let start = Instant::now();
    let products = service::list_products(&state.db).await?;

    info!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let product = service::create_product(&state.db, state.clock.as_ref(), &payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}
