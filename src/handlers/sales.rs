use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    error::AppResult,
    models::{CreateSale, Sale},
    service, AppState,
};

pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<Vec<Sale>>> {
    let start = Instant::now();
    let sales = service::list_sales(&state.db).await?;

    info!(
        count = sales.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed sales"
    );

    Ok(Json(sales))
}

pub async fn create_sale(
    State(state): State<AppState>,
    payload: Result<Json<CreateSale>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let Json(payload) = payload?;
    let sale = service::create_sale(&state.db, state.clock.as_ref(), &payload).await?;
    state.metrics.record_sale();

    Ok((StatusCode::CREATED, Json(sale)))
}
