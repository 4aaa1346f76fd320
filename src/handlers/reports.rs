use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use crate::{
    error::AppResult,
    models::{DailyReport, ReportParams},
    service, AppState,
};

pub async fn daily_report(
    State(state): State<AppState>,
    params: Result<Query<ReportParams>, QueryRejection>,
) -> AppResult<Json<DailyReport>> {
    let Query(params) = params?;
    let report = service::daily_report(&state.db, params.d.as_deref()).await?;

    info!(
        date = %report.date,
        revenue_cents = %report.revenue_cents,
        items_sold = %report.items_sold,
        "Computed daily report"
    );

    Ok(Json(report))
}
