use axum::extract::{Multipart, Query, State};
use axum::Json;
use tradechart_core::{parse_orders, ChartPayload, TradeOrder};

use crate::error::ApiError;
use crate::query::ChartQuery;
use crate::AppState;

/// `GET /data` and `GET /visualiseTrader`.
pub async fn chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartPayload>, ApiError> {
    let request = query.into_request()?;
    tracing::info!(
        symbol = %request.trade.symbol,
        enter = %request.trade.entry.date,
        exits = request.trade.exits().len(),
        time_frame = %request.granularity,
        "chart requested"
    );
    let payload = state.service.chart(request).await?;
    Ok(Json(payload))
}

/// `POST /upload`: multipart field `file` holding a trade-order CSV.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<TradeOrder>>, ApiError> {
    let mut contents = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::UnreadableUpload(error.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|error| ApiError::UnreadableUpload(error.to_string()))?;
            contents = Some(bytes);
            break;
        }
    }
    let contents = contents.ok_or(ApiError::MissingUpload)?;

    let report = parse_orders(contents.as_ref(), &state.public_url)
        .map_err(|error| ApiError::UnreadableUpload(error.to_string()))?;
    tracing::info!(
        orders = report.orders.len(),
        skipped = report.skipped.len(),
        "parsed trade-order upload"
    );
    Ok(Json(report.orders))
}
