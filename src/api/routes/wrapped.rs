use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use tracing::{debug, warn};

use crate::aggregate::build_report;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::fetch::{FetchError, SeasonDataSource as _};
use crate::models::StatsReport;

/// Key used to bucket a caller for rate limiting: the first forwarded
/// address when behind a proxy, otherwise a shared local bucket.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "local".to_string())
}

pub async fn wrapped(
    State(state): State<AppState>,
    Path(manager_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<StatsReport>, ApiError> {
    let client = client_key(&headers);
    if !state.limiter.check(&client) {
        return Err(ApiError::RateLimited);
    }

    if let Some(report) = state.report_cache.get(&manager_id) {
        debug!(manager_id, "Serving report from cache");
        return Ok(Json(report));
    }

    let data = state.source.season(manager_id).await.map_err(|e| match e {
        FetchError::NotFound(_) => ApiError::NotFound(format!("Manager {manager_id}")),
        other => {
            warn!(manager_id, error = %other, "Upstream fetch failed");
            ApiError::Upstream
        }
    })?;

    let report = build_report(
        &data.summary,
        &data.history,
        &data.picks,
        &data.transfers,
        &data.bootstrap,
    );
    state.report_cache.insert(manager_id, report.clone());

    Ok(Json(report))
}
