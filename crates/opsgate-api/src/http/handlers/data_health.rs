//! Data-health report endpoint.

use axum::extract::{Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use opsgate_types::health::DataHealthView;

use crate::http::error::AppError;
use crate::http::extractors::admin::AdminAuthorized;
use crate::http::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DataHealthQuery {
    /// `1`, `true` or `yes` bypasses the cache.
    #[serde(default)]
    pub refresh: Option<String>,
}

impl DataHealthQuery {
    pub fn bypass_cache(&self) -> bool {
        self.refresh.as_deref().is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            )
        })
    }
}

/// GET /api/admin/data-health - Latest seed audit verdict.
pub async fn get_data_health(
    State(state): State<AppState>,
    _admin: AdminAuthorized,
    WithRejection(Query(query), _): WithRejection<Query<DataHealthQuery>, AppError>,
) -> Result<OkResponse<DataHealthView>, AppError> {
    let view = state.data_health.evaluate(query.bypass_cache()).await?;
    Ok(OkResponse::new(view))
}
