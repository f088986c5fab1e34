//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, IndicatorsResponse, MunicipalityEntry};
use crate::balance::Balance;
use crate::engine::calculate;
use crate::errors::BalanceError;
use crate::indicators;

/// Calculation failure mapped onto an HTTP status.
pub struct ApiError(BalanceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            BalanceError::UnknownMunicipality(_) => StatusCode::NOT_FOUND,
            BalanceError::InvalidTargetYear { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("balance calculation failed: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<BalanceError> for ApiError {
    fn from(err: BalanceError) -> Self {
        ApiError(err)
    }
}

/// Returns the complete balance.
///
/// `GET /balance/{ags}/{year}` → 200 + balance JSON,
/// 404 for an unknown municipality, 400 for a year outside the horizon
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path((ags, year)): Path<(String, i32)>,
) -> Result<Json<Balance>, ApiError> {
    Ok(Json(calculate(&state.data, &ags, year)?))
}

/// Returns the build-rate indicators.
///
/// `GET /balance/{ags}/{year}/indicators` → 200 + `IndicatorsResponse` JSON
pub async fn get_indicators(
    State(state): State<Arc<AppState>>,
    Path((ags, year)): Path<(String, i32)>,
) -> Result<Json<IndicatorsResponse>, ApiError> {
    let balance = calculate(&state.data, &ags, year)?;
    Ok(Json(IndicatorsResponse {
        indicators: indicators::calc(&balance),
        ags: balance.ags,
        year: balance.year,
    }))
}

/// Lists the known municipalities in AGS order.
///
/// `GET /municipalities` → 200 + `Vec<MunicipalityEntry>` JSON
pub async fn get_municipalities(State(state): State<Arc<AppState>>) -> Json<Vec<MunicipalityEntry>> {
    Json(
        state
            .data
            .municipalities()
            .map(|m| MunicipalityEntry {
                ags: m.ags.clone(),
                name: m.name.clone(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::refdata::RefData;

    fn make_test_state() -> Option<Arc<AppState>> {
        let data = RefData::builtin().ok()?;
        Some(Arc::new(AppState { data }))
    }

    async fn get(uri: &str) -> Option<(StatusCode, serde_json::Value)> {
        let app = router(make_test_state()?);
        let req = Request::builder().uri(uri).body(Body::empty()).ok()?;
        let resp = app.oneshot(req).await.ok()?;
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.ok()?;
        Some((status, serde_json::from_slice(&body).ok()?))
    }

    #[tokio::test]
    async fn balance_returns_200() {
        let resp = get("/balance/DG000000/2035").await;
        let (status, json) = resp.expect("router should answer");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ags"], "DG000000");
        assert!(json["e30"]["p_local"]["power_to_be_installed"].is_number());
    }

    #[tokio::test]
    async fn indicators_returns_200() {
        let resp = get("/balance/DG000000/2035/indicators").await;
        let (status, json) = resp.expect("router should answer");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["year"], 2035);
        assert!(json["indicators"]["wind_power_plants_peryear"].is_number());
    }

    #[tokio::test]
    async fn unknown_municipality_returns_404() {
        let resp = get("/balance/00000000/2035").await;
        let (status, json) = resp.expect("router should answer");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn year_outside_horizon_returns_400() {
        let resp = get("/balance/DG000000/2019/indicators").await;
        let (status, json) = resp.expect("router should answer");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().is_some_and(|e| e.contains("2019")));
    }

    #[tokio::test]
    async fn municipalities_are_listed() {
        let resp = get("/municipalities").await;
        let (status, json) = resp.expect("router should answer");
        assert_eq!(status, StatusCode::OK);
        let list = json.as_array().cloned().unwrap_or_default();
        assert_eq!(list.len(), 3);
        assert!(list.iter().any(|m| m["ags"] == "DG000000"));
    }
}
