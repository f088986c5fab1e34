//! API response types.

use serde::Serialize;

use crate::indicators::Indicators;

/// Error body of every non-200 response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// One known municipality.
#[derive(Debug, Serialize)]
pub struct MunicipalityEntry {
    /// Official municipality key.
    pub ags: String,
    /// Display name.
    pub name: String,
}

/// Indicators of one request.
#[derive(Debug, Serialize)]
pub struct IndicatorsResponse {
    pub ags: String,
    pub year: i32,
    pub indicators: Indicators,
}
