use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::{map_json_rejection, ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeRequest {
    #[serde(default)]
    address: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(super) struct GeocodeResponse {
    success: bool,
    latitude: f64,
    longitude: f64,
    formatted_address: String,
}

/// `POST /geocode`. Returns the first match; anything else is a 404,
/// including geocoder outages, which are logged.
pub(super) async fn geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let address = request.address.trim();
    if address.is_empty() {
        return Err(ApiError::new(req_id.0, "validation_error", "invalid address: address is required"));
    }

    match state.booking.geocode(address).await {
        Ok(Some(found)) => Ok(Json(GeocodeResponse {
            success: true,
            latitude: found.coordinates.latitude,
            longitude: found.coordinates.longitude,
            formatted_address: found.formatted_address,
        })),
        Ok(None) => Err(ApiError::new(req_id.0, "not_found", "No location found for address")),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "geocoder call failed");
            Err(ApiError::new(req_id.0, "not_found", "No location found for address"))
        }
    }
}
