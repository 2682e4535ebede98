use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use fieldbook_booking::{BookingError, ReservationRequest};

use super::{map_json_rejection, map_validation_error, ApiError, AppState};
use crate::middleware::RequestId;

/// `POST /MakeReservation`. The confirmer decides the body and status;
/// provider failures without force-continue keep the provider's status.
pub(super) async fn make_reservation(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;

    match state.booking.make_reservation(request).await {
        Ok(result) => {
            let status = StatusCode::from_u16(result.status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(result.body)).into_response())
        }
        Err(e @ BookingError::Validation { .. }) => Err(map_validation_error(req_id.0, &e)),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "reservation failed");
            Err(ApiError::new(req_id.0, "internal_error", "Internal server error"))
        }
    }
}
