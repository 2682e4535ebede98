use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use fieldbook_booking::{BookingError, SlotOutcome, SlotRequest, NO_SLOTS_MESSAGE};
use fieldbook_core::TimeSlot;
use serde::Serialize;

use super::{map_json_rejection, map_validation_error, ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(super) struct SlotResponse {
    pub success: bool,
    pub slots: Vec<TimeSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
    /// Scheduling rule that rejected the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
    /// Only present on degraded answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_created: Option<bool>,
    /// Provider number of the follow-up order when the caller's was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_order_no: Option<String>,
}

impl From<SlotOutcome> for SlotResponse {
    fn from(outcome: SlotOutcome) -> Self {
        Self {
            success: true,
            message: outcome.message(),
            order_created: outcome.degraded.then_some(outcome.order_created),
            order_no: Some(outcome.order_no),
            slots: outcome.slots,
            rule: None,
            temporary_order_no: outcome.temporary_order_no,
        }
    }
}

/// `POST /fetchSlots`. Business-rule rejections and provider trouble are
/// both HTTP 200; only request problems are not.
pub(super) async fn fetch_slots(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SlotRequest>, JsonRejection>,
) -> Result<Json<SlotResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| map_json_rejection(req_id.0.clone(), &e))?;
    let order_no = request.order.order_no.trim().to_owned();

    match state.booking.fetch_slots(request).await {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(BookingError::Rejected { rule, message }) => Ok(Json(SlotResponse {
            success: false,
            slots: Vec::new(),
            message: Some(message),
            order_no: Some(order_no),
            rule: Some(rule),
            order_created: None,
            temporary_order_no: None,
        })),
        Err(e @ BookingError::Validation { .. }) => Err(map_validation_error(req_id.0, &e)),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, order_no = %order_no, error = %e, "slot fetch failed");
            Ok(Json(SlotResponse {
                success: true,
                slots: Vec::new(),
                message: Some(NO_SLOTS_MESSAGE.to_owned()),
                order_no: Some(order_no),
                rule: None,
                order_created: None,
                temporary_order_no: None,
            }))
        }
    }
}
