//! End-to-end booking flows against a wiremock scheduling provider and geocoder.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;
use fieldbook_booking::{
    AttemptState, BookingError, BookingService, OrderReservationOrchestrator, ReservationAttempt,
    ReservationRequest, SlotRequest, MAX_SUBMISSIONS,
};
use fieldbook_core::{Address, ClockPolicy, Location, OrderCandidate, Region};
use fieldbook_provider::{GeocodeClient, SchedulingClient};
use regex::Regex;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const VALLEJO: &str = "14th St, Vallejo, CA 94590, USA";

/// Monday 2025-05-12 09:00 in Los Angeles.
fn monday_morning() -> DateTime<Utc> {
    Los_Angeles
        .with_ymd_and_hms(2025, 5, 12, 9, 0, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn provider(server: &MockServer) -> SchedulingClient {
    SchedulingClient::new("test-key", &server.uri(), 5)
        .expect("provider client")
        .with_retry_policy(1, 0)
}

fn service(server: &MockServer) -> BookingService {
    let geocoder = GeocodeClient::new("geo-key", &server.uri(), 5).expect("geocode client");
    BookingService::new(
        provider(server),
        Some(geocoder),
        ClockPolicy::fixed(monday_morning(), Los_Angeles),
        60,
    )
}

fn slot_request(dates: &[&str]) -> SlotRequest {
    serde_json::from_value(json!({
        "order": {
            "orderNo": "SO-100",
            "customerName": "Jane Doe",
            "address": VALLEJO,
            "email": "jane@example.com"
        },
        "slots": { "dates": dates },
        "region": "bay_area"
    }))
    .unwrap()
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

fn slot(day: &str, reservation_id: &str) -> Value {
    json!({
        "from": format!("{day}T07:30:00-07:00"),
        "to": format!("{day}T11:00:00-07:00"),
        "reservationId": reservation_id,
        "cost": 1.0
    })
}

async fn mount_location_registration(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/create_or_update_locations"))
        .respond_with(ok(json!({ "success": true })))
        .mount(server)
        .await;
}

async fn mount_two_vallejo_matches(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ok(json!({
            "status": "OK",
            "results": [
                { "formatted_address": "14th St, Vallejo, CA 94590, USA", "geometry": { "location": { "lat": 38.1049, "lng": -122.2536 } } },
                { "formatted_address": "14th St, Vallejo, CA 94591, USA", "geometry": { "location": { "lat": 38.1122, "lng": -122.2312 } } }
            ]
        })))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, endpoint: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == endpoint)
        .collect()
}

fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

fn bay_area_candidate(order_no: &str) -> OrderCandidate {
    OrderCandidate {
        order_no: order_no.to_string(),
        location: Location {
            location_id: "LOC1".to_string(),
            display_name: "Jane Doe".to_string(),
            address: Address::parse_free_form(VALLEJO),
            latitude: 38.1049,
            longitude: -122.2536,
        },
        duration_minutes: 60,
        desired_dates: vec![NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()],
        time_windows: Region::BayArea.time_windows(),
        driver_pool: Some(vec!["BAY".to_string()]),
        region: Region::BayArea,
        contact: None,
    }
}

// ---------------------------------------------------------------------------
// Scheduling rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saturday_is_rejected_without_any_outbound_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({ "success": true, "slots": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = service(&server)
        .fetch_slots(slot_request(&["2025-05-17"]))
        .await
        .unwrap_err();

    match err {
        BookingError::Rejected { rule, message } => {
            assert_eq!(rule, "weekend");
            assert!(message.contains("weekends"), "message: {message}");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_date_is_a_validation_error() {
    let server = MockServer::start().await;
    let err = service(&server)
        .fetch_slots(slot_request(&["May 20th"]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "dates", .. }));
}

#[tokio::test]
async fn unbookable_dates_are_dropped_before_the_query_and_slots_filtered_after() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({ "slots": { "dates": ["2025-05-20"] } })))
        .respond_with(ok(json!({
            "success": true,
            "slots": [
                slot("2025-05-24", "saturday"),
                slot("2025-05-20", "tuesday"),
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-17", "2025-05-20"]))
        .await
        .expect("slots");

    assert_eq!(outcome.order_no, "SO-100");
    assert_eq!(outcome.skipped.len(), 1);
    let ids: Vec<&str> = outcome.slots.iter().map(|s| s.reservation_id.as_str()).collect();
    assert_eq!(ids, ["tuesday"]);
    assert!(!outcome.degraded);
}

// ---------------------------------------------------------------------------
// Location resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ambiguous_vallejo_address_uses_first_geocoder_match() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({
            "order": { "location": { "latitude": 38.1049, "longitude": -122.2536 } }
        })))
        .respond_with(ok(json!({ "success": true, "slots": [slot("2025-05-20", "r-1")] })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("slots");
    assert_eq!(outcome.slots.len(), 1);

    let registered = requests_to(&server, "/create_or_update_locations").await;
    assert_eq!(registered.len(), 1);
    let location_no = body(&registered[0])["locations"][0]["locationNo"]
        .as_str()
        .unwrap()
        .to_owned();
    assert!(Regex::new(r"^LOC\d+[A-Za-z0-9]{6}$").unwrap().is_match(&location_no));
}

#[tokio::test]
async fn precomputed_coordinates_skip_the_geocoder() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ok(json!({ "status": "ZERO_RESULTS", "results": [] })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({
            "order": { "location": { "latitude": 38.2, "longitude": -122.1 } }
        })))
        .respond_with(ok(json!({ "success": true, "slots": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let request: SlotRequest = serde_json::from_value(json!({
        "order": {
            "orderNo": "SO-100",
            "address": VALLEJO,
            "coordinates": { "latitude": 38.2, "longitude": -122.1 }
        },
        "slots": { "dates": ["2025-05-20"] }
    }))
    .unwrap();

    let outcome = service(&server).fetch_slots(request).await.expect("slots");
    assert!(outcome.slots.is_empty());
    assert!(!outcome.degraded);
}

#[tokio::test]
async fn geocoder_failure_falls_back_to_region_default() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let default = Region::BayArea.default_coordinates();
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({
            "order": { "location": { "latitude": default.latitude, "longitude": default.longitude } }
        })))
        .respond_with(ok(json!({ "success": true, "slots": [] })))
        .expect(1)
        .mount(&server)
        .await;

    service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("slots");
}

#[tokio::test]
async fn provider_ambiguity_retries_once_with_first_candidate() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({
            "success": false,
            "code": "ERR_LOC_MULTIPLE_RESULTS",
            "geocodingResults": [
                { "latitude": 38.11, "longitude": -122.25 },
                { "latitude": 37.87, "longitude": -122.27 }
            ]
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({
            "order": { "location": { "latitude": 38.11, "longitude": -122.25 } }
        })))
        .respond_with(ok(json!({ "success": true, "slots": [slot("2025-05-20", "r-1")] })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("slots");
    assert_eq!(outcome.slots.len(), 1);
}

#[tokio::test]
async fn provider_ambiguity_never_replaces_precomputed_coordinates() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({
            "success": false,
            "code": "ERR_LOC_MULTIPLE_RESULTS",
            "geocodingResults": [{ "latitude": 10.0, "longitude": 20.0 }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .and(body_partial_json(json!({
            "location": { "latitude": 38.2, "longitude": -122.1 }
        })))
        .respond_with(ok(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let request: SlotRequest = serde_json::from_value(json!({
        "order": {
            "orderNo": "SO-100",
            "address": VALLEJO,
            "coordinates": { "latitude": 38.2, "longitude": -122.1 }
        },
        "slots": { "dates": ["2025-05-20"] }
    }))
    .unwrap();

    let outcome = service(&server).fetch_slots(request).await.expect("degraded");
    assert!(outcome.degraded);
    assert!(outcome.order_created);

    let queries = requests_to(&server, "/booking_slots").await;
    assert_eq!(queries.len(), 1);
    assert_eq!(body(&queries[0])["order"]["location"]["latitude"], 38.2);
    assert_eq!(body(&queries[0])["order"]["location"]["longitude"], -122.1);
}

// ---------------------------------------------------------------------------
// Conflict recovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_order_is_resubmitted_under_temporary_number_and_cleaned_up() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .and(body_partial_json(json!({ "order": { "orderNo": "SO-100" } })))
        .respond_with(ok(json!({ "success": false, "code": "ERR_DUP_ORDER_NO" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({ "success": true, "slots": [slot("2025-05-20", "r-1")] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delete_order"))
        .respond_with(ok(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("slots");

    assert_eq!(outcome.order_no, "SO-100");
    assert_eq!(outcome.slots.len(), 1);

    let temp_pattern = Regex::new(r"^TEMP\d+[A-Za-z0-9]{6}$").unwrap();
    let queries = requests_to(&server, "/booking_slots").await;
    let temp = body(&queries[1])["order"]["orderNo"].as_str().unwrap().to_owned();
    assert!(temp_pattern.is_match(&temp), "temporary number: {temp}");

    let deletes = requests_to(&server, "/delete_order").await;
    assert_eq!(body(&deletes[0])["orderNo"], temp.as_str());
}

#[tokio::test]
async fn failed_temporary_cleanup_does_not_fail_the_query() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({ "success": false, "code": "ERR_DUP_ORDER_NO" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ok(json!({ "success": true, "slots": [slot("2025-05-20", "r-1")] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delete_order"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("slots");
    assert_eq!(outcome.slots.len(), 1);
    assert_eq!(outcome.order_no, "SO-100");
}

#[tokio::test]
async fn ensure_order_makes_at_most_two_create_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .respond_with(ok(json!({ "success": false, "code": "ERR_DUP_ORDER_NO" })))
        .expect(u64::from(MAX_SUBMISSIONS))
        .mount(&server)
        .await;

    let orchestrator = OrderReservationOrchestrator::new(
        std::sync::Arc::new(provider(&server)),
        ClockPolicy::fixed(monday_morning(), Los_Angeles),
    );
    let err = orchestrator
        .ensure_order(bay_area_candidate("SO-100"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Conflict { ref order_no } if order_no == "SO-100"));
}

#[tokio::test]
async fn ensure_order_retries_transient_failure_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let orchestrator = OrderReservationOrchestrator::new(
        std::sync::Arc::new(provider(&server)),
        ClockPolicy::fixed(monday_morning(), Los_Angeles),
    );
    let err = orchestrator
        .ensure_order(bay_area_candidate("SO-100"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Upstream(_)));
}

#[tokio::test]
async fn durable_order_keeps_temporary_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .and(body_partial_json(json!({ "orderNo": "SO-100" })))
        .respond_with(ok(json!({ "success": false, "code": "ERR_DUP_ORDER_NO" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .respond_with(ok(json!({ "success": true, "id": "internal-7" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delete_order"))
        .respond_with(ok(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = OrderReservationOrchestrator::new(
        std::sync::Arc::new(provider(&server)),
        ClockPolicy::fixed(monday_morning(), Los_Angeles),
    );
    let submission = orchestrator
        .ensure_order(bay_area_candidate("SO-100"))
        .await
        .expect("order");
    assert_eq!(submission.order_no, "SO-100");
    assert_eq!(submission.value.as_deref(), Some("internal-7"));
    assert_eq!(submission.submissions, 2);
    assert!(submission
        .temporary_order_no
        .as_deref()
        .is_some_and(fieldbook_core::ids::is_temporary_order_no));
}

#[test]
fn attempt_state_is_exported_for_callers() {
    let attempt = ReservationAttempt::new(bay_area_candidate("SO-1"));
    assert_eq!(attempt.state(), AttemptState::Unsubmitted);
}

// ---------------------------------------------------------------------------
// Degraded outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn provider_failure_degrades_to_no_slots_with_order_created() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .and(body_partial_json(json!({ "orderNo": "SO-100", "operation": "SYNC" })))
        .respond_with(ok(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("degraded outcome is not an error");

    assert!(outcome.degraded);
    assert!(outcome.order_created);
    assert!(outcome.temporary_order_no.is_none());
    assert!(outcome.slots.is_empty());
    assert_eq!(
        outcome.message().as_deref(),
        Some(fieldbook_booking::NO_SLOTS_MESSAGE)
    );
}

#[tokio::test]
async fn degraded_fallback_order_reports_its_temporary_number() {
    let server = MockServer::start().await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;

    Mock::given(method("POST"))
        .and(path("/booking_slots"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .and(body_partial_json(json!({ "orderNo": "SO-100" })))
        .respond_with(ok(json!({ "success": false, "code": "ERR_DUP_ORDER_NO" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .respond_with(ok(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/delete_order"))
        .respond_with(ok(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = service(&server)
        .fetch_slots(slot_request(&["2025-05-20"]))
        .await
        .expect("degraded outcome is not an error");

    assert!(outcome.degraded);
    assert!(outcome.order_created);
    assert_eq!(outcome.order_no, "SO-100");

    let creates = requests_to(&server, "/create_order").await;
    let kept = body(&creates[1])["orderNo"].as_str().unwrap().to_owned();
    assert!(Regex::new(r"^TEMP\d+[A-Za-z0-9]{6}$").unwrap().is_match(&kept));
    assert_eq!(outcome.temporary_order_no.as_deref(), Some(kept.as_str()));
}

// ---------------------------------------------------------------------------
// Reservation confirmation
// ---------------------------------------------------------------------------

fn reservation(value: Value) -> ReservationRequest {
    serde_json::from_value(value).unwrap()
}

async fn mount_failed_reserve(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/booking_reserve"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "code": "ERR_SLOT_TAKEN",
            "message": "Slot no longer available"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_reservation_passes_payload_through() {
    let server = MockServer::start().await;
    let payload = json!({ "success": true, "orderNo": "SO-100", "date": "2025-05-20" });
    Mock::given(method("POST"))
        .and(path("/booking_reserve"))
        .respond_with(ok(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server)
        .make_reservation(reservation(json!({ "reservationId": "r-1" })))
        .await
        .unwrap();
    assert_eq!(result.status, 200);
    assert_eq!(result.body, payload);
}

#[tokio::test]
async fn failed_reservation_force_continues_by_default() {
    let server = MockServer::start().await;
    mount_failed_reserve(&server).await;

    let result = service(&server)
        .make_reservation(reservation(json!({ "reservationId": "r-1" })))
        .await
        .unwrap();
    assert_eq!(result.status, 200);
    assert_eq!(result.body["success"], true);
    assert_eq!(result.body["forceContinue"], true);
}

#[tokio::test]
async fn failed_reservation_without_force_returns_provider_error() {
    let server = MockServer::start().await;
    mount_failed_reserve(&server).await;

    let result = service(&server)
        .make_reservation(reservation(json!({
            "reservationId": "r-1",
            "allowForceContinue": false
        })))
        .await
        .unwrap();
    assert_eq!(result.status, 409);
    assert_eq!(result.body["code"], "ERR_SLOT_TAKEN");
    assert!(!result.is_success());
}

#[tokio::test]
async fn failed_reservation_creates_fallback_order_when_asked() {
    let server = MockServer::start().await;
    mount_failed_reserve(&server).await;
    mount_location_registration(&server).await;
    mount_two_vallejo_matches(&server).await;
    Mock::given(method("POST"))
        .and(path("/create_order"))
        .and(body_partial_json(json!({ "orderNo": "SO-100", "type": "T" })))
        .respond_with(ok(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server)
        .make_reservation(reservation(json!({
            "reservationId": "r-1",
            "createOrderIfBookingFails": true,
            "allowForceContinue": false,
            "orderData": { "orderNo": "SO-100", "address": VALLEJO }
        })))
        .await
        .unwrap();
    assert_eq!(result.status, 409);
    assert_eq!(result.body["orderCreated"], true);
}

#[tokio::test]
async fn successful_reservation_never_touches_fallback_order_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/booking_reserve"))
        .respond_with(ok(json!({ "success": true, "orderNo": "SO-100" })))
        .expect(1)
        .mount(&server)
        .await;
    for (verb, endpoint) in [
        ("GET", "/geocode/json"),
        ("POST", "/create_or_update_locations"),
        ("POST", "/create_order"),
    ] {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ok(json!({ "success": true })))
            .expect(0)
            .mount(&server)
            .await;
    }

    let result = service(&server)
        .make_reservation(reservation(json!({
            "reservationId": "r-1",
            "createOrderIfBookingFails": true,
            "orderData": { "orderNo": "SO-100", "address": VALLEJO }
        })))
        .await
        .unwrap();
    assert_eq!(result.status, 200);
    assert!(result.body.get("orderCreated").is_none());
}

#[tokio::test]
async fn missing_reservation_id_is_rejected_before_any_call() {
    let server = MockServer::start().await;
    let err = service(&server)
        .make_reservation(reservation(json!({ "reservationId": "  " })))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::Validation { field: "reservationId", .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
