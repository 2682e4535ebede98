//! Commands that talk to the scheduling provider through `BookingService`.

use chrono::NaiveDate;
use fieldbook_booking::{
    AddressInput, BookingError, BookingService, OrderRequest, ReservationRequest, SlotRequest,
};
use fieldbook_booking::request::SlotWindowRequest;

/// Builds the booking service from `FIELDBOOK_*` configuration.
pub(crate) fn connect() -> anyhow::Result<BookingService> {
    let config = fieldbook_core::load_app_config()?;
    tracing::debug!(?config, "loaded config");
    Ok(BookingService::from_config(&config)?)
}

pub(crate) struct SlotArgs {
    pub order_no: String,
    pub address: String,
    pub dates: Vec<NaiveDate>,
    pub region: Option<String>,
    pub customer_name: Option<String>,
}

impl SlotArgs {
    pub(crate) fn into_request(self) -> SlotRequest {
        SlotRequest {
            order: OrderRequest {
                order_no: self.order_no,
                customer_name: self.customer_name,
                address: Some(AddressInput::Text(self.address)),
                coordinates: None,
                duration: None,
                email: None,
                phone: None,
                driver_pool: None,
            },
            slots: SlotWindowRequest {
                dates: self.dates.iter().map(ToString::to_string).collect(),
                time_windows: Vec::new(),
            },
            region: self.region,
            planning: None,
            is_crm_booking: true,
        }
    }
}

/// # Errors
///
/// Returns an error if configuration is missing or the geocoder fails.
pub(crate) async fn run_geocode(address: &str) -> anyhow::Result<()> {
    let service = connect()?;
    match service.geocode(address).await? {
        Some(found) => println!(
            "{:.6}, {:.6}  {}",
            found.coordinates.latitude, found.coordinates.longitude, found.formatted_address
        ),
        None => println!("no match for '{address}'"),
    }
    Ok(())
}

/// # Errors
///
/// Returns an error for invalid input or missing configuration. Rule
/// rejections are printed, not returned.
pub(crate) async fn run_slots(args: SlotArgs) -> anyhow::Result<()> {
    let service = connect()?;
    match service.fetch_slots(args.into_request()).await {
        Ok(outcome) => {
            for rejection in &outcome.skipped {
                println!("skipped {}: {rejection}", rejection.date());
            }
            if let Some(message) = outcome.message() {
                println!("{message}");
                if outcome.degraded {
                    match (&outcome.temporary_order_no, outcome.order_created) {
                        (Some(temp), _) => println!(
                            "order {} was taken; follow-up order created as {temp}",
                            outcome.order_no
                        ),
                        (None, true) => {
                            println!("order {} was created for manual follow-up", outcome.order_no);
                        }
                        (None, false) => println!(
                            "order {} could NOT be created for manual follow-up",
                            outcome.order_no
                        ),
                    }
                }
                return Ok(());
            }
            println!("{:<27}{:<27}{:>8}  RESERVATION", "FROM", "TO", "COST");
            for slot in &outcome.slots {
                println!(
                    "{:<27}{:<27}{:>8.2}  {}",
                    slot.from.to_rfc3339(),
                    slot.to.to_rfc3339(),
                    slot.cost,
                    slot.reservation_id
                );
            }
            Ok(())
        }
        Err(BookingError::Rejected { rule, message }) => {
            println!("rejected ({rule}): {message}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// # Errors
///
/// Returns an error for missing configuration or a non-2xx outcome.
pub(crate) async fn run_reserve(reservation_id: &str, force_continue: bool) -> anyhow::Result<()> {
    let service = connect()?;
    let result = service
        .make_reservation(ReservationRequest {
            reservation_id: reservation_id.to_owned(),
            create_order_if_booking_fails: false,
            order_data: None,
            allow_force_continue: Some(force_continue),
            dates: Vec::new(),
            region: None,
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&result.body)?);
    if result.is_success() {
        Ok(())
    } else {
        anyhow::bail!("reservation {reservation_id} failed (HTTP {})", result.status)
    }
}
