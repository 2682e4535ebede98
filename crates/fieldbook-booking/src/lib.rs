//! Survey booking flows: location resolution, slot availability, order
//! conflict recovery and reservation confirmation.

pub mod attempt;
pub mod candidate;
pub mod confirm;
pub mod error;
pub mod location;
pub mod orchestrator;
pub mod request;
pub mod service;
pub mod slots;

pub use attempt::{AttemptState, ReservationAttempt, MAX_SUBMISSIONS};
pub use candidate::{CandidateBuilder, PendingOrder};
pub use confirm::{ConfirmOptions, ConfirmationResult, ReservationConfirmer};
pub use error::BookingError;
pub use location::{CoordinateSource, LocationResolver};
pub use orchestrator::{OrderReservationOrchestrator, OrderUsage, Submission};
pub use request::{AddressInput, OrderRequest, ReservationRequest, SlotRequest};
pub use service::BookingService;
pub use slots::{DateGate, SlotAvailabilityFetcher, SlotOutcome, NO_SLOTS_MESSAGE};
