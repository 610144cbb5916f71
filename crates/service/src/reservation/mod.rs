//! Reservations: admission checking (pure), storage seam, per-bay
//! serialization and the service tying them together.

pub mod admission;
pub mod domain;
pub mod locks;
pub mod repository;
pub mod service;

pub use admission::{Admission, AdmissionChecker, Booking, DayWindow, TimeSlot};
pub use domain::{Candidate, ReservationInput, ReservationOutcome};
pub use repository::{ReservationRepository, SeaOrmReservationRepository};
pub use service::ReservationService;
