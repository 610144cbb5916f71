//! Service layer for the auto-service shop.
//! - Reservation admission and the reservation service live in [`reservation`].
//! - Customer, vehicle and service bay CRUD are thin functions over `models`.
//! - All fallible operations return [`errors::ServiceError`].

pub mod errors;
pub mod reservation;
pub mod customer_service;
pub mod vehicle_service;
pub mod service_bay_service;
#[cfg(test)]
pub mod test_support;
