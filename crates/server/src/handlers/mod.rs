pub mod customers;
pub mod reservations;
pub mod service_bays;
pub mod vehicles;
