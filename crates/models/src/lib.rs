pub mod errors;
pub mod db;
pub mod datetime;
pub mod service_bay;
pub mod customer;
pub mod vehicle;
pub mod reservation;
pub mod seed;

#[cfg(test)]
mod tests;

/// Ids in paths and bodies are positive integers.
pub fn validate_id(field: &str, id: i32) -> Result<(), errors::ModelError> {
    reservation::validate_reference(field, id)
}
