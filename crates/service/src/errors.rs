use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Unique or foreign-key violation reported by the database.
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Classify a sea-orm error into the service taxonomy.
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::Constraint(msg),
            _ => {}
        }
        match err {
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            DbErr::RecordNotUpdated => Self::NotFound("record not updated".into()),
            other => Self::Db(other.to_string()),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self { Self::from_db(err) }
}
