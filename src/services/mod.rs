/// Business logic between the commands and the stores
mod birthday_service;
mod entry_service;

pub use birthday_service::{BirthdayService, PersonLookup};
pub use entry_service::{EntryInput, EntryService, MemberService};

use crate::store::StoreError;
use crate::utils::validation::ValidationError;

/// Failure of a service operation
#[derive(Debug)]
pub enum ServiceError {
    /// The input was rejected, message is safe to show to users
    Invalid(ValidationError),
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Invalid(e) => write!(f, "{}", e),
            ServiceError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Invalid(e) => Some(e),
            ServiceError::Store(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        ServiceError::Invalid(e)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Store(StoreError::Database(e))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
