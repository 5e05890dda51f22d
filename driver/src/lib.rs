use crate::error::DriverError;

pub mod error;
pub mod gateway;

pub(crate) fn env(key: &str) -> Result<String, DriverError> {
    dotenvy::var(key).map_err(DriverError::from)
}
