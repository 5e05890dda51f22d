use std::num::ParseIntError;

use error_stack::Report;
use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Http(reqwest::Error),
    #[error(transparent)]
    Env(dotenvy::Error),
    #[error(transparent)]
    Conversion(anyhow::Error),
    #[error(transparent)]
    Serde(serde_json::Error),
}

impl From<reqwest::Error> for DriverError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<dotenvy::Error> for DriverError {
    fn from(value: dotenvy::Error) -> Self {
        Self::Env(value)
    }
}

impl From<serde_json::Error> for DriverError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<ParseIntError> for DriverError {
    fn from(value: ParseIntError) -> Self {
        Self::Conversion(anyhow::Error::new(value))
    }
}

impl From<anyhow::Error> for DriverError {
    fn from(value: anyhow::Error) -> Self {
        Self::Conversion(value)
    }
}

/// Lifts a driver level failure into the kernel's error stack.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| match &error {
            DriverError::Http(http) if http.is_timeout() => {
                Report::new(error).change_context(KernelError::Timeout)
            }
            _ => Report::new(error).change_context(KernelError::Internal),
        })
    }
}

impl<T> ConvertError for Result<T, reqwest::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(DriverError::from).convert_error()
    }
}
