use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use error_stack::Report;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use vodca::{AsRefln, Fromln};

use crate::{KernelError, Rejection};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(&self.0, serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        time::serde::rfc3339::deserialize(deserializer).map(|time| Self(time, PhantomData))
    }
}

/// Parses a calendar date written as `YYYY-MM-DD`.
pub fn parse_date(field: &'static str, value: &str) -> error_stack::Result<Date, KernelError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|error| {
        Report::new(error)
            .attach_printable(format!("`{value}` is not a YYYY-MM-DD date"))
            .change_context(Rejection::InvalidDate(field))
            .change_context(KernelError::Validation)
    })
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Reads an instant in the shapes backends tend to emit: RFC 3339,
/// `YYYY-MM-DD HH:MM:SS` (taken as UTC) or a bare date (midnight UTC).
pub fn parse_instant(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if let Ok(instant) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(instant) = PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(instant.assume_utc());
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}
