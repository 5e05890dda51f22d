use std::fmt::Display;

use error_stack::{Context, Report};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    Unauthenticated,
    Forbidden,
    NotFound,
    Rejected,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::Unauthenticated => write!(f, "Authentication required"),
            KernelError::Forbidden => write!(f, "Operation not permitted"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Rejected => write!(f, "Request rejected"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// User-facing reason for a refused operation.
///
/// Kept inside a `Report<KernelError>` so the outer layers can show the message
/// while still branching on the coarse [`KernelError`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rejection {
    NoCopyAvailable,
    RenewalLimitReached,
    RenewOverdue,
    AlreadyReturned,
    AlreadyReviewed,
    NotEligibleForReview,
    InvalidRating(i32),
    MissingDueDate,
    DueBeforeStart,
    StartInPast,
    InvalidRenewalDate,
    PasswordMismatch,
    PasswordTooShort,
    InvalidQuantity,
    AdminRegistration,
    InvalidCredentials,
    EmailTaken,
    WrongPassword,
    MissingField(&'static str),
    InvalidDate(&'static str),
    Server(String),
}

impl Rejection {
    /// Form problems are caught before any network call; everything else is a
    /// business rule the backend would refuse as well.
    pub fn kind(&self) -> KernelError {
        match self {
            Rejection::InvalidRating(_)
            | Rejection::MissingDueDate
            | Rejection::DueBeforeStart
            | Rejection::StartInPast
            | Rejection::InvalidRenewalDate
            | Rejection::PasswordMismatch
            | Rejection::PasswordTooShort
            | Rejection::InvalidQuantity
            | Rejection::AdminRegistration
            | Rejection::MissingField(_)
            | Rejection::InvalidDate(_) => KernelError::Validation,
            _ => KernelError::Rejected,
        }
    }

    pub fn into_report(self) -> Report<KernelError> {
        let kind = self.kind();
        Report::new(self).change_context(kind)
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NoCopyAvailable => write!(f, "No copy of this book is currently available"),
            Rejection::RenewalLimitReached => {
                write!(f, "This borrowing has already been renewed the maximum number of times")
            }
            Rejection::RenewOverdue => write!(f, "An overdue borrowing cannot be renewed"),
            Rejection::AlreadyReturned => write!(f, "This book has already been returned"),
            Rejection::AlreadyReviewed => write!(f, "You have already reviewed this book"),
            Rejection::NotEligibleForReview => {
                write!(f, "You can only review books you have borrowed and returned")
            }
            Rejection::InvalidRating(rating) => {
                write!(f, "Rating must be between 1 and 5 (got {rating})")
            }
            Rejection::MissingDueDate => write!(f, "Please choose a due date"),
            Rejection::DueBeforeStart => write!(f, "The due date cannot precede the start date"),
            Rejection::StartInPast => write!(f, "The start date cannot be in the past"),
            Rejection::InvalidRenewalDate => {
                write!(f, "The new due date must fall after the current one and within the renewal period")
            }
            Rejection::PasswordMismatch => write!(f, "Passwords do not match"),
            Rejection::PasswordTooShort => write!(f, "Password must be at least 8 characters long"),
            Rejection::InvalidQuantity => {
                write!(f, "Available copies must be between 0 and the total number of copies")
            }
            Rejection::AdminRegistration => {
                write!(f, "Administrator accounts cannot be created through registration")
            }
            Rejection::InvalidCredentials => write!(f, "Invalid email or password"),
            Rejection::EmailTaken => write!(f, "An account already exists for this email"),
            Rejection::WrongPassword => write!(f, "The current password is incorrect"),
            Rejection::MissingField(field) => write!(f, "The field `{field}` is required"),
            Rejection::InvalidDate(field) => {
                write!(f, "The field `{field}` must be a date formatted YYYY-MM-DD")
            }
            Rejection::Server(message) => write!(f, "{message}"),
        }
    }
}

impl Context for Rejection {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn form_problems_are_validation_errors() {
        let report = Rejection::MissingDueDate.into_report();
        assert_eq!(*report.current_context(), KernelError::Validation);
        assert_eq!(
            report.downcast_ref::<Rejection>(),
            Some(&Rejection::MissingDueDate)
        );
    }

    #[test]
    fn business_rules_are_rejections() {
        let report = Rejection::NoCopyAvailable.into_report();
        assert_eq!(*report.current_context(), KernelError::Rejected);
    }
}
