use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use error_stack::Report;
use serde::Serialize;

use kernel::{KernelError, Rejection};

use crate::session;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            KernelError::Unauthenticated => StatusCode::SEE_OTHER,
            KernelError::Forbidden => StatusCode::FORBIDDEN,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Rejected => match self.0.downcast_ref::<Rejection>() {
                Some(Rejection::InvalidCredentials) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::CONFLICT,
            },
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The user-facing reason when there is one, the coarse category otherwise.
    fn message(&self) -> String {
        match self.0.downcast_ref::<Rejection>() {
            Some(rejection) => rejection.to_string(),
            None => self.0.current_context().to_string(),
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::SEE_OTHER {
            tracing::debug!("no usable session, sending to /login: {:?}", self.0);
            return (session::clear(CookieJar::new()), Redirect::to("/login")).into_response();
        }
        if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
            tracing::warn!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorBody {
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::header::{LOCATION, SET_COOKIE};

    fn respond(report: Report<KernelError>) -> Response {
        ErrorStatus::from(report).into_response()
    }

    #[test]
    fn rejections_map_to_conflict_and_validation() {
        assert_eq!(
            respond(Rejection::NoCopyAvailable.into_report()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            respond(Rejection::MissingDueDate.into_report()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            respond(Rejection::InvalidCredentials.into_report()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            respond(Report::new(KernelError::Forbidden)).status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn message_prefers_the_rejection() {
        let status = ErrorStatus::from(Rejection::RenewOverdue.into_report());
        assert_eq!(status.message(), "An overdue borrowing cannot be renewed");
        let status = ErrorStatus::from(Report::new(KernelError::Timeout));
        assert_eq!(status.message(), "Process timed out");
    }

    #[test]
    fn lost_session_redirects_and_clears() {
        let response = respond(Report::new(KernelError::Unauthenticated));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/login");
        assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
    }
}
