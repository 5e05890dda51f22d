mod auth;
mod book;
mod borrowing;
mod envelope;
mod review;
mod user;

use std::time::Duration;

use error_stack::Report;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use kernel::prelude::entity::Session;
use kernel::{KernelError, Rejection};

use self::envelope::{Envelope, ErrorBody, Listing};
use crate::env;
use crate::error::{ConvertError, DriverError};

static LIBRARY_API_URL: &str = "LIBRARY_API_URL";
static LIBRARY_API_TIMEOUT_SECS: &str = "LIBRARY_API_TIMEOUT_SECS";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway to the upstream library REST API.
///
/// Every payload goes through [`Envelope`] / [`Listing`] exactly once here, so
/// the rest of the workspace only ever sees kernel entities.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let base_url = env(LIBRARY_API_URL).convert_error()?;
        let timeout = match env(LIBRARY_API_TIMEOUT_SECS) {
            Ok(secs) => Duration::from_secs(
                secs.trim()
                    .parse::<u64>()
                    .map_err(DriverError::from)
                    .convert_error()?,
            ),
            Err(_) => DEFAULT_TIMEOUT,
        };
        Self::with_base_url(base_url, timeout)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> error_stack::Result<Self, KernelError> {
        let client = Client::builder().timeout(timeout).build().convert_error()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("library api at {base_url} (timeout {timeout:?})");
        Ok(Self { client, base_url })
    }

    /// Builds a request, attaching the bearer token when the session has one.
    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match session.token() {
            Ok(token) => builder.bearer_auth(token.as_ref()),
            Err(_) => builder,
        }
    }

    /// Same as [`Self::request`] but refuses to leave the process without a token.
    fn authorized(
        &self,
        method: Method,
        path: &str,
        session: &Session,
    ) -> error_stack::Result<RequestBuilder, KernelError> {
        session.token()?;
        Ok(self.request(method, path, session))
    }

    async fn execute(&self, request: RequestBuilder) -> error_stack::Result<Vec<u8>, KernelError> {
        let response = request.send().await.convert_error()?;
        let status = response.status();
        let body = response.bytes().await.convert_error()?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            Err(classify(status, &body))
        }
    }

    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        request: RequestBuilder,
    ) -> error_stack::Result<T, KernelError> {
        let body = self.execute(request).await?;
        let envelope = serde_json::from_slice::<Envelope<T>>(&body)
            .map_err(DriverError::from)
            .convert_error()?;
        Ok(envelope.into_inner())
    }

    async fn fetch_list<T: DeserializeOwned + Send>(
        &self,
        request: RequestBuilder,
    ) -> error_stack::Result<Vec<T>, KernelError> {
        let listing: Listing<T> = self.fetch(request).await?;
        Ok(listing.into_vec())
    }

    async fn get<T: DeserializeOwned + Send>(
        &self,
        session: &Session,
        path: &str,
    ) -> error_stack::Result<T, KernelError> {
        self.fetch(self.request(Method::GET, path, session)).await
    }

    async fn get_list<T: DeserializeOwned + Send>(
        &self,
        session: &Session,
        path: &str,
    ) -> error_stack::Result<Vec<T>, KernelError> {
        self.fetch_list(self.request(Method::GET, path, session))
            .await
    }

    /// `None` when the upstream answers 404.
    async fn get_optional<T: DeserializeOwned + Send>(
        &self,
        session: &Session,
        path: &str,
    ) -> error_stack::Result<Option<T>, KernelError> {
        match self.get(session, path).await {
            Ok(found) => Ok(Some(found)),
            Err(report) if *report.current_context() == KernelError::NotFound => Ok(None),
            Err(report) => Err(report),
        }
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        method: Method,
        session: &Session,
        path: &str,
        body: &B,
    ) -> error_stack::Result<T, KernelError> {
        let request = self.authorized(method, path, session)?.json(body);
        self.fetch(request).await
    }

    async fn send_anonymous<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        path: &str,
        body: &B,
    ) -> error_stack::Result<T, KernelError> {
        let request = self.request(Method::POST, path, &Session::Anonymous).json(body);
        self.fetch(request).await
    }

    async fn remove(&self, session: &Session, path: &str) -> error_stack::Result<(), KernelError> {
        let request = self.authorized(Method::DELETE, path, session)?;
        self.execute(request).await?;
        Ok(())
    }
}

/// Maps a refused upstream response onto the kernel's error kinds. The body's
/// message, when present, travels along as a [`Rejection::Server`].
fn classify(status: StatusCode, body: &[u8]) -> Report<KernelError> {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected answer from the library service")
                .to_string()
        });
    tracing::warn!("library api answered {status}: {message}");
    let kind = match status {
        StatusCode::UNAUTHORIZED => KernelError::Unauthenticated,
        StatusCode::FORBIDDEN => KernelError::Forbidden,
        StatusCode::NOT_FOUND => KernelError::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => KernelError::Validation,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => KernelError::Rejected,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => KernelError::Timeout,
        _ => KernelError::Internal,
    };
    Report::new(Rejection::Server(message))
        .attach_printable(format!("upstream status {status}"))
        .change_context(kind)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn refusal_keeps_the_upstream_message() {
        let report = classify(
            StatusCode::BAD_REQUEST,
            br#"{"message":"No copies available"}"#,
        );
        assert_eq!(*report.current_context(), KernelError::Rejected);
        assert_eq!(
            report.downcast_ref::<Rejection>(),
            Some(&Rejection::Server(String::from("No copies available")))
        );
    }

    #[test]
    fn status_decides_the_kind() {
        let kind = |status| *classify(status, b"").current_context();
        assert_eq!(kind(StatusCode::UNAUTHORIZED), KernelError::Unauthenticated);
        assert_eq!(kind(StatusCode::FORBIDDEN), KernelError::Forbidden);
        assert_eq!(kind(StatusCode::NOT_FOUND), KernelError::NotFound);
        assert_eq!(kind(StatusCode::UNPROCESSABLE_ENTITY), KernelError::Validation);
        assert_eq!(kind(StatusCode::GATEWAY_TIMEOUT), KernelError::Timeout);
        assert_eq!(kind(StatusCode::BAD_GATEWAY), KernelError::Internal);
    }

    #[test]
    fn missing_body_falls_back_to_reason() {
        let report = classify(StatusCode::CONFLICT, b"<html>");
        assert_eq!(
            report.downcast_ref::<Rejection>(),
            Some(&Rejection::Server(String::from("Conflict")))
        );
    }

    #[tokio::test]
    async fn protected_calls_need_a_token() {
        let gateway =
            HttpGateway::with_base_url("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let error = gateway
            .remove(&Session::Anonymous, "/books/1")
            .await
            .unwrap_err();
        assert_eq!(*error.current_context(), KernelError::Unauthenticated);
    }
}
