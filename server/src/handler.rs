use std::ops::Deref;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use error_stack::{Report, ResultExt};

use driver::gateway::HttpGateway;
use kernel::interface::auth::DependOnAuthenticator;
use kernel::interface::query::{
    DependOnBookQuery, DependOnBorrowingQuery, DependOnReviewQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnReviewModifier, DependOnUserModifier,
};
use kernel::prelude::dashboard::{DashboardCache, DependOnDashboardCache};
use kernel::KernelError;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init()?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

static SESSION_KEY: &str = "SESSION_KEY";

pub struct Handler {
    gateway: HttpGateway,
    dashboard_cache: DashboardCache,
    cookie_key: Key,
}

impl Handler {
    pub fn init() -> error_stack::Result<Self, KernelError> {
        let gateway = HttpGateway::new()?;

        Ok(Self {
            gateway,
            dashboard_cache: DashboardCache::default(),
            cookie_key: session_key()?,
        })
    }
}

/// Signing key for the session cookies, base64 encoded in `SESSION_KEY`.
fn session_key() -> error_stack::Result<Key, KernelError> {
    let Ok(encoded) = dotenvy::var(SESSION_KEY) else {
        tracing::warn!("{SESSION_KEY} is not set, sessions will not survive a restart");
        return Ok(Key::generate());
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .change_context(KernelError::Internal)
        .attach_printable_lazy(|| format!("{SESSION_KEY} is not base64"))?;
    if bytes.len() < 64 {
        return Err(Report::new(KernelError::Internal)
            .attach_printable(format!("{SESSION_KEY} must hold at least 64 bytes")));
    }
    Ok(Key::from(bytes.as_slice()))
}

impl FromRef<AppModule> for Key {
    fn from_ref(module: &AppModule) -> Self {
        module.cookie_key.clone()
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = HttpGateway;
    fn book_query(&self) -> &Self::BookQuery {
        &self.gateway
    }
}

impl DependOnBorrowingQuery for Handler {
    type BorrowingQuery = HttpGateway;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        &self.gateway
    }
}

impl DependOnReviewQuery for Handler {
    type ReviewQuery = HttpGateway;
    fn review_query(&self) -> &Self::ReviewQuery {
        &self.gateway
    }
}

impl DependOnUserQuery for Handler {
    type UserQuery = HttpGateway;
    fn user_query(&self) -> &Self::UserQuery {
        &self.gateway
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = HttpGateway;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.gateway
    }
}

impl DependOnBorrowingModifier for Handler {
    type BorrowingModifier = HttpGateway;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        &self.gateway
    }
}

impl DependOnReviewModifier for Handler {
    type ReviewModifier = HttpGateway;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        &self.gateway
    }
}

impl DependOnUserModifier for Handler {
    type UserModifier = HttpGateway;
    fn user_modifier(&self) -> &Self::UserModifier {
        &self.gateway
    }
}

impl DependOnAuthenticator for Handler {
    type Authenticator = HttpGateway;
    fn authenticator(&self) -> &Self::Authenticator {
        &self.gateway
    }
}

impl DependOnDashboardCache for Handler {
    fn dashboard_cache(&self) -> &DashboardCache {
        &self.dashboard_cache
    }
}
