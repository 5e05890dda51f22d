use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, SameSite, SignedCookieJar};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use error_stack::ResultExt;

use kernel::prelude::entity::Session;
use kernel::KernelError;

pub const TOKEN_COOKIE: &str = "token";
pub const USER_COOKIE: &str = "user";

/// Session rebuilt from the signed `token` / `user` cookies of the request.
/// Cookies whose signature does not verify are ignored.
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::from_headers(&parts.headers, Key::from_ref(state));
        Ok(Self(restore(&jar)))
    }
}

pub fn restore(jar: &SignedCookieJar) -> Session {
    let token = jar.get(TOKEN_COOKIE).map(|cookie| cookie.value().to_string());
    let user = jar
        .get(USER_COOKIE)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());
    Session::restore(token.as_deref(), user.as_deref())
}

/// Persists an authenticated session in the two signed cookies.
pub fn store(
    jar: SignedCookieJar,
    session: &Session,
) -> error_stack::Result<SignedCookieJar, KernelError> {
    let token = session.token()?;
    let user = serde_json::to_vec(session.user()?)
        .change_context(KernelError::Internal)
        .attach_printable("failed to encode the session user")?;
    let token = Cookie::build((TOKEN_COOKIE, token.as_ref().clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    let user = Cookie::build((USER_COOKIE, URL_SAFE_NO_PAD.encode(user)))
        .path("/")
        .same_site(SameSite::Lax);
    Ok(jar.add(token).add(user))
}

pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(USER_COOKIE).path("/"))
}

/// Drops cookies that no longer describe a usable session, unless the handler
/// already replaced them.
pub async fn discard_stale(
    State(key): State<Key>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let stored = jar.get(TOKEN_COOKIE).is_some() || jar.get(USER_COOKIE).is_some();
    let signed = SignedCookieJar::from_headers(request.headers(), key);
    let stale = stored && !restore(&signed).is_authenticated();
    let response = next.run(request).await;
    if stale && !response.headers().contains_key(SET_COOKIE) {
        tracing::debug!("clearing unreadable session cookies");
        return (clear(jar), response).into_response();
    }
    response
}
