mod request;
mod response;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};

use application::service::{LoginService, RegisterService};

use self::request::{LoginRequest, RegisterRequest, Transformer};
use self::response::Presenter;
use crate::controller::Intake;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::session;

pub trait AuthRouter {
    fn route_auth(self) -> Self;
}

impl AuthRouter for Router<AppModule> {
    fn route_auth(self) -> Self {
        self.route(
            "/login",
            post(
                |State(module): State<AppModule>,
                 jar: SignedCookieJar,
                 Json(req): Json<LoginRequest>| async move {
                    let session = module
                        .login(Transformer.emit(req))
                        .await
                        .map_err(ErrorStatus::from)?;
                    Presenter::new(jar).emit(session).map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/inscription",
            post(
                |State(module): State<AppModule>,
                 jar: SignedCookieJar,
                 Json(req): Json<RegisterRequest>| async move {
                    let session = module
                        .register(Transformer.emit(req))
                        .await
                        .map_err(ErrorStatus::from)?;
                    Presenter::new(jar)
                        .emit(session)
                        .map(|(jar, body)| (StatusCode::CREATED, jar, body))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/logout",
            post(|jar: CookieJar| async move { (session::clear(jar), StatusCode::NO_CONTENT) }),
        )
    }
}
