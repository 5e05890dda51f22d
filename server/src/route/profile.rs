mod request;
mod response;

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use axum_extra::extract::cookie::SignedCookieJar;

use application::service::{ChangePasswordService, GetProfileService, UpdateProfileService};
use application::transfer::UserDto;

use self::request::{ChangePasswordRequest, Transformer, UpdateProfileRequest};
use self::response::Presenter;
pub(crate) use self::response::UserResponse;
use crate::controller::{Controller, Intake};
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::session::{self, CurrentSession};

pub trait ProfileRouter {
    fn route_profile(self) -> Self;
}

impl ProfileRouter for Router<AppModule> {
    fn route_profile(self) -> Self {
        self.route(
            "/profil",
            get(
                |State(module): State<AppModule>, CurrentSession(session): CurrentSession| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_profile(&session).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 jar: SignedCookieJar,
                 Json(req): Json<UpdateProfileRequest>| async move {
                    // The cookie copy of the user has to follow the edit.
                    let dto = Transformer.emit(req);
                    let session = module
                        .update_profile(&session, dto)
                        .await
                        .map_err(ErrorStatus::from)?;
                    let jar = session::store(jar, &session).map_err(ErrorStatus::from)?;
                    let user = session.user().map_err(ErrorStatus::from)?.clone();
                    Ok::<_, ErrorStatus>((jar, Json(UserResponse::from(UserDto::from(user)))))
                },
            ),
        )
        .route(
            "/profil/password",
            put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Json(req): Json<ChangePasswordRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.change_password(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
