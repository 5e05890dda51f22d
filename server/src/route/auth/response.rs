use axum::Json;
use axum_extra::extract::cookie::SignedCookieJar;

use application::transfer::UserDto;
use kernel::prelude::entity::Session;
use kernel::KernelError;

use crate::route::profile::UserResponse;
use crate::session;

/// Writes the fresh session into the cookie jar and answers with its user.
pub struct Presenter {
    jar: SignedCookieJar,
}

impl Presenter {
    pub fn new(jar: SignedCookieJar) -> Self {
        Self { jar }
    }

    pub fn emit(
        self,
        session: Session,
    ) -> error_stack::Result<(SignedCookieJar, Json<UserResponse>), KernelError> {
        let jar = session::store(self.jar, &session)?;
        let user = UserDto::from(session.user()?.clone());
        Ok((jar, Json(UserResponse::from(user))))
    }
}
