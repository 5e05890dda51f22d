use serde::{Deserialize, Serialize};

use kernel::interface::auth::{Authenticator, DependOnAuthenticator};
use kernel::interface::command::{Credentials, Registration};
use kernel::prelude::entity::{AccessToken, Role, Session, User};
use kernel::{KernelError, Rejection};

use super::user::UserRow;
use crate::gateway::HttpGateway;

#[async_trait::async_trait]
impl Authenticator for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> error_stack::Result<Session, KernelError> {
        let body = LoginBody {
            email: credentials.email.as_ref(),
            password: credentials.password.expose(),
        };
        let row: AuthRow = match self.send_anonymous("/auth/login", &body).await {
            Ok(row) => row,
            Err(report) if *report.current_context() == KernelError::Unauthenticated => {
                return Err(report
                    .change_context(Rejection::InvalidCredentials)
                    .change_context(KernelError::Rejected))
            }
            Err(report) => return Err(report),
        };
        Ok(row.into_session())
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> error_stack::Result<Session, KernelError> {
        let body = RegisterBody {
            name: registration.name.as_ref(),
            email: registration.email.as_ref(),
            password: registration.password.expose(),
            password_confirmation: registration.password.expose(),
            role: registration.role,
            student_number: registration.student_number.as_deref(),
        };
        let row: AuthRow = self.send_anonymous("/auth/register", &body).await?;
        Ok(row.into_session())
    }
}

impl DependOnAuthenticator for HttpGateway {
    type Authenticator = Self;
    fn authenticator(&self) -> &Self::Authenticator {
        self
    }
}

#[derive(Debug, Deserialize)]
struct AuthRow {
    #[serde(alias = "access_token")]
    token: String,
    user: UserRow,
}

impl AuthRow {
    fn into_session(self) -> Session {
        Session::authenticated(AccessToken::new(self.token), User::from(self.user))
    }
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
    role: Role,
    student_number: Option<&'a str>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn login_answer_becomes_a_session() {
        let row: AuthRow = serde_json::from_str(
            r#"{"token":"abc","user":{"id":2,"name":"Admin","email":"admin@univ.example","role":"admin"}}"#,
        )
        .unwrap();
        let session = row.into_session();
        assert!(session.require_admin().is_ok());
        assert_eq!(session.token().unwrap().as_ref(), "abc");
    }
}
