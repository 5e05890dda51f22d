use kernel::interface::auth::{Authenticator, DependOnAuthenticator};
use kernel::interface::command::{Credentials, Registration};
use kernel::prelude::entity::{Session, UserProfile};
use kernel::{KernelError, Rejection};

use crate::gateway::InMemoryGateway;

#[async_trait::async_trait]
impl Authenticator for InMemoryGateway {
    async fn login(&self, credentials: &Credentials) -> error_stack::Result<Session, KernelError> {
        let mut store = self.lock()?;
        let user = store
            .accounts
            .values()
            .find(|account| {
                account.user.email() == &credentials.email
                    && account.password == credentials.password.expose()
                    && *account.user.is_active().as_ref()
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| Rejection::InvalidCredentials.into_report())?;
        let token = store.issue(*user.id());
        tracing::info!("user {:?} signed in", user.id());
        Ok(Session::authenticated(token, user))
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> error_stack::Result<Session, KernelError> {
        let mut store = self.lock()?;
        let user = store.open_account(
            registration.name.clone(),
            registration.email.clone(),
            registration.password.expose(),
            registration.role,
            UserProfile {
                student_number: registration.student_number.clone(),
                ..UserProfile::default()
            },
        )?;
        let token = store.issue(*user.id());
        Ok(Session::authenticated(token, user))
    }
}

impl DependOnAuthenticator for InMemoryGateway {
    type Authenticator = Self;
    fn authenticator(&self) -> &Self::Authenticator {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use kernel::prelude::entity::Role;

    fn registration(email: &str) -> Registration {
        Registration::new(
            "Amina",
            email,
            "correct horse",
            "correct horse",
            None,
            Some(String::from("S-1024")),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn registered_students_can_sign_in() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let session = gateway.register(&registration("amina@univ.example")).await?;
        let user = session.user()?;
        assert_eq!(user.role(), &Role::Student);
        assert_eq!(user.profile().student_number.as_deref(), Some("S-1024"));

        let again = gateway
            .login(&Credentials::new("Amina@Univ.example", "correct horse")?)
            .await?;
        assert_eq!(again.user()?, user);
        assert_ne!(again.token()?, session.token()?);
        Ok(())
    }

    #[tokio::test]
    async fn bad_credentials_and_duplicates_are_rejected() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        gateway.register(&registration("amina@univ.example")).await?;

        let refused = gateway
            .login(&Credentials::new("amina@univ.example", "wrong horse")?)
            .await
            .unwrap_err();
        assert_eq!(
            refused.downcast_ref::<Rejection>(),
            Some(&Rejection::InvalidCredentials)
        );

        let duplicate = gateway
            .register(&registration("amina@univ.example"))
            .await
            .unwrap_err();
        assert_eq!(
            duplicate.downcast_ref::<Rejection>(),
            Some(&Rejection::EmailTaken)
        );
        Ok(())
    }
}
