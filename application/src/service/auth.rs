use kernel::interface::auth::{Authenticator, DependOnAuthenticator};
use kernel::interface::command::{Credentials, Registration};
use kernel::prelude::entity::Session;
use kernel::KernelError;

use crate::transfer::{LoginDto, RegisterDto};

#[async_trait::async_trait]
pub trait LoginService: 'static + Sync + Send + DependOnAuthenticator {
    async fn login(&self, dto: LoginDto) -> error_stack::Result<Session, KernelError> {
        let credentials = Credentials::new(dto.email, dto.password)?;
        let session = self.authenticator().login(&credentials).await?;
        tracing::info!("signed in as {:?}", session.user()?.id());
        Ok(session)
    }
}

impl<T> LoginService for T where T: DependOnAuthenticator {}

#[async_trait::async_trait]
pub trait RegisterService: 'static + Sync + Send + DependOnAuthenticator {
    async fn register(&self, dto: RegisterDto) -> error_stack::Result<Session, KernelError> {
        let registration = Registration::new(
            dto.name,
            dto.email,
            dto.password,
            dto.password_confirmation,
            dto.role,
            dto.student_number,
        )?;
        let session = self.authenticator().register(&registration).await?;
        tracing::info!("registered {:?}", session.user()?.id());
        Ok(session)
    }
}

impl<T> RegisterService for T where T: DependOnAuthenticator {}
