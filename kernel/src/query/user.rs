use crate::entity::{Session, User, UserId, UserStats};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserQuery: Sync + Send + 'static {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<User>, KernelError>;
    async fn find_by_id(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError>;
    async fn stats(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<UserStats, KernelError>;
}

pub trait DependOnUserQuery: Sync + Send + 'static {
    type UserQuery: UserQuery;
    fn user_query(&self) -> &Self::UserQuery;
}
