use crate::command::{PasswordChange, UserDraft, UserPatch};
use crate::entity::{Session, User, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserModifier: 'static + Sync + Send {
    async fn create(
        &self,
        session: &Session,
        user: &UserDraft,
    ) -> error_stack::Result<User, KernelError>;
    async fn update(
        &self,
        session: &Session,
        id: &UserId,
        patch: &UserPatch,
    ) -> error_stack::Result<User, KernelError>;
    async fn delete(&self, session: &Session, id: &UserId)
        -> error_stack::Result<(), KernelError>;
    async fn change_password(
        &self,
        session: &Session,
        id: &UserId,
        change: &PasswordChange,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnUserModifier: 'static + Sync + Send {
    type UserModifier: UserModifier;
    fn user_modifier(&self) -> &Self::UserModifier;
}
