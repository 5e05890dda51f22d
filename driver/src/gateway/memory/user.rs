use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::command::{PasswordChange, UserDraft, UserPatch};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{BorrowingStatus, Session, User, UserId, UserProfile, UserStats};
use kernel::{KernelError, Rejection};

use crate::gateway::InMemoryGateway;

#[async_trait::async_trait]
impl UserQuery for InMemoryGateway {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<User>, KernelError> {
        let store = self.lock()?;
        store.admin(session)?;
        Ok(store
            .accounts
            .values()
            .map(|account| account.user.clone())
            .collect())
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let store = self.lock()?;
        store.self_or_admin(session, id)?;
        Ok(store.accounts.get(id).map(|account| account.user.clone()))
    }

    async fn stats(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<UserStats, KernelError> {
        let now = OffsetDateTime::now_utc();
        let store = self.lock()?;
        store.self_or_admin(session, id)?;
        let mut stats = UserStats::default();
        for borrowing in store
            .borrowings
            .values()
            .filter(|borrowing| borrowing.user_id() == id)
        {
            stats.total_borrowings += 1;
            match borrowing.status_at(now) {
                BorrowingStatus::Active => stats.active_borrowings += 1,
                BorrowingStatus::Overdue => stats.overdue_borrowings += 1,
                BorrowingStatus::Returned => stats.returned_borrowings += 1,
            }
        }
        stats.reviews_written = store
            .reviews
            .iter()
            .filter(|review| review.user_id() == id)
            .count() as i64;
        Ok(stats)
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryGateway {
    async fn create(
        &self,
        session: &Session,
        user: &UserDraft,
    ) -> error_stack::Result<User, KernelError> {
        let draft = user.clone().validate()?;
        let mut store = self.lock()?;
        store.admin(session)?;
        store.open_account(
            draft.name,
            draft.email,
            draft.password.expose(),
            draft.role,
            UserProfile {
                student_number: draft.student_number,
                ..UserProfile::default()
            },
        )
    }

    async fn update(
        &self,
        session: &Session,
        id: &UserId,
        patch: &UserPatch,
    ) -> error_stack::Result<User, KernelError> {
        let patch = patch.clone().validate()?;
        let mut store = self.lock()?;
        let caller = store.self_or_admin(session, id)?;
        if patch.touches_privileges() && !caller.is_admin() {
            return Err(Report::new(KernelError::Forbidden)
                .attach_printable("only administrators change roles or activation"));
        }
        let account = store
            .accounts
            .get_mut(id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        account.user.substitute(|user| {
            if let Some(name) = patch.name {
                *user.name = name;
            }
            if let Some(role) = patch.role {
                *user.role = role;
            }
            if let Some(active) = patch.is_active {
                *user.is_active = active;
            }
            if let Some(preferences) = patch.preferences {
                *user.preferences = preferences;
            }
            if patch.phone.is_some() {
                user.profile.phone = patch.phone;
            }
            if patch.department.is_some() {
                user.profile.department = patch.department;
            }
            if patch.bio.is_some() {
                user.profile.bio = patch.bio;
            }
        });
        Ok(account.user.clone())
    }

    async fn delete(&self, session: &Session, id: &UserId) -> error_stack::Result<(), KernelError> {
        let mut store = self.lock()?;
        store.admin(session)?;
        store
            .accounts
            .remove(id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        store.tokens.retain(|_, owner| owner != id);
        Ok(())
    }

    async fn change_password(
        &self,
        session: &Session,
        id: &UserId,
        change: &PasswordChange,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = self.lock()?;
        if store.caller(session)?.id() != id {
            return Err(Report::new(KernelError::Forbidden));
        }
        let account = store
            .accounts
            .get_mut(id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if account.password != change.current.expose() {
            return Err(Rejection::WrongPassword.into_report());
        }
        account.password = change.new.expose().to_string();
        Ok(())
    }
}

impl DependOnUserQuery for InMemoryGateway {
    type UserQuery = Self;
    fn user_query(&self) -> &Self::UserQuery {
        self
    }
}

impl DependOnUserModifier for InMemoryGateway {
    type UserModifier = Self;
    fn user_modifier(&self) -> &Self::UserModifier {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gateway::memory::fixture::{admin, student};
    use kernel::prelude::entity::{IsActive, Role, UserName};

    #[tokio::test]
    async fn students_edit_only_their_own_profile() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let amina = student(&gateway, "Amina");
        let bruno = student(&gateway, "Bruno");
        let me = *amina.user()?.id();

        let patch = UserPatch {
            name: Some(UserName::new("Amina K.")),
            department: Some(String::from("Physics")),
            ..UserPatch::default()
        };
        let updated = gateway.update(&amina, &me, &patch).await?;
        assert_eq!(updated.name(), &UserName::new("Amina K."));
        assert_eq!(updated.profile().department.as_deref(), Some("Physics"));

        let refused = gateway.update(&bruno, &me, &patch).await.unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);

        let promote = UserPatch {
            role: Some(Role::Admin),
            ..UserPatch::default()
        };
        let refused = gateway.update(&amina, &me, &promote).await.unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);
        Ok(())
    }

    #[tokio::test]
    async fn deactivated_users_lose_their_session() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let admin = admin(&gateway);
        let amina = student(&gateway, "Amina");
        let me = *amina.user()?.id();

        let deactivate = UserPatch {
            is_active: Some(IsActive::new(false)),
            ..UserPatch::default()
        };
        gateway.update(&admin, &me, &deactivate).await?;
        let refused = gateway.stats(&amina, &me).await.unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Unauthenticated);
        Ok(())
    }

    #[tokio::test]
    async fn password_change_checks_the_current_one() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let amina = student(&gateway, "Amina");
        let me = *amina.user()?.id();

        let wrong = PasswordChange::new("not mine", "new password", "new password")?;
        let refused = gateway.change_password(&amina, &me, &wrong).await.unwrap_err();
        assert_eq!(
            refused.downcast_ref::<Rejection>(),
            Some(&Rejection::WrongPassword)
        );

        let right = PasswordChange::new("correct horse", "new password", "new password")?;
        gateway.change_password(&amina, &me, &right).await?;
        Ok(())
    }
}
