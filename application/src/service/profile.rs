use error_stack::Report;

use kernel::interface::command::{PasswordChange, UserPatch};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{Session, UserName};
use kernel::KernelError;

use crate::transfer::{ChangePasswordDto, ProfileDto, UpdateProfileDto, UserDto};

#[async_trait::async_trait]
pub trait GetProfileService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_profile(&self, session: &Session) -> error_stack::Result<ProfileDto, KernelError> {
        let id = *session.user()?.id();
        let (user, stats) = tokio::join!(
            self.user_query().find_by_id(session, &id),
            self.user_query().stats(session, &id)
        );
        let user = user?.ok_or_else(|| Report::new(KernelError::NotFound))?;
        Ok(ProfileDto {
            user: UserDto::from(user),
            stats: stats?,
        })
    }
}

impl<T> GetProfileService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait UpdateProfileService: 'static + Sync + Send + DependOnUserModifier {
    /// Returns the session carrying the updated user so it can be persisted again.
    async fn update_profile(
        &self,
        session: &Session,
        dto: UpdateProfileDto,
    ) -> error_stack::Result<Session, KernelError> {
        let id = *session.user()?.id();
        let patch = UserPatch {
            name: dto.name.map(UserName::new),
            phone: dto.phone,
            department: dto.department,
            bio: dto.bio,
            role: None,
            is_active: None,
            preferences: dto.preferences,
        }
        .validate()?;
        let user = self.user_modifier().update(session, &id, &patch).await?;
        tracing::debug!("profile of {id:?} updated");
        Ok(session.clone().with_user(user))
    }
}

impl<T> UpdateProfileService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait ChangePasswordService: 'static + Sync + Send + DependOnUserModifier {
    async fn change_password(
        &self,
        session: &Session,
        dto: ChangePasswordDto,
    ) -> error_stack::Result<(), KernelError> {
        let id = *session.user()?.id();
        let change = PasswordChange::new(
            dto.current_password,
            dto.new_password,
            dto.password_confirmation,
        )?;
        self.user_modifier()
            .change_password(session, &id, &change)
            .await?;
        tracing::info!("password of {id:?} changed");
        Ok(())
    }
}

impl<T> ChangePasswordService for T where T: DependOnUserModifier {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixture::Library;
    use crate::service::{CreateReviewService, LoginService, ReturnBorrowingService};
    use crate::transfer::{CreateReviewDto, LoginDto, ReturnBorrowingDto};
    use kernel::prelude::entity::{Role, UserPreferences};
    use kernel::Rejection;
    use time::{Duration, OffsetDateTime};

    #[tokio::test]
    async fn profile_counts_borrowings_and_reviews() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let reader = library.sign_up("Amina", Role::Student);
        let now = OffsetDateTime::now_utc();
        let dune = library.book("Dune", "Frank Herbert", "Fiction", 1);
        let emma = library.book("Emma", "Jane Austen", "Fiction", 1);
        let done = library.loan(&reader, &dune, now + Duration::days(3));
        library.loan(&reader, &emma, now - Duration::days(2));
        library
            .return_borrowing(
                &reader,
                ReturnBorrowingDto {
                    id: *done.id().as_ref(),
                    notes: None,
                },
            )
            .await?;
        library
            .create_review(
                &reader,
                CreateReviewDto {
                    book_id: *dune.id().as_ref(),
                    rating: 4,
                    comment: String::from("Dense"),
                },
            )
            .await?;

        let profile = library.get_profile(&reader).await?;
        assert_eq!(profile.user.name, "Amina");
        assert_eq!(profile.stats.total_borrowings, 2);
        assert_eq!(profile.stats.overdue_borrowings, 1);
        assert_eq!(profile.stats.returned_borrowings, 1);
        assert_eq!(profile.stats.reviews_written, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_refreshes_the_session() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let reader = library.sign_up("Amina", Role::Student);
        let session = library
            .update_profile(
                &reader,
                UpdateProfileDto {
                    name: None,
                    phone: Some(String::from("+33 1 23 45 67 89")),
                    department: Some(String::from("Physics")),
                    bio: None,
                    preferences: Some(UserPreferences {
                        language: String::from("en"),
                        ..UserPreferences::default()
                    }),
                },
            )
            .await?;
        let user = session.user()?;
        assert_eq!(user.profile().department.as_deref(), Some("Physics"));
        assert_eq!(user.preferences().language, "en");
        assert_eq!(session.token()?, reader.token()?);
        assert_eq!(user.role(), &Role::Student);
        Ok(())
    }

    #[tokio::test]
    async fn password_change_is_checked_before_sending() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let reader = library.sign_up("Amina", Role::Student);

        let mismatch = library
            .change_password(
                &reader,
                ChangePasswordDto {
                    current_password: String::from("correct horse"),
                    new_password: String::from("battery staple"),
                    password_confirmation: String::from("battery stapler"),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(*mismatch.current_context(), KernelError::Validation);
        assert_eq!(
            mismatch.downcast_ref::<Rejection>(),
            Some(&Rejection::PasswordMismatch)
        );

        library
            .change_password(
                &reader,
                ChangePasswordDto {
                    current_password: String::from("correct horse"),
                    new_password: String::from("battery staple"),
                    password_confirmation: String::from("battery staple"),
                },
            )
            .await?;
        library
            .login(LoginDto {
                email: String::from("amina@univ.example"),
                password: String::from("battery staple"),
            })
            .await?;
        Ok(())
    }
}
