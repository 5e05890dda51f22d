use error_stack::Report;

use kernel::interface::command::{BookDraft, Password, UserDraft, UserPatch};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnUserQuery, UserQuery};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnUserModifier, UserModifier,
};
use kernel::prelude::catalogue::CatalogueFilter;
use kernel::prelude::entity::{BookId, Email, IsActive, Session, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{
    BookDto, BookFormDto, CreateUserDto, DeleteBookDto, DeleteUserDto, UpdateBookDto,
    UpdateUserDto, UserDto,
};

#[async_trait::async_trait]
pub trait ListBooksService: 'static + Sync + Send + DependOnBookQuery {
    async fn list_books(
        &self,
        session: &Session,
        search: Option<String>,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        session.require_admin()?;
        let books = self.book_query().find_all(session).await?;
        let filter = CatalogueFilter {
            search,
            ..CatalogueFilter::default()
        };
        Ok(filter.apply(&books).into_iter().map(BookDto::from).collect())
    }
}

impl<T> ListBooksService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(
        &self,
        session: &Session,
        dto: BookFormDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        session.require_admin()?;
        let draft = BookDraft::from(dto).validate()?;
        let book = self.book_modifier().create(session, &draft).await?;
        tracing::info!("book {:?} created", book.id());
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn update_book(
        &self,
        session: &Session,
        dto: UpdateBookDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        session.require_admin()?;
        let id = BookId::new(dto.id);
        let draft = BookDraft::from(dto.form).validate()?;
        let book = self.book_modifier().update(session, &id, &draft).await?;
        tracing::info!("book {id:?} updated");
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_book(
        &self,
        session: &Session,
        dto: DeleteBookDto,
    ) -> error_stack::Result<(), KernelError> {
        session.require_admin()?;
        let id = BookId::new(dto.id);
        self.book_modifier().delete(session, &id).await?;
        tracing::info!("book {id:?} deleted");
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait ListUsersService: 'static + Sync + Send + DependOnUserQuery {
    async fn list_users(&self, session: &Session) -> error_stack::Result<Vec<UserDto>, KernelError> {
        session.require_admin()?;
        let mut users = self.user_query().find_all(session).await?;
        users.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> ListUsersService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(
        &self,
        session: &Session,
        dto: CreateUserDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        session.require_admin()?;
        let draft = UserDraft {
            name: UserName::new(dto.name),
            email: Email::new(dto.email),
            password: Password::new(dto.password),
            role: dto.role,
            student_number: dto
                .student_number
                .filter(|number| !number.trim().is_empty()),
        }
        .validate()?;
        let user = self.user_modifier().create(session, &draft).await?;
        tracing::info!("user {:?} created as {:?}", user.id(), user.role());
        Ok(UserDto::from(user))
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait UpdateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn update_user(
        &self,
        session: &Session,
        dto: UpdateUserDto,
    ) -> error_stack::Result<UserDto, KernelError> {
        let admin = session.require_admin()?;
        let id = UserId::new(dto.id);
        if admin.id() == &id && dto.is_active == Some(false) {
            return Err(Report::new(KernelError::Forbidden)
                .attach_printable("administrators cannot deactivate themselves"));
        }
        let patch = UserPatch {
            name: dto.name.map(UserName::new),
            phone: dto.phone,
            department: dto.department,
            bio: dto.bio,
            role: dto.role,
            is_active: dto.is_active.map(IsActive::new),
            preferences: None,
        }
        .validate()?;
        let user = self.user_modifier().update(session, &id, &patch).await?;
        tracing::info!("user {id:?} updated");
        Ok(UserDto::from(user))
    }
}

impl<T> UpdateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait DeleteUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn delete_user(
        &self,
        session: &Session,
        dto: DeleteUserDto,
    ) -> error_stack::Result<(), KernelError> {
        let admin = session.require_admin()?;
        let id = UserId::new(dto.id);
        if admin.id() == &id {
            return Err(Report::new(KernelError::Forbidden)
                .attach_printable("administrators cannot delete their own account"));
        }
        self.user_modifier().delete(session, &id).await?;
        tracing::info!("user {id:?} deleted");
        Ok(())
    }
}

impl<T> DeleteUserService for T where T: DependOnUserModifier {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixture::Library;
    use kernel::prelude::entity::Role;
    use kernel::Rejection;

    fn form(title: &str, total: i32, available: Option<i32>) -> BookFormDto {
        BookFormDto {
            title: title.to_string(),
            author: String::from("Frank Herbert"),
            isbn: Some(String::from(" ")),
            genre: Some(String::from("Fiction")),
            description: None,
            total_quantity: total,
            available_quantity: available,
            publication_year: Some(1965),
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn book_lifecycle() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let admin = library.sign_up("Admin", Role::Admin);

        let created = library.create_book(&admin, form("Dune", 3, None)).await?;
        assert_eq!(created.available_quantity, 3);
        assert_eq!(created.isbn, None);

        let updated = library
            .update_book(
                &admin,
                UpdateBookDto {
                    id: created.id,
                    form: form("Dune (2nd ed.)", 4, Some(2)),
                },
            )
            .await?;
        assert_eq!(updated.title, "Dune (2nd ed.)");
        assert_eq!(updated.available_quantity, 2);

        let listed = library.list_books(&admin, Some(String::from("2nd"))).await?;
        assert_eq!(listed, vec![updated]);

        library
            .delete_book(&admin, DeleteBookDto { id: created.id })
            .await?;
        assert!(library.list_books(&admin, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn stock_beyond_total_is_rejected_locally() {
        let library = Library::default();
        let admin = library.sign_up("Admin", Role::Admin);
        let refused = library
            .create_book(&admin, form("Dune", 2, Some(3)))
            .await
            .unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Validation);
        assert_eq!(
            refused.downcast_ref::<Rejection>(),
            Some(&Rejection::InvalidQuantity)
        );
    }

    #[tokio::test]
    async fn students_cannot_manage() {
        let library = Library::default();
        let student = library.sign_up("Amina", Role::Student);
        let refused = library
            .create_book(&student, form("Dune", 1, None))
            .await
            .unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);
        let refused = library.list_users(&student).await.unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);
    }

    #[tokio::test]
    async fn user_management() -> error_stack::Result<(), KernelError> {
        let library = Library::default();
        let admin = library.sign_up("Admin", Role::Admin);

        let created = library
            .create_user(
                &admin,
                CreateUserDto {
                    name: String::from("Bruno"),
                    email: String::from("bruno@univ.example"),
                    password: String::from("correct horse"),
                    role: Role::Student,
                    student_number: Some(String::from("S-2048")),
                },
            )
            .await?;
        assert_eq!(created.profile.student_number.as_deref(), Some("S-2048"));

        let promoted = library
            .update_user(
                &admin,
                UpdateUserDto {
                    id: created.id,
                    name: None,
                    role: Some(Role::Admin),
                    is_active: Some(false),
                    phone: None,
                    department: None,
                    bio: None,
                },
            )
            .await?;
        assert_eq!(promoted.role, Role::Admin);
        assert!(!promoted.is_active);
        assert_eq!(library.list_users(&admin).await?.len(), 2);

        library
            .delete_user(&admin, DeleteUserDto { id: created.id })
            .await?;
        let me = *admin.user()?.id().as_ref();
        let refused = library
            .delete_user(&admin, DeleteUserDto { id: me })
            .await
            .unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);
        assert_eq!(library.list_users(&admin).await?.len(), 1);
        Ok(())
    }
}
