use std::sync::atomic::{AtomicBool, Ordering};

use error_stack::Report;
use time::OffsetDateTime;

use driver::gateway::InMemoryGateway;
use kernel::interface::auth::DependOnAuthenticator;
use kernel::interface::command::BookDraft;
use kernel::interface::query::{
    DependOnBookQuery, DependOnBorrowingQuery, DependOnReviewQuery, DependOnUserQuery, UserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnBorrowingModifier, DependOnReviewModifier, DependOnUserModifier,
};
use kernel::prelude::dashboard::{DashboardCache, DependOnDashboardCache};
use kernel::prelude::entity::{
    Book, BookAuthor, BookQuantity, BookTitle, Borrowing, Genre, Role, Session, User, UserId,
    UserStats,
};
use kernel::KernelError;

/// Services wired to the in-memory backend. The user directory can be taken
/// offline to exercise degraded pages.
#[derive(Default)]
pub struct Library {
    pub gateway: InMemoryGateway,
    cache: DashboardCache,
    users_down: AtomicBool,
}

impl Library {
    pub fn take_users_offline(&self) {
        self.users_down.store(true, Ordering::SeqCst);
    }

    pub fn book(&self, title: &str, author: &str, genre: &str, copies: i32) -> Book {
        self.gateway
            .seed_book(BookDraft {
                title: BookTitle::new(title),
                author: BookAuthor::new(author),
                isbn: None,
                genre: Some(Genre::new(genre)),
                description: None,
                total_quantity: BookQuantity::new(copies),
                available_quantity: BookQuantity::new(copies),
                publication_year: None,
                cover_image: None,
            })
            .unwrap()
    }

    pub fn sign_up(&self, name: &str, role: Role) -> Session {
        let email = format!("{}@univ.example", name.to_lowercase());
        let user = self
            .gateway
            .seed_user(name, &email, "correct horse", role)
            .unwrap();
        self.gateway.sign_in(user.id()).unwrap()
    }

    pub fn loan(&self, session: &Session, book: &Book, due: OffsetDateTime) -> Borrowing {
        let now = OffsetDateTime::now_utc();
        let borrowed_at = now.min(due) - time::Duration::days(15);
        self.gateway
            .seed_borrowing(session.user().unwrap().id(), book.id(), borrowed_at, due)
            .unwrap()
    }

    fn users_reachable(&self) -> error_stack::Result<(), KernelError> {
        if self.users_down.load(Ordering::SeqCst) {
            return Err(Report::new(KernelError::Timeout).attach_printable("user directory down"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserQuery for Library {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<User>, KernelError> {
        self.users_reachable()?;
        self.gateway.find_all(session).await
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        self.users_reachable()?;
        self.gateway.find_by_id(session, id).await
    }

    async fn stats(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<UserStats, KernelError> {
        self.users_reachable()?;
        self.gateway.stats(session, id).await
    }
}

impl DependOnUserQuery for Library {
    type UserQuery = Self;
    fn user_query(&self) -> &Self::UserQuery {
        self
    }
}

impl DependOnDashboardCache for Library {
    fn dashboard_cache(&self) -> &DashboardCache {
        &self.cache
    }
}

macro_rules! delegate {
    ($($depend:ident :: $assoc:ident => $getter:ident),* $(,)?) => {
        $(
            impl $depend for Library {
                type $assoc = InMemoryGateway;
                fn $getter(&self) -> &Self::$assoc {
                    &self.gateway
                }
            }
        )*
    };
}

delegate! {
    DependOnBookQuery::BookQuery => book_query,
    DependOnBorrowingQuery::BorrowingQuery => borrowing_query,
    DependOnReviewQuery::ReviewQuery => review_query,
    DependOnBookModifier::BookModifier => book_modifier,
    DependOnBorrowingModifier::BorrowingModifier => borrowing_modifier,
    DependOnReviewModifier::ReviewModifier => review_modifier,
    DependOnUserModifier::UserModifier => user_modifier,
    DependOnAuthenticator::Authenticator => authenticator,
}
