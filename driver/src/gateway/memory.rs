mod auth;
mod book;
mod borrowing;
mod review;
mod user;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use base64::Engine;
use error_stack::Report;
use rand::Rng;
use time::macros::time;
use time::{Date, OffsetDateTime};

use kernel::interface::command::BookDraft;
use kernel::prelude::entity::{
    AccessToken, Book, BookId, BorrowedAt, Borrowing, BorrowingId, BorrowingNote, DueDate, Email,
    IsActive, RenewalCount, Review, Role, Session, User, UserId, UserName, UserPreferences, UserProfile,
};
use kernel::{KernelError, Rejection};

/// In-process stand-in for the library REST API.
///
/// Every record sits behind a single mutex and each call works on it in one
/// critical section, so concurrent borrows of the last copy are decided here
/// exactly like the real backend decides them.
#[derive(Default)]
pub struct InMemoryGateway {
    store: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    books: BTreeMap<BookId, Book>,
    accounts: BTreeMap<UserId, Account>,
    borrowings: BTreeMap<BorrowingId, Borrowing>,
    reviews: Vec<Review>,
    tokens: HashMap<String, UserId>,
    sequence: i64,
}

struct Account {
    user: User,
    password: String,
}

impl InMemoryGateway {
    fn lock(&self) -> error_stack::Result<MutexGuard<'_, Store>, KernelError> {
        self.store.lock().map_err(|_| {
            Report::new(KernelError::Internal).attach_printable("in-memory store is poisoned")
        })
    }

    pub fn seed_book(&self, draft: BookDraft) -> error_stack::Result<Book, KernelError> {
        let draft = draft.validate()?;
        let mut store = self.lock()?;
        let id = BookId::new(store.next_id());
        let book = book::from_draft(id, draft);
        store.books.insert(id, book.clone());
        Ok(book)
    }

    pub fn seed_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> error_stack::Result<User, KernelError> {
        let mut store = self.lock()?;
        store.open_account(
            UserName::new(name),
            Email::new(email),
            password,
            role,
            UserProfile::default(),
        )
    }

    /// Hands out a fresh token for `user_id`, as a successful login would.
    pub fn sign_in(&self, user_id: &UserId) -> error_stack::Result<Session, KernelError> {
        let mut store = self.lock()?;
        let user = store
            .accounts
            .get(user_id)
            .map(|account| account.user.clone())
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        let token = store.issue(*user_id);
        Ok(Session::authenticated(token, user))
    }

    /// Records a borrowing with arbitrary dates, taking one copy out of stock.
    pub fn seed_borrowing(
        &self,
        user_id: &UserId,
        book_id: &BookId,
        borrowed_at: OffsetDateTime,
        due_date: OffsetDateTime,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let mut store = self.lock()?;
        store.check_out(
            *user_id,
            *book_id,
            BorrowedAt::new(borrowed_at),
            DueDate::new(due_date),
            None,
        )
    }

    pub fn book(&self, id: &BookId) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(self.lock()?.books.get(id).cloned())
    }
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    fn issue(&mut self, user_id: UserId) -> AccessToken {
        let mut buf = [0u8; 32];
        rand::rngs::OsRng.fill(&mut buf);
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf);
        self.tokens.insert(token.clone(), user_id);
        AccessToken::new(token)
    }

    /// The active user behind the session's token.
    fn caller(&self, session: &Session) -> error_stack::Result<&User, KernelError> {
        let token = session.token()?;
        self.tokens
            .get(token.as_ref().as_str())
            .and_then(|id| self.accounts.get(id))
            .map(|account| &account.user)
            .filter(|user| *user.is_active().as_ref())
            .ok_or_else(|| {
                Report::new(KernelError::Unauthenticated)
                    .attach_printable("unknown, revoked or deactivated token")
            })
    }

    fn admin(&self, session: &Session) -> error_stack::Result<&User, KernelError> {
        let user = self.caller(session)?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(Report::new(KernelError::Forbidden))
        }
    }

    fn self_or_admin(
        &self,
        session: &Session,
        id: &UserId,
    ) -> error_stack::Result<&User, KernelError> {
        let user = self.caller(session)?;
        if user.id() == id || user.is_admin() {
            Ok(user)
        } else {
            Err(Report::new(KernelError::Forbidden))
        }
    }

    fn open_account(
        &mut self,
        name: UserName,
        email: Email,
        password: &str,
        role: Role,
        profile: UserProfile,
    ) -> error_stack::Result<User, KernelError> {
        if self
            .accounts
            .values()
            .any(|account| account.user.email() == &email)
        {
            return Err(Rejection::EmailTaken.into_report());
        }
        let user = User::new(
            UserId::new(self.next_id()),
            name,
            email,
            role,
            IsActive::default(),
            profile,
            UserPreferences::default(),
        );
        self.accounts.insert(
            *user.id(),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        Ok(user)
    }

    fn check_out(
        &mut self,
        user_id: UserId,
        book_id: BookId,
        borrowed_at: BorrowedAt,
        due_date: DueDate,
        notes: Option<BorrowingNote>,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let id = BorrowingId::new(self.next_id());
        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        book.check_out()?;
        let borrowing = Borrowing::new(
            id,
            user_id,
            book_id,
            Some(book.title().clone()),
            borrowed_at,
            due_date,
            None,
            RenewalCount::default(),
            notes,
        );
        self.borrowings.insert(id, borrowing.clone());
        tracing::info!("book {book_id:?} checked out by {user_id:?} as {id:?}");
        Ok(borrowing)
    }

    fn borrowing_of(
        &mut self,
        caller: &User,
        id: &BorrowingId,
    ) -> error_stack::Result<&mut Borrowing, KernelError> {
        let borrowing = self
            .borrowings
            .get_mut(id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if borrowing.user_id() != caller.id() && !caller.is_admin() {
            return Err(Report::new(KernelError::Forbidden));
        }
        Ok(borrowing)
    }
}

/// Loans start at the moment of the request when they start today, otherwise
/// at midnight of the chosen day, and run until the end of the due day.
fn loan_bounds(start: Date, due: Date, now: OffsetDateTime) -> (BorrowedAt, DueDate) {
    let borrowed_at = if start <= now.date() {
        now
    } else {
        start.midnight().assume_utc()
    };
    (
        BorrowedAt::new(borrowed_at),
        DueDate::new(due.with_time(time!(23:59:59)).assume_utc()),
    )
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;
    use kernel::prelude::entity::{BookAuthor, BookQuantity, BookTitle, Genre};

    pub fn draft(title: &str, author: &str, genre: &str, copies: i32) -> BookDraft {
        BookDraft {
            title: BookTitle::new(title),
            author: BookAuthor::new(author),
            isbn: None,
            genre: Some(Genre::new(genre)),
            description: None,
            total_quantity: BookQuantity::new(copies),
            available_quantity: BookQuantity::new(copies),
            publication_year: None,
            cover_image: None,
        }
    }

    pub fn student(gateway: &InMemoryGateway, name: &str) -> Session {
        let email = format!("{}@univ.example", name.to_lowercase());
        let user = gateway
            .seed_user(name, &email, "correct horse", Role::Student)
            .unwrap();
        gateway.sign_in(user.id()).unwrap()
    }

    pub fn admin(gateway: &InMemoryGateway) -> Session {
        let user = gateway
            .seed_user("Admin", "admin@univ.example", "correct horse", Role::Admin)
            .unwrap();
        gateway.sign_in(user.id()).unwrap()
    }
}

#[cfg(test)]
mod test {
    use super::fixture::*;
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn tokens_are_unique_and_resolve() {
        let gateway = InMemoryGateway::default();
        let first = student(&gateway, "Amina");
        let second = gateway.sign_in(first.user().unwrap().id()).unwrap();
        assert_ne!(first.token().unwrap(), second.token().unwrap());
        let store = gateway.lock().unwrap();
        assert_eq!(store.caller(&second).unwrap().id(), first.user().unwrap().id());
    }

    #[test]
    fn forged_session_is_unauthenticated() {
        let gateway = InMemoryGateway::default();
        let real = student(&gateway, "Amina");
        let forged = Session::authenticated(
            AccessToken::new("not-issued"),
            real.user().unwrap().clone(),
        );
        let store = gateway.lock().unwrap();
        assert_eq!(
            *store.caller(&forged).unwrap_err().current_context(),
            KernelError::Unauthenticated
        );
    }

    #[test]
    fn loans_run_to_the_end_of_the_due_day() {
        let now = datetime!(2024-03-01 10:00 UTC);
        let (borrowed_at, due) = loan_bounds(date!(2024 - 03 - 01), date!(2024 - 03 - 16), now);
        assert_eq!(*borrowed_at.as_ref(), now);
        assert_eq!(*due.as_ref(), datetime!(2024-03-16 23:59:59 UTC));

        let (later, _) = loan_bounds(date!(2024 - 03 - 04), date!(2024 - 03 - 16), now);
        assert_eq!(*later.as_ref(), datetime!(2024-03-04 0:00 UTC));
    }
}
