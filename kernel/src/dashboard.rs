use std::collections::HashMap;
use std::sync::RwLock;

use error_stack::Report;
use serde::Serialize;
use time::OffsetDateTime;

use crate::entity::{Book, BookId, BookTitle, Borrowing, BorrowingStatus, User};
use crate::KernelError;

/// Where a dashboard figure came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Fetched,
    Cached,
    Default,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Figures<T> {
    pub source: Source,
    #[serde(flatten)]
    pub value: T,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct BookFigures {
    pub total_books: i64,
    pub total_copies: i64,
    pub available_copies: i64,
}

impl BookFigures {
    pub fn from_books(books: &[Book]) -> Self {
        Self {
            total_books: books.len() as i64,
            total_copies: books
                .iter()
                .map(|book| i64::from(*book.total_quantity().as_ref()))
                .sum(),
            available_copies: books
                .iter()
                .map(|book| i64::from(*book.available_quantity().as_ref()))
                .sum(),
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct UserFigures {
    pub total_users: i64,
    pub active_users: i64,
    pub admins: i64,
}

impl UserFigures {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total_users: users.len() as i64,
            active_users: users
                .iter()
                .filter(|user| *user.is_active().as_ref())
                .count() as i64,
            admins: users.iter().filter(|user| user.is_admin()).count() as i64,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PopularBook {
    pub book_id: BookId,
    pub title: Option<BookTitle>,
    pub borrow_count: i64,
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct BorrowingFigures {
    pub total_borrowings: i64,
    pub active_borrowings: i64,
    pub overdue_borrowings: i64,
    pub returned_borrowings: i64,
    pub most_borrowed: Vec<PopularBook>,
}

impl BorrowingFigures {
    pub const POPULAR_LIMIT: usize = 5;

    pub fn from_borrowings(borrowings: &[Borrowing], now: OffsetDateTime) -> Self {
        let mut figures = Self {
            total_borrowings: borrowings.len() as i64,
            ..Self::default()
        };
        let mut per_book: HashMap<BookId, PopularBook> = HashMap::new();
        for borrowing in borrowings {
            match borrowing.status_at(now) {
                BorrowingStatus::Active => figures.active_borrowings += 1,
                BorrowingStatus::Overdue => figures.overdue_borrowings += 1,
                BorrowingStatus::Returned => figures.returned_borrowings += 1,
            }
            let entry = per_book
                .entry(*borrowing.book_id())
                .or_insert_with(|| PopularBook {
                    book_id: *borrowing.book_id(),
                    title: None,
                    borrow_count: 0,
                });
            entry.borrow_count += 1;
            if entry.title.is_none() {
                entry.title = borrowing.book_title().clone();
            }
        }
        let mut popular = per_book.into_values().collect::<Vec<_>>();
        popular.sort_by(|a, b| {
            b.borrow_count
                .cmp(&a.borrow_count)
                .then_with(|| a.book_id.cmp(&b.book_id))
        });
        popular.truncate(Self::POPULAR_LIMIT);
        figures.most_borrowed = popular;
        figures
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DashboardStats {
    pub books: Figures<BookFigures>,
    pub users: Figures<UserFigures>,
    pub borrowings: Figures<BorrowingFigures>,
}

/// Last figures fetched successfully, used when a later fetch fails.
#[derive(Debug, Default)]
pub struct DashboardCache {
    books: RwLock<Option<BookFigures>>,
    users: RwLock<Option<UserFigures>>,
    borrowings: RwLock<Option<BorrowingFigures>>,
}

impl DashboardCache {
    pub fn resolve_books(
        &self,
        fetched: error_stack::Result<BookFigures, KernelError>,
    ) -> Figures<BookFigures> {
        resolve("books", &self.books, fetched)
    }

    pub fn resolve_users(
        &self,
        fetched: error_stack::Result<UserFigures, KernelError>,
    ) -> Figures<UserFigures> {
        resolve("users", &self.users, fetched)
    }

    pub fn resolve_borrowings(
        &self,
        fetched: error_stack::Result<BorrowingFigures, KernelError>,
    ) -> Figures<BorrowingFigures> {
        resolve("borrowings", &self.borrowings, fetched)
    }
}

pub trait DependOnDashboardCache: Sync + Send + 'static {
    fn dashboard_cache(&self) -> &DashboardCache;
}

fn resolve<T: Clone + Default>(
    name: &str,
    slot: &RwLock<Option<T>>,
    fetched: Result<T, Report<KernelError>>,
) -> Figures<T> {
    match fetched {
        Ok(value) => {
            if let Ok(mut cached) = slot.write() {
                *cached = Some(value.clone());
            }
            Figures {
                source: Source::Fetched,
                value,
            }
        }
        Err(report) => {
            tracing::warn!("dashboard {name} unavailable, falling back: {report:?}");
            let cached = slot.read().ok().and_then(|cached| cached.clone());
            match cached {
                Some(value) => Figures {
                    source: Source::Cached,
                    value,
                },
                None => Figures {
                    source: Source::Default,
                    value: T::default(),
                },
            }
        }
    }
}
