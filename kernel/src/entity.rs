mod book;
mod borrowing;
mod common;
mod review;
mod session;
mod user;

pub use self::{book::*, borrowing::*, common::*, review::*, session::*, user::*};

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;
    use time::{Duration, OffsetDateTime};

    pub(crate) fn book(id: i64, title: &str, author: &str, genre: &str, available: i32) -> Book {
        Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new(author),
            Some(Isbn::new(format!("978-0-00-{id:06}"))),
            Some(Genre::new(genre)),
            None,
            BookQuantity::new(available.max(1)),
            BookQuantity::new(available),
            Some(PublicationYear::new(1965)),
            None,
        )
    }

    pub(crate) fn borrowing(id: i64, user: i64, book: i64, due: OffsetDateTime) -> Borrowing {
        Borrowing::new(
            BorrowingId::new(id),
            UserId::new(user),
            BookId::new(book),
            None,
            BorrowedAt::new(due - Duration::days(15)),
            DueDate::new(due),
            None,
            RenewalCount::default(),
            None,
        )
    }
}
