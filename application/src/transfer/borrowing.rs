use std::collections::BTreeMap;

use time::OffsetDateTime;

use kernel::prelude::entity::{Borrowing, BorrowingStatus};

/// A borrowing as shown to its holder, with every figure derived at `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowingDto {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub book_title: Option<String>,
    pub borrowed_at: OffsetDateTime,
    pub due_date: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub renewal_count: i32,
    pub notes: Option<String>,
    pub status: BorrowingStatus,
    pub days_overdue: i64,
    pub due_soon: bool,
    pub can_renew: bool,
    pub remaining_renewals: i32,
    pub can_review: bool,
}

impl BorrowingDto {
    pub fn at(borrowing: &Borrowing, now: OffsetDateTime, can_review: bool) -> Self {
        Self {
            id: *borrowing.id().as_ref(),
            user_id: *borrowing.user_id().as_ref(),
            book_id: *borrowing.book_id().as_ref(),
            book_title: borrowing
                .book_title()
                .as_ref()
                .map(|title| title.as_ref().clone()),
            borrowed_at: *borrowing.borrowed_at().as_ref(),
            due_date: *borrowing.due_date().as_ref(),
            returned_at: borrowing.returned_at().as_ref().map(|at| *at.as_ref()),
            renewal_count: *borrowing.renewal_count().as_ref(),
            notes: borrowing.notes().as_ref().map(|note| note.as_ref().clone()),
            status: borrowing.status_at(now),
            days_overdue: borrowing.days_overdue_at(now),
            due_soon: borrowing.is_due_soon_at(now),
            can_renew: borrowing.can_renew_at(now),
            remaining_renewals: borrowing.remaining_renewals(),
            can_review,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MyBorrowingsDto {
    pub borrowings: Vec<BorrowingDto>,
    pub active: usize,
    pub overdue: usize,
    pub returned: usize,
    /// Books the user may still review, keyed by book id.
    pub review_eligibility: BTreeMap<i64, bool>,
}

impl MyBorrowingsDto {
    pub fn new(borrowings: Vec<BorrowingDto>, review_eligibility: BTreeMap<i64, bool>) -> Self {
        let count = |status: BorrowingStatus| {
            borrowings
                .iter()
                .filter(|borrowing| borrowing.status == status)
                .count()
        };
        Self {
            active: count(BorrowingStatus::Active),
            overdue: count(BorrowingStatus::Overdue),
            returned: count(BorrowingStatus::Returned),
            borrowings,
            review_eligibility,
        }
    }
}

/// Borrow form. Dates are `YYYY-MM-DD` strings as typed by the user.
pub struct CreateBorrowingDto {
    pub book_id: i64,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub comment: Option<String>,
}

pub struct RenewBorrowingDto {
    pub id: i64,
    pub new_due_date: Option<String>,
}

pub struct ReturnBorrowingDto {
    pub id: i64,
    pub notes: Option<String>,
}
