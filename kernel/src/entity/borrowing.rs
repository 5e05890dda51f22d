mod id;
mod note;
mod period;
mod renewal;
mod returned_at;
mod status;

pub use self::{id::*, note::*, period::*, renewal::*, returned_at::*, status::*};
use crate::entity::{BookId, BookTitle, UserId};
use crate::event::BorrowingEvent;
use crate::policy::{days_past, renewed_due_date, DUE_SOON_WINDOW, MAX_RENEWALS};
use crate::{KernelError, Rejection};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::References;

/// One user holding one copy of one book.
///
/// The overdue state is never stored: it is derived from `due_date` and
/// `returned_at` at the instant the caller supplies.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure, Mutation)]
pub struct Borrowing {
    id: BorrowingId,
    user_id: UserId,
    book_id: BookId,
    book_title: Option<BookTitle>,
    borrowed_at: BorrowedAt,
    due_date: DueDate,
    returned_at: Option<ReturnedAt>,
    renewal_count: RenewalCount,
    notes: Option<BorrowingNote>,
}

impl Borrowing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BorrowingId,
        user_id: UserId,
        book_id: BookId,
        book_title: Option<BookTitle>,
        borrowed_at: BorrowedAt,
        due_date: DueDate,
        returned_at: Option<ReturnedAt>,
        renewal_count: RenewalCount,
        notes: Option<BorrowingNote>,
    ) -> Self {
        Self {
            id,
            user_id,
            book_id,
            book_title,
            borrowed_at,
            due_date,
            returned_at,
            renewal_count,
            notes,
        }
    }

    pub fn status_at(&self, now: OffsetDateTime) -> BorrowingStatus {
        if self.returned_at.is_some() {
            BorrowingStatus::Returned
        } else if *self.due_date.as_ref() < now {
            BorrowingStatus::Overdue
        } else {
            BorrowingStatus::Active
        }
    }

    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    pub fn days_overdue_at(&self, now: OffsetDateTime) -> i64 {
        match self.status_at(now) {
            BorrowingStatus::Overdue => days_past(*self.due_date.as_ref(), now),
            _ => 0,
        }
    }

    pub fn is_due_soon_at(&self, now: OffsetDateTime) -> bool {
        self.status_at(now) == BorrowingStatus::Active
            && *self.due_date.as_ref() - now <= DUE_SOON_WINDOW
    }

    pub fn remaining_renewals(&self) -> i32 {
        (MAX_RENEWALS - *self.renewal_count.as_ref()).max(0)
    }

    pub fn can_renew_at(&self, now: OffsetDateTime) -> bool {
        self.renew_at(now, None).is_ok()
    }

    /// Validates a renewal and yields the event extending the loan.
    ///
    /// Without an explicit date the policy date (now + renewal period) is used;
    /// a requested date must lie after the current due date and not beyond it.
    pub fn renew_at(
        &self,
        now: OffsetDateTime,
        requested: Option<DueDate>,
    ) -> error_stack::Result<BorrowingEvent, KernelError> {
        match self.status_at(now) {
            BorrowingStatus::Returned => return Err(Rejection::AlreadyReturned.into_report()),
            BorrowingStatus::Overdue => return Err(Rejection::RenewOverdue.into_report()),
            BorrowingStatus::Active => {}
        }
        if *self.renewal_count.as_ref() >= MAX_RENEWALS {
            return Err(Rejection::RenewalLimitReached.into_report());
        }
        let ceiling = DueDate::new(renewed_due_date(now));
        let due_date = match requested {
            None => ceiling,
            Some(requested) if requested > self.due_date && requested <= ceiling => requested,
            Some(_) => return Err(Rejection::InvalidRenewalDate.into_report()),
        };
        Ok(BorrowingEvent::Renewed { due_date })
    }

    pub fn return_at(
        &self,
        now: OffsetDateTime,
        notes: Option<BorrowingNote>,
    ) -> error_stack::Result<BorrowingEvent, KernelError> {
        if self.is_returned() {
            return Err(Rejection::AlreadyReturned.into_report());
        }
        Ok(BorrowingEvent::Returned {
            returned_at: ReturnedAt::new(now),
            notes,
        })
    }
}
