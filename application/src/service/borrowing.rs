use std::collections::{BTreeMap, BTreeSet};

use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::command::BorrowingDraft;
use kernel::interface::event::BorrowingEvent;
use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnReviewQuery,
    ReviewQuery,
};
use kernel::interface::update::{BorrowingModifier, DependOnBorrowingModifier};
use kernel::prelude::eligibility::ReviewEligibility;
use kernel::prelude::entity::{
    parse_date, BookId, Borrowing, BorrowingId, BorrowingNote, DueDate, Session,
};
use kernel::{KernelError, Rejection};

use crate::transfer::{
    BorrowingDto, CreateBorrowingDto, MyBorrowingsDto, RenewBorrowingDto, ReturnBorrowingDto,
};

#[async_trait::async_trait]
pub trait BorrowBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBorrowingModifier
{
    /// Checks the form and the current stock, then asks the backend for a copy.
    /// The backend still decides when two requests race for the last copy.
    async fn borrow_book(
        &self,
        session: &Session,
        dto: CreateBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        session.user()?;
        let now = OffsetDateTime::now_utc();
        let start_date = optional_date("start_date", dto.start_date.as_deref())?;
        let due_date = optional_date("due_date", dto.due_date.as_deref())?;
        let draft = BorrowingDraft::new(
            BookId::new(dto.book_id),
            start_date,
            due_date,
            dto.comment,
            now.date(),
        )?;

        let book = self
            .book_query()
            .find_by_id(session, &draft.book_id)
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        if !book.is_available() {
            return Err(Rejection::NoCopyAvailable.into_report());
        }

        let borrowing = self.borrowing_modifier().create(session, &draft).await?;
        tracing::info!(
            "book {:?} borrowed as {:?}, due {:?}",
            draft.book_id,
            borrowing.id(),
            borrowing.due_date()
        );
        Ok(BorrowingDto::at(&borrowing, now, false))
    }
}

impl<T> BorrowBookService for T where T: DependOnBookQuery + DependOnBorrowingModifier {}

#[async_trait::async_trait]
pub trait GetMyBorrowingsService:
    'static + Sync + Send + DependOnBorrowingQuery + DependOnReviewQuery
{
    async fn get_my_borrowings(
        &self,
        session: &Session,
    ) -> error_stack::Result<MyBorrowingsDto, KernelError> {
        let user = session.user()?;
        let now = OffsetDateTime::now_utc();
        let mut borrowings = self.borrowing_query().find_mine(session).await?;
        borrowings.sort_by(|a, b| b.borrowed_at().as_ref().cmp(a.borrowed_at().as_ref()));

        let returned = borrowings
            .iter()
            .filter(|borrowing| borrowing.is_returned())
            .map(|borrowing| *borrowing.book_id())
            .collect::<BTreeSet<_>>();
        let mut reviews = Vec::new();
        for book_id in &returned {
            reviews.extend(self.review_query().find_by_book_id(session, book_id).await?);
        }
        let eligibility = ReviewEligibility::compute(user.id(), &borrowings, &reviews);

        let views = borrowings
            .iter()
            .map(|borrowing| {
                let can_review = eligibility.can_review(borrowing.book_id());
                BorrowingDto::at(borrowing, now, can_review)
            })
            .collect();
        let flags = eligibility
            .as_flags()
            .into_iter()
            .map(|(book_id, flag)| (*book_id.as_ref(), flag))
            .collect::<BTreeMap<_, _>>();
        Ok(MyBorrowingsDto::new(views, flags))
    }
}

impl<T> GetMyBorrowingsService for T where T: DependOnBorrowingQuery + DependOnReviewQuery {}

#[async_trait::async_trait]
pub trait RenewBorrowingService:
    'static + Sync + Send + DependOnBorrowingQuery + DependOnBorrowingModifier
{
    /// Refused locally when the loan is overdue, returned or out of renewals;
    /// such refusals are final and never retried.
    async fn renew_borrowing(
        &self,
        session: &Session,
        dto: RenewBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let now = OffsetDateTime::now_utc();
        let borrowing = owned_borrowing(self, session, dto.id).await?;
        let requested = optional_date("new_due_date", dto.new_due_date.as_deref())?
            .map(|date| DueDate::new(date.with_time(now.time()).assume_utc()));
        let BorrowingEvent::Renewed { due_date } = borrowing.renew_at(now, requested)? else {
            return Err(Report::new(KernelError::Internal)
                .attach_printable("renewal produced an unexpected event"));
        };

        let renewed = self
            .borrowing_modifier()
            .renew(session, borrowing.id(), &due_date)
            .await?;
        tracing::info!(
            "borrowing {:?} renewed until {:?} ({} left)",
            renewed.id(),
            renewed.due_date(),
            renewed.remaining_renewals()
        );
        Ok(BorrowingDto::at(&renewed, now, false))
    }
}

impl<T> RenewBorrowingService for T where T: DependOnBorrowingQuery + DependOnBorrowingModifier {}

#[async_trait::async_trait]
pub trait ReturnBorrowingService:
    'static + Sync + Send + DependOnBorrowingQuery + DependOnBorrowingModifier + DependOnReviewQuery
{
    async fn return_borrowing(
        &self,
        session: &Session,
        dto: ReturnBorrowingDto,
    ) -> error_stack::Result<BorrowingDto, KernelError> {
        let user = session.user()?;
        let now = OffsetDateTime::now_utc();
        let borrowing = owned_borrowing(self, session, dto.id).await?;
        let notes = dto
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty())
            .map(BorrowingNote::new);
        borrowing.return_at(now, notes.clone())?;

        let returned = self
            .borrowing_modifier()
            .return_book(session, borrowing.id(), notes.as_ref())
            .await?;
        tracing::info!("borrowing {:?} returned", returned.id());

        // An earlier loan of the same book may already carry a review.
        let reviews = self
            .review_query()
            .find_by_book_id(session, returned.book_id())
            .await?;
        let can_review =
            ReviewEligibility::compute(user.id(), std::slice::from_ref(&returned), &reviews)
                .can_review(returned.book_id());
        Ok(BorrowingDto::at(&returned, now, can_review))
    }
}

impl<T> ReturnBorrowingService for T where
    T: DependOnBorrowingQuery + DependOnBorrowingModifier + DependOnReviewQuery
{
}

/// The caller's borrowing with the given id, as currently known by the backend.
async fn owned_borrowing<T: DependOnBorrowingQuery + ?Sized>(
    service: &T,
    session: &Session,
    id: i64,
) -> error_stack::Result<Borrowing, KernelError> {
    session.user()?;
    let id = BorrowingId::new(id);
    service
        .borrowing_query()
        .find_mine(session)
        .await?
        .into_iter()
        .find(|borrowing| borrowing.id() == &id)
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("borrowing {id:?} is not held by the caller"))
        })
}

fn optional_date(
    field: &'static str,
    value: Option<&str>,
) -> error_stack::Result<Option<time::Date>, KernelError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_date(field, value).map(Some),
        None => Ok(None),
    }
}
