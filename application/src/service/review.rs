use time::OffsetDateTime;

use kernel::interface::command::ReviewDraft;
use kernel::interface::query::{
    BorrowingQuery, DependOnBorrowingQuery, DependOnReviewQuery, ReviewQuery,
};
use kernel::interface::update::{DependOnReviewModifier, ReviewModifier};
use kernel::prelude::eligibility::ReviewEligibility;
use kernel::prelude::entity::{BookId, Session};
use kernel::KernelError;

use crate::transfer::{CreateReviewDto, ReviewDto};

#[async_trait::async_trait]
pub trait CreateReviewService:
    'static + Sync + Send + DependOnBorrowingQuery + DependOnReviewQuery + DependOnReviewModifier
{
    /// Rating range and eligibility are checked here first; the backend has the
    /// final word.
    async fn create_review(
        &self,
        session: &Session,
        dto: CreateReviewDto,
    ) -> error_stack::Result<ReviewDto, KernelError> {
        let user = session.user()?;
        let draft = ReviewDraft::new(BookId::new(dto.book_id), dto.rating, dto.comment)?;

        let (mine, reviews) = tokio::join!(
            self.borrowing_query().find_mine(session),
            self.review_query().find_by_book_id(session, &draft.book_id)
        );
        ReviewEligibility::compute(user.id(), &mine?, &reviews?).check(&draft.book_id)?;

        let review = self.review_modifier().create(session, &draft).await?;
        tracing::info!(
            "review {:?} posted for book {:?} at {}",
            review.id(),
            draft.book_id,
            OffsetDateTime::now_utc()
        );
        Ok(ReviewDto::from(review))
    }
}

impl<T> CreateReviewService for T where
    T: DependOnBorrowingQuery + DependOnReviewQuery + DependOnReviewModifier
{
}
