use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::command::ReviewDraft;
use kernel::interface::query::{DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{DependOnReviewModifier, ReviewModifier};
use kernel::prelude::eligibility::ReviewEligibility;
use kernel::prelude::entity::{
    BookId, CreatedAt, IsApproved, Review, ReviewId, Session,
};
use kernel::KernelError;

use crate::gateway::InMemoryGateway;

#[async_trait::async_trait]
impl ReviewQuery for InMemoryGateway {
    async fn find_by_book_id(
        &self,
        _session: &Session,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let store = self.lock()?;
        Ok(store
            .reviews
            .iter()
            .filter(|review| review.book_id() == book_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ReviewModifier for InMemoryGateway {
    /// Same gate as the backend: a returned borrowing of the book and no
    /// earlier review by the same user.
    async fn create(
        &self,
        session: &Session,
        review: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError> {
        let mut store = self.lock()?;
        let caller = store.caller(session)?.clone();
        if !store.books.contains_key(&review.book_id) {
            return Err(Report::new(KernelError::NotFound));
        }
        let borrowings = store.borrowings.values().cloned().collect::<Vec<_>>();
        ReviewEligibility::compute(caller.id(), &borrowings, &store.reviews)
            .check(&review.book_id)?;

        let created = Review::new(
            ReviewId::new(store.next_id()),
            *caller.id(),
            Some(caller.name().clone()),
            review.book_id,
            review.rating,
            review.comment.clone(),
            IsApproved::new(true),
            CreatedAt::new(OffsetDateTime::now_utc()),
        );
        store.reviews.push(created.clone());
        Ok(created)
    }
}

impl DependOnReviewQuery for InMemoryGateway {
    type ReviewQuery = Self;
    fn review_query(&self) -> &Self::ReviewQuery {
        self
    }
}

impl DependOnReviewModifier for InMemoryGateway {
    type ReviewModifier = Self;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        self
    }
}
