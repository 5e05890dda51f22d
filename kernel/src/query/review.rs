use crate::entity::{BookId, Review, Session};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewQuery: Sync + Send + 'static {
    async fn find_by_book_id(
        &self,
        session: &Session,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError>;
}

pub trait DependOnReviewQuery: Sync + Send + 'static {
    type ReviewQuery: ReviewQuery;
    fn review_query(&self) -> &Self::ReviewQuery;
}
