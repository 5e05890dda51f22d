use crate::command::ReviewDraft;
use crate::entity::{Review, Session};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewModifier: 'static + Sync + Send {
    async fn create(
        &self,
        session: &Session,
        review: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError>;
}

pub trait DependOnReviewModifier: 'static + Sync + Send {
    type ReviewModifier: ReviewModifier;
    fn review_modifier(&self) -> &Self::ReviewModifier;
}
