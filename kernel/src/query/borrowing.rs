use crate::entity::{Borrowing, Session, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BorrowingQuery: Sync + Send + 'static {
    /// Every borrowing known to the backend; administrators only.
    async fn find_all(&self, session: &Session)
        -> error_stack::Result<Vec<Borrowing>, KernelError>;
    async fn find_mine(&self, session: &Session)
        -> error_stack::Result<Vec<Borrowing>, KernelError>;
    async fn find_by_user_id(
        &self,
        session: &Session,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError>;
}

pub trait DependOnBorrowingQuery: Sync + Send + 'static {
    type BorrowingQuery: BorrowingQuery;
    fn borrowing_query(&self) -> &Self::BorrowingQuery;
}
