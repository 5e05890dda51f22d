use crate::command::BorrowingDraft;
use crate::entity::{Borrowing, BorrowingId, BorrowingNote, DueDate, Session};
use crate::KernelError;

/// Write side of the borrowing workflow. The implementor arbitrates
/// availability: a create for a title without free copies must fail with
/// `Rejection::NoCopyAvailable` and leave the stock untouched.
#[async_trait::async_trait]
pub trait BorrowingModifier: 'static + Sync + Send {
    async fn create(
        &self,
        session: &Session,
        draft: &BorrowingDraft,
    ) -> error_stack::Result<Borrowing, KernelError>;
    async fn renew(
        &self,
        session: &Session,
        id: &BorrowingId,
        due_date: &DueDate,
    ) -> error_stack::Result<Borrowing, KernelError>;
    async fn return_book(
        &self,
        session: &Session,
        id: &BorrowingId,
        notes: Option<&BorrowingNote>,
    ) -> error_stack::Result<Borrowing, KernelError>;
}

pub trait DependOnBorrowingModifier: 'static + Sync + Send {
    type BorrowingModifier: BorrowingModifier;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier;
}
