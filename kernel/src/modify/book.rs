use crate::command::BookDraft;
use crate::entity::{Book, BookId, Session};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    async fn create(
        &self,
        session: &Session,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn update(
        &self,
        session: &Session,
        id: &BookId,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError>;
    async fn delete(&self, session: &Session, id: &BookId)
        -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send {
    type BookModifier: BookModifier;
    fn book_modifier(&self) -> &Self::BookModifier;
}
