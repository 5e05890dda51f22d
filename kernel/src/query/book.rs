use crate::entity::{Book, BookAuthor, BookId, Genre, Session};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery: Sync + Send + 'static {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        session: &Session,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn genres(&self, session: &Session) -> error_stack::Result<Vec<Genre>, KernelError>;
    async fn popular_authors(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<BookAuthor>, KernelError>;
}

pub trait DependOnBookQuery: Sync + Send + 'static {
    type BookQuery: BookQuery;
    fn book_query(&self) -> &Self::BookQuery;
}
