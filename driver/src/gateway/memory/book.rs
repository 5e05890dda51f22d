use std::collections::{BTreeSet, HashMap};

use error_stack::Report;

use kernel::interface::command::BookDraft;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookId, Genre, Session};
use kernel::{KernelError, Rejection};

use crate::gateway::InMemoryGateway;

const POPULAR_AUTHORS: usize = 10;

pub(super) fn from_draft(id: BookId, draft: BookDraft) -> Book {
    Book::new(
        id,
        draft.title,
        draft.author,
        draft.isbn,
        draft.genre,
        draft.description,
        draft.total_quantity,
        draft.available_quantity,
        draft.publication_year,
        draft.cover_image,
    )
}

#[async_trait::async_trait]
impl BookQuery for InMemoryGateway {
    async fn find_all(&self, _session: &Session) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(self.lock()?.books.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        _session: &Session,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.book(id)
    }

    async fn genres(&self, _session: &Session) -> error_stack::Result<Vec<Genre>, KernelError> {
        let store = self.lock()?;
        let genres = store
            .books
            .values()
            .filter_map(|book| book.genre().clone())
            .collect::<BTreeSet<_>>();
        Ok(genres.into_iter().collect())
    }

    /// Authors ranked by how often their books were borrowed.
    async fn popular_authors(
        &self,
        _session: &Session,
    ) -> error_stack::Result<Vec<BookAuthor>, KernelError> {
        let store = self.lock()?;
        let mut counts: HashMap<&BookAuthor, usize> = HashMap::new();
        for book in store.books.values() {
            counts.entry(book.author()).or_default();
        }
        for borrowing in store.borrowings.values() {
            if let Some(book) = store.books.get(borrowing.book_id()) {
                *counts.entry(book.author()).or_default() += 1;
            }
        }
        let mut ranked = counts.into_iter().collect::<Vec<_>>();
        ranked.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
        Ok(ranked
            .into_iter()
            .take(POPULAR_AUTHORS)
            .map(|(author, _)| author.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryGateway {
    async fn create(
        &self,
        session: &Session,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let draft = book.clone().validate()?;
        let mut store = self.lock()?;
        store.admin(session)?;
        let id = BookId::new(store.next_id());
        let book = from_draft(id, draft);
        store.books.insert(id, book.clone());
        tracing::info!("book {id:?} added to the catalogue");
        Ok(book)
    }

    async fn update(
        &self,
        session: &Session,
        id: &BookId,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let draft = book.clone().validate()?;
        let mut store = self.lock()?;
        store.admin(session)?;
        let slot = store
            .books
            .get_mut(id)
            .ok_or_else(|| Report::new(KernelError::NotFound))?;
        *slot = from_draft(*id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, session: &Session, id: &BookId) -> error_stack::Result<(), KernelError> {
        let mut store = self.lock()?;
        store.admin(session)?;
        let lent = store
            .borrowings
            .values()
            .any(|borrowing| borrowing.book_id() == id && !borrowing.is_returned());
        if lent {
            return Err(Rejection::Server(String::from(
                "This book still has copies out on loan",
            ))
            .into_report());
        }
        store
            .books
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Report::new(KernelError::NotFound))
    }
}

impl DependOnBookQuery for InMemoryGateway {
    type BookQuery = Self;
    fn book_query(&self) -> &Self::BookQuery {
        self
    }
}

impl DependOnBookModifier for InMemoryGateway {
    type BookModifier = Self;
    fn book_modifier(&self) -> &Self::BookModifier {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gateway::memory::fixture::{admin, draft, student};
    use time::{Duration, OffsetDateTime};

    #[tokio::test]
    async fn only_admins_edit_the_catalogue() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let student = student(&gateway, "Amina");
        let refused = gateway
            .create(&student, &draft("Dune", "Frank Herbert", "Fiction", 2))
            .await
            .unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);

        let admin = admin(&gateway);
        let book = gateway
            .create(&admin, &draft("Dune", "Frank Herbert", "Fiction", 2))
            .await?;
        let found = gateway.find_by_id(&Session::Anonymous, book.id()).await?;
        assert_eq!(found, Some(book));
        Ok(())
    }

    #[tokio::test]
    async fn lent_books_cannot_be_deleted() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let admin = admin(&gateway);
        let reader = student(&gateway, "Amina");
        let book = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 1))?;
        let now = OffsetDateTime::now_utc();
        gateway.seed_borrowing(
            reader.user()?.id(),
            book.id(),
            now,
            now + Duration::days(15),
        )?;

        let refused = BookModifier::delete(&gateway, &admin, book.id())
            .await
            .unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Rejected);
        Ok(())
    }

    #[tokio::test]
    async fn popular_authors_follow_borrowings() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let reader = student(&gateway, "Amina");
        gateway.seed_book(draft("Emma", "Jane Austen", "Fiction", 1))?;
        let dune = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 3))?;
        let now = OffsetDateTime::now_utc();
        for _ in 0..2 {
            gateway.seed_borrowing(reader.user()?.id(), dune.id(), now, now + Duration::days(3))?;
        }
        let authors = gateway.popular_authors(&Session::Anonymous).await?;
        assert_eq!(
            authors,
            vec![BookAuthor::new("Frank Herbert"), BookAuthor::new("Jane Austen")]
        );
        assert_eq!(gateway.genres(&Session::Anonymous).await?, vec![Genre::new("Fiction")]);
        Ok(())
    }
}
