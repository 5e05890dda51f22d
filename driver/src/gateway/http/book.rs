use reqwest::Method;
use serde::{Deserialize, Serialize};

use kernel::interface::command::BookDraft;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookId, BookQuantity, BookTitle, CoverImage, Genre, Isbn,
    PublicationYear, Session,
};
use kernel::KernelError;

use crate::gateway::HttpGateway;

#[async_trait::async_trait]
impl BookQuery for HttpGateway {
    async fn find_all(&self, session: &Session) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows: Vec<BookRow> = self.get_list(session, "/books").await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        &self,
        session: &Session,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row: Option<BookRow> = self
            .get_optional(session, &format!("/books/{}", id.as_ref()))
            .await?;
        Ok(row.map(Book::from))
    }

    async fn genres(&self, session: &Session) -> error_stack::Result<Vec<Genre>, KernelError> {
        let rows: Vec<Named> = self.get_list(session, "/books/genres").await?;
        Ok(rows.into_iter().map(|row| Genre::new(row.into_name())).collect())
    }

    async fn popular_authors(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<BookAuthor>, KernelError> {
        let rows: Vec<Named> = self.get_list(session, "/books/popular-authors").await?;
        Ok(rows
            .into_iter()
            .map(|row| BookAuthor::new(row.into_name()))
            .collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for HttpGateway {
    async fn create(
        &self,
        session: &Session,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row: BookRow = self
            .send(Method::POST, session, "/books", &BookBody::from(book))
            .await?;
        Ok(Book::from(row))
    }

    async fn update(
        &self,
        session: &Session,
        id: &BookId,
        book: &BookDraft,
    ) -> error_stack::Result<Book, KernelError> {
        let row: BookRow = self
            .send(
                Method::PUT,
                session,
                &format!("/books/{}", id.as_ref()),
                &BookBody::from(book),
            )
            .await?;
        Ok(Book::from(row))
    }

    async fn delete(&self, session: &Session, id: &BookId) -> error_stack::Result<(), KernelError> {
        self.remove(session, &format!("/books/{}", id.as_ref())).await
    }
}

impl DependOnBookQuery for HttpGateway {
    type BookQuery = Self;
    fn book_query(&self) -> &Self::BookQuery {
        self
    }
}

impl DependOnBookModifier for HttpGateway {
    type BookModifier = Self;
    fn book_modifier(&self) -> &Self::BookModifier {
        self
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct BookRow {
    id: i64,
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    description: Option<String>,
    #[serde(default, alias = "quantity")]
    total_quantity: i32,
    #[serde(default)]
    available_quantity: i32,
    publication_year: Option<i32>,
    cover_image: Option<String>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        let blank = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            blank(value.isbn).map(Isbn::new),
            blank(value.genre).map(Genre::new),
            blank(value.description).map(BookDescription::new),
            BookQuantity::new(value.total_quantity),
            BookQuantity::new(value.available_quantity),
            value.publication_year.map(PublicationYear::new),
            blank(value.cover_image).map(CoverImage::new),
        )
    }
}

/// Facet entries come either as plain strings or as counted objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Named {
    Plain(String),
    Genre { genre: String },
    Author { author: String },
    Name { name: String },
}

impl Named {
    fn into_name(self) -> String {
        match self {
            Named::Plain(name)
            | Named::Genre { genre: name }
            | Named::Author { author: name }
            | Named::Name { name } => name,
        }
    }
}

#[derive(Debug, Serialize)]
struct BookBody<'a> {
    title: &'a str,
    author: &'a str,
    isbn: Option<&'a str>,
    genre: Option<&'a str>,
    description: Option<&'a str>,
    total_quantity: i32,
    available_quantity: i32,
    publication_year: Option<i32>,
    cover_image: Option<&'a str>,
}

impl<'a> From<&'a BookDraft> for BookBody<'a> {
    fn from(value: &'a BookDraft) -> Self {
        Self {
            title: value.title.as_ref(),
            author: value.author.as_ref(),
            isbn: value.isbn.as_ref().map(|isbn| isbn.as_ref().as_str()),
            genre: value.genre.as_ref().map(|genre| genre.as_ref().as_str()),
            description: value
                .description
                .as_ref()
                .map(|description| description.as_ref().as_str()),
            total_quantity: *value.total_quantity.as_ref(),
            available_quantity: *value.available_quantity.as_ref(),
            publication_year: value.publication_year.map(|year| *year.as_ref()),
            cover_image: value.cover_image.as_ref().map(|cover| cover.as_ref().as_str()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn row_tolerates_sparse_records() {
        let row: BookRow = serde_json::from_str(
            r#"{"id":3,"title":"Dune","author":"Frank Herbert","genre":"","quantity":4,"available_quantity":1}"#,
        )
        .unwrap();
        let book = Book::from(row);
        assert_eq!(*book.total_quantity().as_ref(), 4);
        assert_eq!(book.genre(), &None);
        assert!(book.is_available());
    }

    #[test]
    fn facets_accept_strings_and_objects() {
        let rows: Vec<Named> =
            serde_json::from_str(r#"["Fiction",{"genre":"Essay","count":3},{"author":"Herbert"}]"#)
                .unwrap();
        let names = rows.into_iter().map(Named::into_name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Fiction", "Essay", "Herbert"]);
    }

    #[test_with::env(LIBRARY_API_TEST)]
    #[tokio::test]
    async fn live_catalogue_is_readable() -> error_stack::Result<(), KernelError> {
        let gateway = HttpGateway::new()?;
        let books = gateway.find_all(&Session::Anonymous).await?;
        for book in &books {
            assert!(book.available_quantity() <= book.total_quantity());
        }
        if let Some(first) = books.first() {
            let found = gateway.find_by_id(&Session::Anonymous, first.id()).await?;
            assert_eq!(found.as_ref().map(Book::id), Some(first.id()));
        }
        Ok(())
    }
}
