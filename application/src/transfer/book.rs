use time::Date;

use kernel::interface::command::BookDraft;
use kernel::prelude::catalogue::{CatalogueFilter, CatalogueSort};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookQuantity, BookTitle, CoverImage, DestructBook, Genre,
    Isbn, PublicationYear,
};

use crate::transfer::ReviewDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub publication_year: Option<i32>,
    pub cover_image: Option<String>,
}

impl BookDto {
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            genre,
            description,
            total_quantity,
            available_quantity,
            publication_year,
            cover_image,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.map(Into::into),
            genre: genre.map(Into::into),
            description: description.map(Into::into),
            total_quantity: total_quantity.into(),
            available_quantity: available_quantity.into(),
            publication_year: publication_year.map(Into::into),
            cover_image: cover_image.map(Into::into),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct GetCatalogueDto {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub available_only: bool,
    pub sort: CatalogueSort,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl From<&GetCatalogueDto> for CatalogueFilter {
    fn from(value: &GetCatalogueDto) -> Self {
        Self {
            search: value.search.clone(),
            genre: value.genre.clone(),
            author: value.author.clone(),
            available_only: value.available_only,
            sort: value.sort,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogueDto {
    pub books: Vec<BookDto>,
    /// Matches before pagination.
    pub total: usize,
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub suggested_due_date: Date,
}

#[derive(Debug, Clone)]
pub struct BookDetailDto {
    pub book: BookDto,
    pub reviews: Vec<ReviewDto>,
    pub average_rating: Option<f64>,
    pub can_review: bool,
    pub suggested_due_date: Date,
}

pub struct GetBookDto {
    pub id: i64,
}

/// Admin book form, before validation.
#[derive(Debug, Clone)]
pub struct BookFormDto {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub total_quantity: i32,
    pub available_quantity: Option<i32>,
    pub publication_year: Option<i32>,
    pub cover_image: Option<String>,
}

impl From<BookFormDto> for BookDraft {
    fn from(value: BookFormDto) -> Self {
        fn filled(value: Option<String>) -> Option<String> {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        }
        Self {
            title: BookTitle::new(value.title.trim()),
            author: BookAuthor::new(value.author.trim()),
            isbn: filled(value.isbn).map(Isbn::new),
            genre: filled(value.genre).map(Genre::new),
            description: filled(value.description).map(BookDescription::new),
            total_quantity: BookQuantity::new(value.total_quantity),
            available_quantity: BookQuantity::new(
                value.available_quantity.unwrap_or(value.total_quantity),
            ),
            publication_year: value.publication_year.map(PublicationYear::new),
            cover_image: filled(value.cover_image).map(CoverImage::new),
        }
    }
}

pub struct UpdateBookDto {
    pub id: i64,
    pub form: BookFormDto,
}

pub struct DeleteBookDto {
    pub id: i64,
}
