use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use application::transfer::{BookDetailDto, BookDto, CatalogueDto, ReviewDto};
use kernel::prelude::entity::format_date;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: i64,
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    description: Option<String>,
    total_quantity: i32,
    available_quantity: i32,
    is_available: bool,
    publication_year: Option<i32>,
    cover_image: Option<String>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            is_available: value.is_available(),
            id: value.id,
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            genre: value.genre,
            description: value.description,
            total_quantity: value.total_quantity,
            available_quantity: value.available_quantity,
            publication_year: value.publication_year,
            cover_image: value.cover_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    id: i64,
    user_id: i64,
    user_name: Option<String>,
    book_id: i64,
    rating: i32,
    comment: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<ReviewDto> for ReviewResponse {
    fn from(value: ReviewDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            user_name: value.user_name,
            book_id: value.book_id,
            rating: value.rating,
            comment: value.comment,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogueResponse {
    books: Vec<BookResponse>,
    total: usize,
    genres: Vec<String>,
    authors: Vec<String>,
    suggested_due_date: String,
}

#[derive(Debug, Serialize)]
pub struct BookDetailResponse {
    book: BookResponse,
    reviews: Vec<ReviewResponse>,
    average_rating: Option<f64>,
    can_review: bool,
    suggested_due_date: String,
}

pub struct Presenter;

impl Exhaust<CatalogueDto> for Presenter {
    type To = Json<CatalogueResponse>;
    fn emit(&self, output: CatalogueDto) -> Self::To {
        Json(CatalogueResponse {
            books: output.books.into_iter().map(BookResponse::from).collect(),
            total: output.total,
            genres: output.genres,
            authors: output.authors,
            suggested_due_date: format_date(output.suggested_due_date),
        })
    }
}

impl Exhaust<Option<BookDetailDto>> for Presenter {
    type To = Response;
    fn emit(&self, output: Option<BookDetailDto>) -> Self::To {
        let Some(detail) = output else {
            return StatusCode::NOT_FOUND.into_response();
        };
        Json(BookDetailResponse {
            book: BookResponse::from(detail.book),
            reviews: detail.reviews.into_iter().map(ReviewResponse::from).collect(),
            average_rating: detail.average_rating,
            can_review: detail.can_review,
            suggested_due_date: format_date(detail.suggested_due_date),
        })
        .into_response()
    }
}

impl Exhaust<ReviewDto> for Presenter {
    type To = (StatusCode, Json<ReviewResponse>);
    fn emit(&self, output: ReviewDto) -> Self::To {
        (StatusCode::CREATED, Json(ReviewResponse::from(output)))
    }
}
