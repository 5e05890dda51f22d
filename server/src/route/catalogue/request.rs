use serde::Deserialize;

use application::transfer::{CreateReviewDto, GetBookDto, GetCatalogueDto};
use kernel::prelude::catalogue::CatalogueSort;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct GetCatalogueRequest {
    search: Option<String>,
    genre: Option<String>,
    author: Option<String>,
    #[serde(default)]
    available_only: bool,
    #[serde(default)]
    sort: CatalogueSort,
    limit: Option<i32>,
    offset: Option<i32>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    rating: i32,
    #[serde(default)]
    comment: String,
}

pub struct Transformer;

impl Intake<GetCatalogueRequest> for Transformer {
    type To = GetCatalogueDto;
    fn emit(&self, input: GetCatalogueRequest) -> Self::To {
        GetCatalogueDto {
            search: input.search,
            genre: input.genre,
            author: input.author,
            available_only: input.available_only,
            sort: input.sort,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetBookRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<(i64, CreateReviewRequest)> for Transformer {
    type To = CreateReviewDto;
    fn emit(&self, (book_id, input): (i64, CreateReviewRequest)) -> Self::To {
        CreateReviewDto {
            book_id,
            rating: input.rating,
            comment: input.comment,
        }
    }
}
