use time::OffsetDateTime;

use kernel::prelude::entity::{DestructReview, Review};

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDto {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub book_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: OffsetDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        let DestructReview {
            id,
            user_id,
            user_name,
            book_id,
            rating,
            comment,
            is_approved: _,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            user_name: user_name.map(Into::into),
            book_id: book_id.into(),
            rating: rating.into(),
            comment: comment.into(),
            created_at: *created_at.as_ref(),
        }
    }
}

pub struct CreateReviewDto {
    pub book_id: i64,
    pub rating: i32,
    pub comment: String,
}
