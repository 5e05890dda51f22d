mod comment;
mod id;
mod rating;

pub use self::{comment::*, id::*, rating::*};
use crate::entity::{BookId, CreatedAt, UserId, UserName};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Review {
    id: ReviewId,
    user_id: UserId,
    user_name: Option<UserName>,
    book_id: BookId,
    rating: Rating,
    comment: ReviewComment,
    is_approved: IsApproved,
    created_at: CreatedAt<Review>,
}

impl Review {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ReviewId,
        user_id: UserId,
        user_name: Option<UserName>,
        book_id: BookId,
        rating: Rating,
        comment: ReviewComment,
        is_approved: IsApproved,
        created_at: CreatedAt<Review>,
    ) -> Self {
        Self {
            id,
            user_id,
            user_name,
            book_id,
            rating,
            comment,
            is_approved,
            created_at,
        }
    }
}

/// Mean rating of the given reviews, `None` when there are none.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: i32 = reviews.iter().map(|review| *review.rating().as_ref()).sum();
    Some(f64::from(sum) / reviews.len() as f64)
}
