use crate::entity::{BookId, Rating, ReviewComment};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReviewDraft {
    pub book_id: BookId,
    pub rating: Rating,
    pub comment: ReviewComment,
}

impl ReviewDraft {
    pub fn new(
        book_id: BookId,
        rating: i32,
        comment: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let rating = Rating::new(rating)?;
        Ok(Self {
            book_id,
            rating,
            comment: ReviewComment::new(comment.into().trim()),
        })
    }
}
