use reqwest::Method;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use kernel::interface::command::ReviewDraft;
use kernel::interface::query::{DependOnReviewQuery, ReviewQuery};
use kernel::interface::update::{DependOnReviewModifier, ReviewModifier};
use kernel::prelude::entity::{
    parse_instant, BookId, CreatedAt, IsApproved, Rating, Review, ReviewComment, ReviewId,
    Session, UserId, UserName,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};
use crate::gateway::HttpGateway;

#[async_trait::async_trait]
impl ReviewQuery for HttpGateway {
    async fn find_by_book_id(
        &self,
        session: &Session,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Review>, KernelError> {
        let rows: Vec<ReviewRow> = self
            .get_list(session, &format!("/books/{}/reviews", book_id.as_ref()))
            .await?;
        rows.into_iter()
            .map(|row| row.into_review(*book_id))
            .collect::<Result<Vec<_>, DriverError>>()
            .convert_error()
    }
}

#[async_trait::async_trait]
impl ReviewModifier for HttpGateway {
    async fn create(
        &self,
        session: &Session,
        review: &ReviewDraft,
    ) -> error_stack::Result<Review, KernelError> {
        let body = ReviewBody {
            rating: *review.rating.as_ref(),
            comment: review.comment.as_ref(),
        };
        let row: ReviewRow = self
            .send(
                Method::POST,
                session,
                &format!("/books/{}/reviews", review.book_id.as_ref()),
                &body,
            )
            .await?;
        row.into_review(review.book_id).convert_error()
    }
}

impl DependOnReviewQuery for HttpGateway {
    type ReviewQuery = Self;
    fn review_query(&self) -> &Self::ReviewQuery {
        self
    }
}

impl DependOnReviewModifier for HttpGateway {
    type ReviewModifier = Self;
    fn review_modifier(&self) -> &Self::ReviewModifier {
        self
    }
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    id: i64,
    user_id: i64,
    #[serde(alias = "author_name")]
    user_name: Option<String>,
    book_id: Option<i64>,
    rating: i32,
    #[serde(default)]
    comment: String,
    #[serde(default = "approved")]
    is_approved: bool,
    created_at: Option<String>,
}

fn approved() -> bool {
    true
}

impl ReviewRow {
    /// Reviews listed under a book may omit their `book_id`.
    fn into_review(self, book_id: BookId) -> Result<Review, DriverError> {
        let rating = Rating::try_from(self.rating).map_err(|rejection| {
            DriverError::Conversion(anyhow::anyhow!("review {}: {rejection}", self.id))
        })?;
        let created_at = self
            .created_at
            .as_deref()
            .and_then(parse_instant)
            .unwrap_or_else(OffsetDateTime::now_utc);
        Ok(Review::new(
            ReviewId::new(self.id),
            UserId::new(self.user_id),
            self.user_name.map(UserName::new),
            self.book_id.map(BookId::new).unwrap_or(book_id),
            rating,
            ReviewComment::new(self.comment),
            IsApproved::new(self.is_approved),
            CreatedAt::new(created_at),
        ))
    }
}

#[derive(Debug, Serialize)]
struct ReviewBody<'a> {
    rating: i32,
    comment: &'a str,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn review_listed_under_book_inherits_its_id() {
        let row: ReviewRow = serde_json::from_str(
            r#"{"id":1,"user_id":3,"rating":4,"comment":"Great","created_at":"2024-03-01 09:30:00"}"#,
        )
        .unwrap();
        let review = row.into_review(BookId::new(12)).unwrap();
        assert_eq!(review.book_id(), &BookId::new(12));
        assert_eq!(*review.rating().as_ref(), 4);
        assert!(*review.is_approved().as_ref());
    }

    #[test]
    fn out_of_range_rating_is_refused() {
        let row: ReviewRow =
            serde_json::from_str(r#"{"id":1,"user_id":3,"book_id":2,"rating":9}"#).unwrap();
        assert!(row.into_review(BookId::new(2)).is_err());
    }
}
