use std::collections::HashMap;

use serde::Serialize;

use crate::entity::{BookId, Borrowing, Review, UserId};
use crate::{KernelError, Rejection};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    AlreadyReviewed,
    NotReturned,
}

/// Which of a user's borrowed books they may still review.
///
/// A book qualifies once one of the user's borrowings of it has been returned
/// and the user has not reviewed it yet. Books the user never borrowed are
/// absent from the map.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ReviewEligibility(HashMap<BookId, Eligibility>);

impl ReviewEligibility {
    pub fn compute(user_id: &UserId, borrowings: &[Borrowing], reviews: &[Review]) -> Self {
        let mut map = HashMap::new();
        for borrowing in borrowings.iter().filter(|b| b.user_id() == user_id) {
            let entry = map
                .entry(*borrowing.book_id())
                .or_insert(Eligibility::NotReturned);
            if borrowing.is_returned() {
                *entry = Eligibility::Eligible;
            }
        }
        for review in reviews.iter().filter(|r| r.user_id() == user_id) {
            if let Some(entry) = map.get_mut(review.book_id()) {
                *entry = Eligibility::AlreadyReviewed;
            }
        }
        Self(map)
    }

    pub fn get(&self, book_id: &BookId) -> Option<Eligibility> {
        self.0.get(book_id).copied()
    }

    pub fn can_review(&self, book_id: &BookId) -> bool {
        self.get(book_id) == Some(Eligibility::Eligible)
    }

    pub fn check(&self, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        match self.get(book_id) {
            Some(Eligibility::Eligible) => Ok(()),
            Some(Eligibility::AlreadyReviewed) => Err(Rejection::AlreadyReviewed.into_report()),
            Some(Eligibility::NotReturned) | None => {
                Err(Rejection::NotEligibleForReview.into_report())
            }
        }
    }

    /// Per-book boolean view handed to the borrowing page.
    pub fn as_flags(&self) -> HashMap<BookId, bool> {
        self.0
            .iter()
            .map(|(book_id, eligibility)| (*book_id, *eligibility == Eligibility::Eligible))
            .collect()
    }
}
