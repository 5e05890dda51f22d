use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use application::transfer::{BorrowingDto, MyBorrowingsDto};
use kernel::prelude::entity::BorrowingStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BorrowingResponse {
    id: i64,
    user_id: i64,
    book_id: i64,
    book_title: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    borrowed_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    due_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
    renewal_count: i32,
    notes: Option<String>,
    status: BorrowingStatus,
    days_overdue: i64,
    due_soon: bool,
    can_renew: bool,
    remaining_renewals: i32,
    can_review: bool,
}

impl From<BorrowingDto> for BorrowingResponse {
    fn from(value: BorrowingDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            book_id: value.book_id,
            book_title: value.book_title,
            borrowed_at: value.borrowed_at,
            due_date: value.due_date,
            returned_at: value.returned_at,
            renewal_count: value.renewal_count,
            notes: value.notes,
            status: value.status,
            days_overdue: value.days_overdue,
            due_soon: value.due_soon,
            can_renew: value.can_renew,
            remaining_renewals: value.remaining_renewals,
            can_review: value.can_review,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MyBorrowingsResponse {
    borrowings: Vec<BorrowingResponse>,
    active: usize,
    overdue: usize,
    returned: usize,
    review_eligibility: BTreeMap<i64, bool>,
}

pub struct Presenter;

impl Exhaust<MyBorrowingsDto> for Presenter {
    type To = Json<MyBorrowingsResponse>;
    fn emit(&self, output: MyBorrowingsDto) -> Self::To {
        Json(MyBorrowingsResponse {
            borrowings: output
                .borrowings
                .into_iter()
                .map(BorrowingResponse::from)
                .collect(),
            active: output.active,
            overdue: output.overdue,
            returned: output.returned,
            review_eligibility: output.review_eligibility,
        })
    }
}

impl Exhaust<BorrowingDto> for Presenter {
    type To = Json<BorrowingResponse>;
    fn emit(&self, output: BorrowingDto) -> Self::To {
        Json(BorrowingResponse::from(output))
    }
}

/// Freshly created borrowings answer with `201 Created`.
pub struct CreatedPresenter;

impl Exhaust<BorrowingDto> for CreatedPresenter {
    type To = (StatusCode, Json<BorrowingResponse>);
    fn emit(&self, output: BorrowingDto) -> Self::To {
        (StatusCode::CREATED, Json(BorrowingResponse::from(output)))
    }
}
