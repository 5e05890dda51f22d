use serde::Deserialize;

use application::transfer::{CreateBorrowingDto, RenewBorrowingDto, ReturnBorrowingDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateBorrowingRequest {
    book_id: i64,
    start_date: Option<String>,
    due_date: Option<String>,
    comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenewRequest {
    new_due_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReturnRequest {
    notes: Option<String>,
}

pub struct Transformer;

impl Intake<CreateBorrowingRequest> for Transformer {
    type To = CreateBorrowingDto;
    fn emit(&self, input: CreateBorrowingRequest) -> Self::To {
        CreateBorrowingDto {
            book_id: input.book_id,
            start_date: input.start_date,
            due_date: input.due_date,
            comment: input.comment,
        }
    }
}

impl Intake<(i64, RenewRequest)> for Transformer {
    type To = RenewBorrowingDto;
    fn emit(&self, (id, input): (i64, RenewRequest)) -> Self::To {
        RenewBorrowingDto {
            id,
            new_due_date: input.new_due_date,
        }
    }
}

impl Intake<(i64, ReturnRequest)> for Transformer {
    type To = ReturnBorrowingDto;
    fn emit(&self, (id, input): (i64, ReturnRequest)) -> Self::To {
        ReturnBorrowingDto {
            id,
            notes: input.notes,
        }
    }
}
