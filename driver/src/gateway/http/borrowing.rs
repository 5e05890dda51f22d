use reqwest::Method;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use kernel::interface::command::BorrowingDraft;
use kernel::interface::query::{BorrowingQuery, DependOnBorrowingQuery};
use kernel::interface::update::{BorrowingModifier, DependOnBorrowingModifier};
use kernel::prelude::entity::{
    format_date, parse_instant, BookId, BookTitle, BorrowedAt, Borrowing, BorrowingId,
    BorrowingNote, DueDate, RenewalCount, ReturnedAt, Session, UserId,
};
use kernel::KernelError;

use crate::error::{ConvertError, DriverError};
use crate::gateway::HttpGateway;

#[async_trait::async_trait]
impl BorrowingQuery for HttpGateway {
    async fn find_all(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows: Vec<BorrowingRow> = self.get_list(session, "/borrowings").await?;
        into_borrowings(rows)
    }

    async fn find_mine(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        session.token()?;
        let rows: Vec<BorrowingRow> = self
            .get_list(session, "/borrowings/my-borrowings")
            .await?;
        into_borrowings(rows)
    }

    async fn find_by_user_id(
        &self,
        session: &Session,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let rows: Vec<BorrowingRow> = self
            .get_list(session, &format!("/users/{}/borrowings", user_id.as_ref()))
            .await?;
        into_borrowings(rows)
    }
}

#[async_trait::async_trait]
impl BorrowingModifier for HttpGateway {
    async fn create(
        &self,
        session: &Session,
        draft: &BorrowingDraft,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let body = CreateBody {
            book_id: *draft.book_id.as_ref(),
            start_date: format_date(draft.start_date),
            due_date: format_date(draft.due_date),
            comment: draft.comment.as_ref().map(|comment| comment.as_ref().as_str()),
        };
        let row: BorrowingRow = self
            .send(Method::POST, session, "/borrowings", &body)
            .await?;
        Borrowing::try_from(row).convert_error()
    }

    async fn renew(
        &self,
        session: &Session,
        id: &BorrowingId,
        due_date: &DueDate,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let body = RenewBody {
            new_due_date: due_date
                .as_ref()
                .format(&Rfc3339)
                .map_err(|error| DriverError::Conversion(anyhow::Error::new(error)))
                .convert_error()?,
        };
        let row: BorrowingRow = self
            .send(
                Method::PUT,
                session,
                &format!("/borrowings/{}/renew", id.as_ref()),
                &body,
            )
            .await?;
        Borrowing::try_from(row).convert_error()
    }

    async fn return_book(
        &self,
        session: &Session,
        id: &BorrowingId,
        notes: Option<&BorrowingNote>,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let body = ReturnBody {
            notes: notes.map(|notes| notes.as_ref().as_str()),
        };
        let row: BorrowingRow = self
            .send(
                Method::PUT,
                session,
                &format!("/borrowings/{}/return", id.as_ref()),
                &body,
            )
            .await?;
        Borrowing::try_from(row).convert_error()
    }
}

impl DependOnBorrowingQuery for HttpGateway {
    type BorrowingQuery = Self;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        self
    }
}

impl DependOnBorrowingModifier for HttpGateway {
    type BorrowingModifier = Self;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        self
    }
}

fn into_borrowings(rows: Vec<BorrowingRow>) -> error_stack::Result<Vec<Borrowing>, KernelError> {
    rows.into_iter()
        .map(Borrowing::try_from)
        .collect::<Result<Vec<_>, DriverError>>()
        .convert_error()
}

#[derive(Debug, Deserialize)]
struct NestedBook {
    title: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BorrowingRow {
    id: i64,
    user_id: i64,
    book_id: i64,
    book_title: Option<String>,
    book: Option<NestedBook>,
    #[serde(alias = "borrow_date", alias = "start_date")]
    borrowed_at: String,
    due_date: String,
    #[serde(alias = "return_date")]
    returned_at: Option<String>,
    #[serde(default)]
    renewal_count: i32,
    #[serde(alias = "comment")]
    notes: Option<String>,
}

impl TryFrom<BorrowingRow> for Borrowing {
    type Error = DriverError;

    fn try_from(value: BorrowingRow) -> Result<Self, Self::Error> {
        let instant = |field: &str, raw: &str| {
            parse_instant(raw).ok_or_else(|| {
                DriverError::Conversion(anyhow::anyhow!(
                    "borrowing {}: unreadable {field} `{raw}`",
                    value.id
                ))
            })
        };
        let borrowed_at = instant("borrowed_at", &value.borrowed_at)?;
        let due_date = instant("due_date", &value.due_date)?;
        let returned_at = match value.returned_at.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(instant("returned_at", raw)?),
            _ => None,
        };
        let title = value
            .book_title
            .or(value.book.map(|book| book.title))
            .map(BookTitle::new);
        Ok(Borrowing::new(
            BorrowingId::new(value.id),
            UserId::new(value.user_id),
            BookId::new(value.book_id),
            title,
            BorrowedAt::new(borrowed_at),
            DueDate::new(due_date),
            returned_at.map(ReturnedAt::new),
            RenewalCount::new(value.renewal_count),
            value.notes.map(BorrowingNote::new),
        ))
    }
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    book_id: i64,
    start_date: String,
    due_date: String,
    comment: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct RenewBody {
    new_due_date: String,
}

#[derive(Debug, Serialize)]
struct ReturnBody<'a> {
    notes: Option<&'a str>,
}

#[cfg(test)]
mod test {
    use super::*;
    use kernel::prelude::entity::BorrowingStatus;
    use time::macros::datetime;

    #[test]
    fn mixed_date_shapes_decode() {
        let row: BorrowingRow = serde_json::from_str(
            r#"{
                "id": 9, "user_id": 2, "book_id": 4,
                "book": {"title": "Dune"},
                "borrow_date": "2024-03-01",
                "due_date": "2024-03-16T12:00:00Z",
                "returned_at": null,
                "renewal_count": 1
            }"#,
        )
        .unwrap();
        let borrowing = Borrowing::try_from(row).unwrap();
        assert_eq!(
            *borrowing.borrowed_at().as_ref(),
            datetime!(2024-03-01 0:00 UTC)
        );
        assert_eq!(borrowing.book_title(), &Some(BookTitle::new("Dune")));
        assert_eq!(
            borrowing.status_at(datetime!(2024-03-17 0:00 UTC)),
            BorrowingStatus::Overdue
        );
    }

    #[test]
    fn unreadable_date_is_a_conversion_error() {
        let row: BorrowingRow = serde_json::from_str(
            r#"{"id":1,"user_id":1,"book_id":1,"borrowed_at":"soon","due_date":"2024-03-16"}"#,
        )
        .unwrap();
        assert!(matches!(
            Borrowing::try_from(row),
            Err(DriverError::Conversion(_))
        ));
    }
}
