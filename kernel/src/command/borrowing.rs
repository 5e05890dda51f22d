use time::Date;

use crate::entity::{BookId, BorrowingNote};
use crate::{KernelError, Rejection};

/// A validated borrow form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BorrowingDraft {
    pub book_id: BookId,
    pub start_date: Date,
    pub due_date: Date,
    pub comment: Option<BorrowingNote>,
}

impl BorrowingDraft {
    /// `start_date` defaults to `today`; the due date has to be chosen.
    pub fn new(
        book_id: BookId,
        start_date: Option<Date>,
        due_date: Option<Date>,
        comment: Option<String>,
        today: Date,
    ) -> error_stack::Result<Self, KernelError> {
        let start_date = start_date.unwrap_or(today);
        if start_date < today {
            return Err(Rejection::StartInPast.into_report());
        }
        let due_date = due_date.ok_or_else(|| Rejection::MissingDueDate.into_report())?;
        if due_date < start_date {
            return Err(Rejection::DueBeforeStart.into_report());
        }
        let comment = comment
            .map(|comment| comment.trim().to_string())
            .filter(|comment| !comment.is_empty())
            .map(BorrowingNote::new);
        Ok(Self {
            book_id,
            start_date,
            due_date,
            comment,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 01);

    fn rejection(result: error_stack::Result<BorrowingDraft, KernelError>) -> Rejection {
        result
            .unwrap_err()
            .downcast_ref::<Rejection>()
            .cloned()
            .unwrap()
    }

    #[test]
    fn start_defaults_to_today() {
        let draft =
            BorrowingDraft::new(BookId::new(1), None, Some(date!(2024 - 03 - 16)), None, TODAY)
                .unwrap();
        assert_eq!(draft.start_date, TODAY);
    }

    #[test]
    fn due_date_is_required_and_ordered() {
        assert_eq!(
            rejection(BorrowingDraft::new(BookId::new(1), None, None, None, TODAY)),
            Rejection::MissingDueDate
        );
        assert_eq!(
            rejection(BorrowingDraft::new(
                BookId::new(1),
                Some(date!(2024 - 03 - 05)),
                Some(date!(2024 - 03 - 04)),
                None,
                TODAY
            )),
            Rejection::DueBeforeStart
        );
        assert_eq!(
            rejection(BorrowingDraft::new(
                BookId::new(1),
                Some(date!(2024 - 02 - 28)),
                Some(date!(2024 - 03 - 04)),
                None,
                TODAY
            )),
            Rejection::StartInPast
        );
    }

    #[test]
    fn same_day_loan_is_allowed_and_blank_comment_dropped() {
        let draft = BorrowingDraft::new(
            BookId::new(1),
            None,
            Some(TODAY),
            Some(String::from("   ")),
            TODAY,
        )
        .unwrap();
        assert_eq!(draft.due_date, TODAY);
        assert_eq!(draft.comment, None);
    }
}
