use crate::entity::{Borrowing, BorrowingNote, DueDate, ReturnedAt};

pub trait Applier<Event> {
    fn apply(&mut self, event: Event);
}

/// State change of a single borrowing after its creation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BorrowingEvent {
    Renewed {
        due_date: DueDate,
    },
    Returned {
        returned_at: ReturnedAt,
        notes: Option<BorrowingNote>,
    },
}

impl Applier<BorrowingEvent> for Borrowing {
    fn apply(&mut self, event: BorrowingEvent) {
        self.substitute(|borrowing| match event {
            BorrowingEvent::Renewed { due_date } => {
                *borrowing.due_date = due_date;
                *borrowing.renewal_count = borrowing.renewal_count.incremented();
            }
            BorrowingEvent::Returned { returned_at, notes } => {
                *borrowing.returned_at = Some(returned_at);
                if notes.is_some() {
                    *borrowing.notes = notes;
                }
            }
        })
    }
}
