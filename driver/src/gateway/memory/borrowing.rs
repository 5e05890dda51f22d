use time::OffsetDateTime;

use kernel::interface::command::BorrowingDraft;
use kernel::interface::event::Applier;
use kernel::interface::query::{BorrowingQuery, DependOnBorrowingQuery};
use kernel::interface::update::{BorrowingModifier, DependOnBorrowingModifier};
use kernel::prelude::entity::{Borrowing, BorrowingId, BorrowingNote, DueDate, Session, UserId};
use kernel::KernelError;

use super::loan_bounds;
use crate::gateway::InMemoryGateway;

#[async_trait::async_trait]
impl BorrowingQuery for InMemoryGateway {
    async fn find_all(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let store = self.lock()?;
        store.admin(session)?;
        Ok(store.borrowings.values().cloned().collect())
    }

    async fn find_mine(
        &self,
        session: &Session,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let store = self.lock()?;
        let caller = store.caller(session)?;
        Ok(store
            .borrowings
            .values()
            .filter(|borrowing| borrowing.user_id() == caller.id())
            .cloned()
            .collect())
    }

    async fn find_by_user_id(
        &self,
        session: &Session,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Borrowing>, KernelError> {
        let store = self.lock()?;
        store.self_or_admin(session, user_id)?;
        Ok(store
            .borrowings
            .values()
            .filter(|borrowing| borrowing.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl BorrowingModifier for InMemoryGateway {
    async fn create(
        &self,
        session: &Session,
        draft: &BorrowingDraft,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut store = self.lock()?;
        let user_id = *store.caller(session)?.id();
        let (borrowed_at, due_date) = loan_bounds(draft.start_date, draft.due_date, now);
        store.check_out(
            user_id,
            draft.book_id,
            borrowed_at,
            due_date,
            draft.comment.clone(),
        )
    }

    async fn renew(
        &self,
        session: &Session,
        id: &BorrowingId,
        due_date: &DueDate,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut store = self.lock()?;
        let caller = store.caller(session)?.clone();
        let borrowing = store.borrowing_of(&caller, id)?;
        let event = borrowing.renew_at(now, Some(*due_date))?;
        borrowing.apply(event);
        tracing::info!(
            "borrowing {id:?} renewed ({} renewals)",
            borrowing.renewal_count().as_ref()
        );
        Ok(borrowing.clone())
    }

    async fn return_book(
        &self,
        session: &Session,
        id: &BorrowingId,
        notes: Option<&BorrowingNote>,
    ) -> error_stack::Result<Borrowing, KernelError> {
        let now = OffsetDateTime::now_utc();
        let mut store = self.lock()?;
        let caller = store.caller(session)?.clone();
        let borrowing = store.borrowing_of(&caller, id)?;
        let event = borrowing.return_at(now, notes.cloned())?;
        borrowing.apply(event);
        let returned = borrowing.clone();
        if let Some(book) = store.books.get_mut(returned.book_id()) {
            book.check_in();
        }
        tracing::info!("borrowing {id:?} returned");
        Ok(returned)
    }
}

impl DependOnBorrowingQuery for InMemoryGateway {
    type BorrowingQuery = Self;
    fn borrowing_query(&self) -> &Self::BorrowingQuery {
        self
    }
}

impl DependOnBorrowingModifier for InMemoryGateway {
    type BorrowingModifier = Self;
    fn borrowing_modifier(&self) -> &Self::BorrowingModifier {
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gateway::memory::fixture::{draft, student};
    use kernel::prelude::entity::BookId;
    use kernel::Rejection;
    use rand::seq::SliceRandom;
    use rand::Rng;
    use time::Duration;

    fn borrow_form(book_id: BookId) -> BorrowingDraft {
        let today = OffsetDateTime::now_utc().date();
        BorrowingDraft::new(
            book_id,
            None,
            Some(today + Duration::days(15)),
            None,
            today,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn last_copy_goes_to_one_borrower() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let first = student(&gateway, "Amina");
        let second = student(&gateway, "Bruno");
        let book = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 1))?;

        gateway.create(&first, &borrow_form(*book.id())).await?;
        let refused = gateway
            .create(&second, &borrow_form(*book.id()))
            .await
            .unwrap_err();
        assert_eq!(
            refused.downcast_ref::<Rejection>(),
            Some(&Rejection::NoCopyAvailable)
        );
        let book = gateway.book(book.id())?.unwrap();
        assert_eq!(*book.available_quantity().as_ref(), 0);
        assert_eq!(gateway.find_mine(&second).await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn others_cannot_return_my_book() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let owner = student(&gateway, "Amina");
        let other = student(&gateway, "Bruno");
        let book = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 1))?;
        let loan = gateway.create(&owner, &borrow_form(*book.id())).await?;

        let refused = gateway.return_book(&other, loan.id(), None).await.unwrap_err();
        assert_eq!(*refused.current_context(), KernelError::Forbidden);
        Ok(())
    }

    #[tokio::test]
    async fn stock_stays_consistent_under_random_traffic() -> error_stack::Result<(), KernelError>
    {
        let gateway = InMemoryGateway::default();
        let readers = (0..4)
            .map(|n| student(&gateway, &format!("Reader{n}")))
            .collect::<Vec<_>>();
        let book = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 3))?;
        let mut rng = rand::thread_rng();
        let mut open: Vec<(usize, BorrowingId)> = Vec::new();

        for _ in 0..200 {
            if open.is_empty() || rng.gen_bool(0.55) {
                let reader = rng.gen_range(0..readers.len());
                if let Ok(loan) = gateway
                    .create(&readers[reader], &borrow_form(*book.id()))
                    .await
                {
                    open.push((reader, *loan.id()));
                }
            } else {
                open.shuffle(&mut rng);
                if let Some((reader, id)) = open.pop() {
                    gateway.return_book(&readers[reader], &id, None).await?;
                }
            }
            let stock = gateway.book(book.id())?.unwrap();
            let available = *stock.available_quantity().as_ref();
            assert!((0..=3).contains(&available));
            assert_eq!(available as usize, 3 - open.len());
        }
        Ok(())
    }

    #[tokio::test]
    async fn overdue_loans_cannot_be_renewed() -> error_stack::Result<(), KernelError> {
        let gateway = InMemoryGateway::default();
        let reader = student(&gateway, "Amina");
        let book = gateway.seed_book(draft("Dune", "Frank Herbert", "Fiction", 1))?;
        let now = OffsetDateTime::now_utc();
        let loan = gateway.seed_borrowing(
            reader.user()?.id(),
            book.id(),
            now - Duration::days(16),
            now - Duration::days(1),
        )?;
        let refused = gateway
            .renew(&reader, loan.id(), &DueDate::new(now + Duration::days(14)))
            .await
            .unwrap_err();
        assert_eq!(
            refused.downcast_ref::<Rejection>(),
            Some(&Rejection::RenewOverdue)
        );
        Ok(())
    }
}
