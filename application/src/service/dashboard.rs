use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::query::{
    BookQuery, BorrowingQuery, DependOnBookQuery, DependOnBorrowingQuery, DependOnUserQuery,
    UserQuery,
};
use kernel::prelude::dashboard::{
    BookFigures, BorrowingFigures, DashboardStats, DependOnDashboardCache, UserFigures,
};
use kernel::prelude::entity::Session;
use kernel::KernelError;

#[async_trait::async_trait]
pub trait GetDashboardService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnUserQuery
    + DependOnBorrowingQuery
    + DependOnDashboardCache
{
    /// Fetches the three collections concurrently. A failed fetch degrades to
    /// the last figures seen or to zeros; a lost or refused session aborts the page.
    async fn get_dashboard(
        &self,
        session: &Session,
    ) -> error_stack::Result<DashboardStats, KernelError> {
        session.require_admin()?;
        let (books, users, borrowings) = tokio::join!(
            self.book_query().find_all(session),
            self.user_query().find_all(session),
            self.borrowing_query().find_all(session)
        );
        signed_out(&books)?;
        signed_out(&users)?;
        signed_out(&borrowings)?;

        let now = OffsetDateTime::now_utc();
        let cache = self.dashboard_cache();
        Ok(DashboardStats {
            books: cache.resolve_books(books.map(|books| BookFigures::from_books(&books))),
            users: cache.resolve_users(users.map(|users| UserFigures::from_users(&users))),
            borrowings: cache.resolve_borrowings(
                borrowings.map(|borrowings| BorrowingFigures::from_borrowings(&borrowings, now)),
            ),
        })
    }
}

impl<T> GetDashboardService for T where
    T: DependOnBookQuery + DependOnUserQuery + DependOnBorrowingQuery + DependOnDashboardCache
{
}

fn signed_out<T>(fetched: &error_stack::Result<T, KernelError>) -> error_stack::Result<(), KernelError> {
    match fetched {
        Err(report) => match report.current_context() {
            KernelError::Unauthenticated => Err(Report::new(KernelError::Unauthenticated)
                .attach_printable("session rejected while loading the dashboard")),
            // A refused fetch must not be answered from figures another admin loaded.
            KernelError::Forbidden => Err(Report::new(KernelError::Forbidden)
                .attach_printable("backend refused the dashboard to this session")),
            _ => Ok(()),
        },
        Ok(_) => Ok(()),
    }
}
