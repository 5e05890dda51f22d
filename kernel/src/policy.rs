//! Loan rules shared by the catalogue, the borrowing pages and the backend doubles.

use time::{Date, Duration, OffsetDateTime};

/// How many times a single borrowing may be extended.
pub const MAX_RENEWALS: i32 = 2;

/// Extension granted by one renewal, counted from the moment of the renewal.
pub const RENEWAL_PERIOD: Duration = Duration::days(14);

/// Loan length suggested when a borrow form is opened.
pub const LOAN_PERIOD: Duration = Duration::days(15);

/// Active borrowings due within this window are flagged as due soon.
pub const DUE_SOON_WINDOW: Duration = Duration::days(3);

const SECONDS_PER_DAY: i64 = 86_400;

pub fn suggested_due_date(today: Date) -> Date {
    today.saturating_add(LOAN_PERIOD)
}

pub fn renewed_due_date(now: OffsetDateTime) -> OffsetDateTime {
    now + RENEWAL_PERIOD
}

/// Whole days elapsed since `due`, rounded up. Sub-second remainders are ignored.
pub fn days_past(due: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let seconds = (now - due).whole_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}
