use serde::{Deserialize, Serialize};

/// Borrowing and review figures of one user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_borrowings: i64,
    pub active_borrowings: i64,
    pub overdue_borrowings: i64,
    pub returned_borrowings: i64,
    pub reviews_written: i64,
}
