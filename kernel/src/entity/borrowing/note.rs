use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct BorrowingNote(String);

impl BorrowingNote {
    pub fn new(note: impl Into<String>) -> Self {
        Self(note.into())
    }
}
