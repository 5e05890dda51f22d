use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReviewComment(String);

impl ReviewComment {
    pub fn new(comment: impl Into<String>) -> Self {
        Self(comment.into())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct IsApproved(bool);

impl IsApproved {
    pub fn new(approved: impl Into<bool>) -> Self {
        Self(approved.into())
    }
}
