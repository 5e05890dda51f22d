use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RenewalCount(i32);

impl RenewalCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn incremented(self) -> Self {
        Self(self.0 + 1)
    }
}
