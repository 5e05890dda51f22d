use serde::{Deserialize, Serialize};
use vodca::AsRefln;

use crate::{KernelError, Rejection};

/// Star rating, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, AsRefln)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn new(rating: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let rating = rating.into();
        if (Self::MIN..=Self::MAX).contains(&rating) {
            Ok(Self(rating))
        } else {
            Err(Rejection::InvalidRating(rating).into_report())
        }
    }
}

impl TryFrom<i32> for Rating {
    type Error = Rejection;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Rejection::InvalidRating(value))
        }
    }
}

impl From<Rating> for i32 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_and_six_are_refused() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(*Rating::new(5).unwrap().as_ref(), 5);
    }
}
