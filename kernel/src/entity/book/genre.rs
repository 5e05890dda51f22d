use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Genre(String);

impl Genre {
    pub fn new(genre: impl Into<String>) -> Self {
        Self(genre.into())
    }
}
