use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectLimit(i32);

impl SelectLimit {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectLimit(value.into())
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(30)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct SelectOffset(i32);

impl SelectOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectOffset(value.into())
    }
}

/// Cuts one page out of an already filtered list.
pub fn paginate<T: Clone>(items: &[T], limit: &SelectLimit, offset: &SelectOffset) -> Vec<T> {
    let offset = usize::try_from(*offset.as_ref()).unwrap_or(0);
    let limit = usize::try_from(*limit.as_ref()).unwrap_or(0);
    items.iter().skip(offset).take(limit).cloned().collect()
}
