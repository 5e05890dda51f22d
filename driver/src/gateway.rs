mod http;
mod memory;

pub use self::{http::*, memory::*};
