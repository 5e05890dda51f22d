mod book;
mod borrowing;
mod review;
mod user;

pub use self::{book::*, borrowing::*, review::*, user::*};
