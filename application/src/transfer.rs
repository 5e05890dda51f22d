mod auth;
mod book;
mod borrowing;
mod review;
mod user;

pub use self::{auth::*, book::*, borrowing::*, review::*, user::*};
