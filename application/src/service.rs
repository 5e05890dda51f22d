mod admin;
mod auth;
mod borrowing;
mod catalogue;
mod dashboard;
mod profile;
mod review;

pub use self::{
    admin::*, auth::*, borrowing::*, catalogue::*, dashboard::*, profile::*, review::*,
};
