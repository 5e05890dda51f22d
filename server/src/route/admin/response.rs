use axum::http::StatusCode;
use axum::Json;

use application::transfer::{BookDto, UserDto};
use kernel::prelude::dashboard::DashboardStats;

use crate::controller::Exhaust;
use crate::route::catalogue::BookResponse;
use crate::route::profile::UserResponse;

pub struct Presenter;

impl Exhaust<DashboardStats> for Presenter {
    type To = Json<DashboardStats>;
    fn emit(&self, output: DashboardStats) -> Self::To {
        Json(output)
    }
}

impl Exhaust<Vec<BookDto>> for Presenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, output: Vec<BookDto>) -> Self::To {
        Json(output.into_iter().map(BookResponse::from).collect())
    }
}

impl Exhaust<BookDto> for Presenter {
    type To = Json<BookResponse>;
    fn emit(&self, output: BookDto) -> Self::To {
        Json(BookResponse::from(output))
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = Json<Vec<UserResponse>>;
    fn emit(&self, output: Vec<UserDto>) -> Self::To {
        Json(output.into_iter().map(UserResponse::from).collect())
    }
}

impl Exhaust<UserDto> for Presenter {
    type To = Json<UserResponse>;
    fn emit(&self, output: UserDto) -> Self::To {
        Json(UserResponse::from(output))
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

pub struct CreatedPresenter;

impl Exhaust<BookDto> for CreatedPresenter {
    type To = (StatusCode, Json<BookResponse>);
    fn emit(&self, output: BookDto) -> Self::To {
        (StatusCode::CREATED, Json(BookResponse::from(output)))
    }
}

impl Exhaust<UserDto> for CreatedPresenter {
    type To = (StatusCode, Json<UserResponse>);
    fn emit(&self, output: UserDto) -> Self::To {
        (StatusCode::CREATED, Json(UserResponse::from(output)))
    }
}
