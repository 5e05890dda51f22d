mod admin;
mod auth;
mod borrowing;
mod catalogue;
mod profile;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::handler::AppModule;

pub use self::{
    admin::AdminRouter, auth::AuthRouter, borrowing::BorrowingRouter,
    catalogue::CatalogueRouter, profile::ProfileRouter,
};

pub trait HealthRouter {
    fn route_health(self) -> Self;
}

impl HealthRouter for Router<AppModule> {
    fn route_health(self) -> Self {
        self.route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
    }
}
