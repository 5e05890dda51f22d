mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{CreateReviewService, GetBookDetailService, GetCatalogueService};

use self::request::{CreateReviewRequest, GetBookRequest, GetCatalogueRequest, Transformer};
use self::response::Presenter;
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::session::CurrentSession;

pub(crate) use self::response::BookResponse;

pub trait CatalogueRouter {
    fn route_catalogue(self) -> Self;
}

impl CatalogueRouter for Router<AppModule> {
    fn route_catalogue(self) -> Self {
        self.route(
            "/catalogue",
            get(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Query(req): Query<GetCatalogueRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.get_catalogue(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/livre/:id",
            get(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.get_book_detail(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/livre/:id/reviews",
            post(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>,
                 Json(req): Json<CreateReviewRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.create_review(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
