mod request;
mod response;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use application::service::{
    BorrowBookService, GetMyBorrowingsService, RenewBorrowingService, ReturnBorrowingService,
};

use self::request::{CreateBorrowingRequest, RenewRequest, ReturnRequest, Transformer};
use self::response::{CreatedPresenter, Presenter};
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::session::CurrentSession;

pub trait BorrowingRouter {
    fn route_borrowing(self) -> Self;
}

impl BorrowingRouter for Router<AppModule> {
    fn route_borrowing(self) -> Self {
        self.route(
            "/mes-emprunts",
            get(
                |State(module): State<AppModule>, CurrentSession(session): CurrentSession| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_my_borrowings(&session).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings",
            post(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Json(req): Json<CreateBorrowingRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.borrow_book(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id/renew",
            put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>,
                 req: Option<Json<RenewRequest>>| async move {
                    let req = req.map(|Json(req)| req).unwrap_or_default();
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.renew_borrowing(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowings/:id/return",
            put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>,
                 req: Option<Json<ReturnRequest>>| async move {
                    let req = req.map(|Json(req)| req).unwrap_or_default();
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.return_borrowing(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
