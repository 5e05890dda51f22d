mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};

use application::service::{
    CreateBookService, CreateUserService, DeleteBookService, DeleteUserService,
    GetDashboardService, ListBooksService, ListUsersService, UpdateBookService,
    UpdateUserService,
};

use self::request::{
    BookFormRequest, CreateUserRequest, DeleteBookRequest, DeleteUserRequest, SearchQuery,
    Transformer, UpdateUserRequest,
};
use self::response::{CreatedPresenter, Presenter};
use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::session::CurrentSession;

pub trait AdminRouter {
    fn route_admin(self) -> Self;
}

impl AdminRouter for Router<AppModule> {
    fn route_admin(self) -> Self {
        self.route(
            "/admin",
            get(
                |State(module): State<AppModule>, CurrentSession(session): CurrentSession| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.get_dashboard(&session).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/books",
            get(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Query(query): Query<SearchQuery>| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.list_books(&session, query.search).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Json(req): Json<BookFormRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_book(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/books/:id",
            put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>,
                 Json(req): Json<BookFormRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_book(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteBookRequest(id))
                        .handle(|dto| async move { module.delete_book(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/users",
            get(
                |State(module): State<AppModule>, CurrentSession(session): CurrentSession| async move {
                    Controller::new((), Presenter)
                        .bypass(|| async move { module.list_users(&session).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Json(req): Json<CreateUserRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/admin/users/:id",
            put(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>,
                 Json(req): Json<UpdateUserRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 CurrentSession(session): CurrentSession,
                 Path(id): Path<i64>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteUserRequest(id))
                        .handle(|dto| async move { module.delete_user(&session, dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
