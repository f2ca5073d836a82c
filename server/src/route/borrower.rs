mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    AddBorrowerService, GetAllBorrowerService, GetBorrowerService, GetLedgerService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::route::borrower::request::{CreateRequest, GetLedgerRequest, GetRequest, Transformer};
use crate::route::borrower::response::{BorrowerResponse, Presenter};
use crate::route::page::PageRequest;

pub trait BorrowerRouter {
    fn route_borrower(self) -> Self;
}

impl<D: Backend> BorrowerRouter for Router<AppModule<D>> {
    fn route_borrower(self) -> Self {
        self.route(
            "/borrower/add",
            post(
                |State(module): State<AppModule<D>>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.add_borrower(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrower/",
            get(
                |State(module): State<AppModule<D>>, Query(req): Query<PageRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.get_all_borrowers(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrower/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.get_borrower(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BorrowerResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/borrower/:id/ledger",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetLedgerRequest::new(id))
                        .handle(|dto| async move { module.get_borrower_ledger(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
