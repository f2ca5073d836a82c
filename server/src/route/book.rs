mod request;
mod response;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    AddBookCopyService, GetAllBookCopyService, GetBookCopyService, GetLedgerService,
    HandleLedgerService,
};
use kernel::prelude::entity::LedgerTransaction;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Backend};
use crate::route::book::request::{
    CreateRequest, GetLedgerRequest, GetRequest, LedgerRequest, Transformer,
};
use crate::route::book::response::{BookResponse, Presenter};
use crate::route::page::PageRequest;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D: Backend> BookRouter for Router<AppModule<D>> {
    fn route_book(self) -> Self {
        self.route(
            "/book/add",
            post(
                |State(module): State<AppModule<D>>, Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.add_book_copy(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/book/",
            get(
                |State(module): State<AppModule<D>>, Query(req): Query<PageRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.get_all_book_copies(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/book/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.get_book_copy(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/book/:id/ledger",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetLedgerRequest::new(id))
                        .handle(|dto| async move { module.get_book_copy_ledger(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/book/borrow",
            post(
                |State(module): State<AppModule<D>>, Query(req): Query<LedgerRequest>| async move {
                    ledger_transaction(module, LedgerTransaction::Borrow, req).await
                },
            ),
        )
        .route(
            "/book/return",
            post(
                |State(module): State<AppModule<D>>, Query(req): Query<LedgerRequest>| async move {
                    ledger_transaction(module, LedgerTransaction::Return, req).await
                },
            ),
        )
    }
}

async fn ledger_transaction<D: Backend>(
    module: AppModule<D>,
    transaction: LedgerTransaction,
    req: LedgerRequest,
) -> Result<impl IntoResponse, ErrorStatus> {
    Controller::new(Transformer, Presenter)
        .intake((transaction, req))
        .handle(|dto| async move {
            let transaction = dto.transaction;
            module.handle_transaction(dto).await.map(|()| transaction)
        })
        .await
        .map_err(ErrorStatus::from)
}
