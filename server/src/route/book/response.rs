use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{BookCopyDto, LedgerEntryDto};
use kernel::prelude::entity::LedgerTransaction;

use crate::controller::Exhaust;
use crate::route::ledger::{into_responses, LedgerEntryResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: Uuid,
    isbn_no: String,
    title: String,
    author: String,
    version: i32,
}

impl From<BookCopyDto> for BookResponse {
    fn from(value: BookCopyDto) -> Self {
        Self {
            id: value.id,
            isbn_no: value.isbn_no,
            title: value.title,
            author: value.author,
            version: value.version,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct CreatedResponse(BookResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BookCopyDto> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: BookCopyDto) -> Self::To {
        CreatedResponse(BookResponse::from(input))
    }
}

impl Exhaust<Option<BookCopyDto>> for Presenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<BookCopyDto>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<BookCopyDto>> for Presenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookCopyDto>) -> Self::To {
        Json::from(input.into_iter().map(BookResponse::from).collect::<Vec<_>>())
    }
}

impl Exhaust<Vec<LedgerEntryDto>> for Presenter {
    type To = Json<Vec<LedgerEntryResponse>>;
    fn emit(&self, input: Vec<LedgerEntryDto>) -> Self::To {
        Json::from(into_responses(input))
    }
}

impl Exhaust<LedgerTransaction> for Presenter {
    type To = (StatusCode, &'static str);
    fn emit(&self, input: LedgerTransaction) -> Self::To {
        let message = match input {
            LedgerTransaction::Borrow => "Borrowed book Successfully",
            LedgerTransaction::Return => "Returned book Successfully",
        };
        (StatusCode::OK, message)
    }
}
