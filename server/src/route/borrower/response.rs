use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{BorrowerDto, LedgerEntryDto};

use crate::controller::Exhaust;
use crate::route::ledger::{into_responses, LedgerEntryResponse};

#[derive(Debug, Serialize)]
pub struct BorrowerResponse {
    id: Uuid,
    name: String,
    email: String,
}

impl From<BorrowerDto> for BorrowerResponse {
    fn from(value: BorrowerDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
        }
    }
}

impl IntoResponse for BorrowerResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct CreatedResponse(BorrowerResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BorrowerDto> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: BorrowerDto) -> Self::To {
        CreatedResponse(BorrowerResponse::from(input))
    }
}

impl Exhaust<Option<BorrowerDto>> for Presenter {
    type To = Option<BorrowerResponse>;
    fn emit(&self, input: Option<BorrowerDto>) -> Self::To {
        input.map(BorrowerResponse::from)
    }
}

impl Exhaust<Vec<BorrowerDto>> for Presenter {
    type To = Json<Vec<BorrowerResponse>>;
    fn emit(&self, input: Vec<BorrowerDto>) -> Self::To {
        Json::from(input.into_iter().map(BorrowerResponse::from).collect::<Vec<_>>())
    }
}

impl Exhaust<Vec<LedgerEntryDto>> for Presenter {
    type To = Json<Vec<LedgerEntryResponse>>;
    fn emit(&self, input: Vec<LedgerEntryDto>) -> Self::To {
        Json::from(into_responses(input))
    }
}
