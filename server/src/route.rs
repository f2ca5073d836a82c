mod book;
mod borrower;
mod field;
mod ledger;
mod page;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::describe_request;
use crate::handler::{AppModule, Backend};

pub use self::{book::*, borrower::*};

pub fn router<D: Backend>(app: AppModule<D>) -> Router {
    Router::<AppModule<D>>::new()
        .route_book()
        .route_borrower()
        .layer(middleware::from_fn(describe_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app)
}
