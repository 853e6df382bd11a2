//! HTTP adapters.
//!
//! - `api`: JSON endpoints under `/api`.
//! - `views`: server-rendered HTML pages and embedded static assets.

pub mod api;
pub mod views;

use actix_web::web;

/// Registers every route. The API scope must come first: the views scope is
/// mounted at the root and would otherwise claim `/api/...` paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api::configure_routes())
        .service(views::configure_routes());
}
