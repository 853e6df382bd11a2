//! # JSON API
//!
//! REST endpoints mirroring the HTML views, mounted under `/api`.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/`**, **`POST /api/`**: list teachers / create a teacher.
//! *   **`GET|PATCH|DELETE /api/{id}`**: read, partially update or delete a teacher.
//! *   **`POST /api/search_by_date`**: teachers born between `date_from` and `date_to`.
//! *   **`GET /api/university`**, **`POST /api/university`**: list (refreshing average
//!     salaries) / create a university.
//! *   **`GET|PATCH|DELETE /api/university/{id}`**: read, partially update or delete a university.
//!
//! Successful calls answer with the entity as JSON. Failures answer with
//! `{"error": {"message", "status"}}` and the same HTTP status as in the body.

mod teachers;
mod universities;

use crate::error::{ServiceError, ServiceResult};
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::web::{delete, get, patch, post, resource, scope};
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use common::responses::ErrorEnvelope;
use log::{debug, error};
use serde::Serialize;

const API_PATH: &str = "/api";

/// Configures and returns the Actix `Scope` for all API routes.
///
/// University routes are registered before `/{id}` so they are never taken
/// for a teacher id.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .service(
            resource("/university")
                .route(get().to(universities::list))
                .route(post().to(universities::create)),
        )
        .service(
            resource("/university/{id}")
                .route(get().to(universities::read))
                .route(patch().to(universities::update))
                .route(delete().to(universities::delete)),
        )
        .service(resource("/search_by_date").route(post().to(teachers::search_by_date)))
        .service(
            resource("/")
                .route(get().to(teachers::list))
                .route(post().to(teachers::create)),
        )
        .service(
            resource("/{id}")
                .route(get().to(teachers::read))
                .route(patch().to(teachers::update))
                .route(delete().to(teachers::delete)),
        )
}

/// JSON extractor settings: body size limit, and malformed bodies reported
/// through the error envelope.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            debug!("Rejected JSON body: {}", err);
            let response = HttpResponse::BadRequest()
                .json(ErrorEnvelope::new("Request body is not valid JSON.", 400));
            InternalError::from_response(err, response).into()
        })
}

fn error_response(err: ServiceError) -> HttpResponse {
    if let ServiceError::Persistence(e) = &err {
        error!("Database write failed: {}", e);
    } else {
        debug!("User entered incorrect data: {}", err);
    }
    let status = err.status();
    HttpResponse::build(StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST))
        .json(ErrorEnvelope::new(err.user_message(), status))
}

fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => error_response(err),
    }
}
