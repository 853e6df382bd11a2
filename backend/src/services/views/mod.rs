//! # HTML Views
//!
//! Server-rendered pages for browsing and editing teachers and universities.
//! Every form posts back to the server, which validates through `crate::domain`
//! and answers with a `303` redirect carrying a flash message.
//!
//! ## Registered Routes:
//!
//! *   **`GET /`**, **`POST /search_by_date`**: teacher table, optionally filtered by birth date.
//! *   **`GET|POST /add_teacher`**, **`GET /update_teacher/{id}`**, **`POST /update_teacher`**,
//!     **`POST /delete_teacher/{id}`**: teacher forms and actions.
//! *   **`GET /universities`**: university table. Refreshes average salaries.
//! *   **`GET|POST /add_university`**, **`GET /update_university/{id}`**,
//!     **`POST /update_university`**, **`POST /delete_university/{id}`**: university forms and actions.
//! *   **`GET /static/{file}`**: stylesheet and other assets embedded in the binary.

pub mod flash;
pub mod render;
mod teachers;
mod universities;

use crate::services::views::render::{Context, RenderError};
use actix_web::web::{get, post, resource, scope};
use actix_web::{web, HttpResponse, Scope};
use common::model::University;
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Configures and returns the scope holding every HTML route.
pub fn configure_routes() -> Scope {
    scope("")
        .service(
            resource("/")
                .route(get().to(teachers::index)),
        )
        .service(
            resource("/add_teacher")
                .route(get().to(teachers::add_form))
                .route(post().to(teachers::add)),
        )
        .route("/update_teacher/{id}", get().to(teachers::update_form))
        .route("/update_teacher", post().to(teachers::update))
        .route("/search_by_date", post().to(teachers::search))
        .route("/delete_teacher/{id}", post().to(teachers::delete))
        .route("/universities", get().to(universities::index))
        .service(
            resource("/add_university")
                .route(get().to(universities::add_form))
                .route(post().to(universities::add)),
        )
        .route("/update_university/{id}", get().to(universities::update_form))
        .route("/update_university", post().to(universities::update))
        .route("/delete_university/{id}", post().to(universities::delete))
        .route("/static/{file:.*}", get().to(serve_static))
}

/// `<option>` list of universities; `selected` marks the current one.
fn university_options(all: &[University], selected: Option<i64>) -> Result<String, RenderError> {
    render::render_each("partials/university_option.html", all, |u| {
        let marker = if Some(u.id) == selected { "selected" } else { "" };
        Context::new().text("name", &u.name).text("selected", marker)
    })
}

async fn serve_static(file: web::Path<String>) -> HttpResponse {
    let file_path = file.into_inner();
    match STATIC_DIR.get_file(&file_path) {
        Some(found) => {
            let mime = from_path(&file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(found.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}
