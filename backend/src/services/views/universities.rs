use crate::db::Database;
use crate::domain::universities;
use crate::error::ServiceError;
use crate::services::views::flash::{self, Flash};
use crate::services::views::render::{self, Context};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::UniversityPayload;
use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

/// Fields of the add/update university forms.
#[derive(Debug, Default, Deserialize)]
pub struct UniversityForm {
    pub university_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}

impl UniversityForm {
    fn to_payload(&self) -> UniversityPayload {
        UniversityPayload {
            name: self.name.clone().map(Value::String),
            location: self.location.clone().map(Value::String),
        }
    }
}

/// `GET /universities`
///
/// Listing refreshes every university's average salary.
pub async fn index(req: HttpRequest, db: web::Data<Database>) -> impl Responder {
    debug!("university page was shown");
    let all = match universities::list(&db) {
        Ok(all) => all,
        Err(e) => {
            error!("Error of reading Universities from db: {}", e);
            return flash::redirect(
                "/",
                Flash::error("Error of reading universities from the database."),
            );
        }
    };

    let rows = render::render_each("partials/university_row.html", &all, |u| {
        Context::new()
            .text("id", u.id.to_string())
            .text("name", &u.name)
            .text("location", &u.location)
            .text("average_salary", u.average_salary.to_string())
    });
    match rows {
        Ok(rows) => render::page(
            &req,
            "Universities",
            "universities.html",
            Context::new().html("rows", rows),
        ),
        Err(e) => {
            error!("Failed to render university rows: {}", e);
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}

/// `GET /add_university`
pub async fn add_form(req: HttpRequest) -> impl Responder {
    debug!("Page add_university.html was shown.");
    render::page(&req, "Add university", "add_university.html", Context::new())
}

/// `POST /add_university`
pub async fn add(db: web::Data<Database>, form: web::Form<UniversityForm>) -> impl Responder {
    debug!("User click submit button to create new university.");
    match universities::create(&db, &form.to_payload()) {
        Ok(university) => {
            debug!("University {} was added", university.id);
            flash::redirect("/universities", Flash::success("University was added."))
        }
        Err(e) => {
            log_failure(&e);
            flash::redirect("/add_university", Flash::error(e.user_message()))
        }
    }
}

/// `GET /update_university/{id}`
pub async fn update_form(
    req: HttpRequest,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    debug!("Page update_university was shown with university id {}", id);
    match universities::get(&db, id) {
        Ok(university) => render::page(
            &req,
            "Update university",
            "update_university.html",
            Context::new()
                .text("id", university.id.to_string())
                .text("name", &university.name)
                .text("location", &university.location),
        ),
        Err(e) => {
            log_failure(&e);
            flash::redirect("/universities", Flash::error(e.user_message()))
        }
    }
}

/// `POST /update_university`
pub async fn update(db: web::Data<Database>, form: web::Form<UniversityForm>) -> impl Responder {
    debug!("User click to update university");
    let Some(id) = form
        .university_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
    else {
        return flash::redirect("/universities", Flash::error("Wrong university id."));
    };

    match universities::update(&db, id, &form.to_payload()) {
        Ok(_) => {
            debug!("University {} was updated", id);
            flash::redirect("/universities", Flash::success("University was updated."))
        }
        Err(e) => {
            log_failure(&e);
            flash::redirect(
                &format!("/update_university/{id}"),
                Flash::error(e.user_message()),
            )
        }
    }
}

/// `POST /delete_university/{id}`
pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User click to delete university with id {}", id);
    match universities::delete(&db, id) {
        Ok(_) => flash::redirect("/universities", Flash::success("University was deleted.")),
        Err(e) => {
            log_failure(&e);
            flash::redirect("/universities", Flash::error(e.user_message()))
        }
    }
}

fn log_failure(err: &ServiceError) {
    match err {
        ServiceError::Persistence(e) => error!("University write failed: {}", e),
        other => debug!("University request rejected: {}", other),
    }
}
