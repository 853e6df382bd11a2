use crate::db::Database;
use crate::domain::validation::salary_from_form;
use crate::domain::{teachers, universities};
use crate::error::ServiceError;
use crate::services::views::flash::{self, Flash};
use crate::services::views::render::{self, Context};
use crate::services::views::university_options;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::model::{Teacher, DATE_FORMAT};
use common::requests::{DateRangeRequest, TeacherPayload};
use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

/// Fields of the add/update teacher forms. Every field may be left blank.
#[derive(Debug, Default, Deserialize)]
pub struct TeacherForm {
    pub teacher_id: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub salary: Option<String>,
    pub university: Option<String>,
}

impl TeacherForm {
    fn to_payload(&self) -> TeacherPayload {
        TeacherPayload {
            name: self.name.clone().map(Value::String),
            last_name: self.last_name.clone().map(Value::String),
            birth_date: self.birth_date.clone().map(Value::String),
            salary: self.salary.as_deref().map(salary_from_form),
            university: self.university.clone().map(Value::String),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DateRangeForm {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

fn teacher_rows(teachers: &[Teacher]) -> Result<String, render::RenderError> {
    render::render_each("partials/teacher_row.html", teachers, |t| {
        Context::new()
            .text("id", t.id.to_string())
            .text("name", &t.name)
            .text("last_name", &t.last_name)
            .text("birth_date", t.birth_date.format(DATE_FORMAT).to_string())
            .text("salary", t.salary.to_string())
            .text("university", &t.university.name)
    })
}

fn teachers_page(req: &HttpRequest, teachers: &[Teacher], notice: Option<Flash>) -> HttpResponse {
    let rows = match teacher_rows(teachers) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to render teacher rows: {}", e);
            return HttpResponse::InternalServerError().body("Failed to render page");
        }
    };
    let ctx = Context::new().html("rows", rows);
    match notice {
        Some(notice) => render::page_with_notice(req, "Teachers", "teachers.html", ctx, notice),
        None => render::page(req, "Teachers", "teachers.html", ctx),
    }
}

/// `GET /`
pub async fn index(req: HttpRequest, db: web::Data<Database>) -> impl Responder {
    debug!("Route teachers.html is rendered.");
    match teachers::list(&db) {
        Ok(all) => teachers_page(&req, &all, None),
        Err(e) => {
            error!("Error of reading teachers from db: {}", e);
            teachers_page(&req, &[], Some(Flash::error(e.user_message())))
        }
    }
}

/// `GET /add_teacher`
pub async fn add_form(req: HttpRequest, db: web::Data<Database>) -> impl Responder {
    debug!("Route create new teacher is rendered");
    match universities::list(&db) {
        Ok(all) => match university_options(&all, None) {
            Ok(options) => render::page(
                &req,
                "Add teacher",
                "add_teacher.html",
                Context::new().html("university_options", options),
            ),
            Err(e) => {
                error!("Failed to render university options: {}", e);
                HttpResponse::InternalServerError().body("Failed to render page")
            }
        },
        Err(e) => {
            error!("Error of reading universities from db: {}", e);
            flash::redirect("/", Flash::error(e.user_message()))
        }
    }
}

/// `POST /add_teacher`
pub async fn add(db: web::Data<Database>, form: web::Form<TeacherForm>) -> impl Responder {
    debug!("User click to submit new teacher");
    match teachers::create(&db, &form.to_payload()) {
        Ok(teacher) => {
            debug!("Teacher {} was successfully added.", teacher.id);
            flash::redirect("/", Flash::success("Teacher was added."))
        }
        Err(e) => {
            log_failure(&e);
            flash::redirect("/add_teacher", Flash::error(e.user_message()))
        }
    }
}

/// `GET /update_teacher/{id}`
pub async fn update_form(
    req: HttpRequest,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> impl Responder {
    let id = id.into_inner();
    debug!("User click to update teacher with id {}", id);

    let loaded = teachers::get(&db, id).and_then(|t| Ok((t, universities::list(&db)?)));
    let (teacher, all) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            log_failure(&e);
            return flash::redirect("/", Flash::error(e.user_message()));
        }
    };

    match university_options(&all, Some(teacher.university.id)) {
        Ok(options) => render::page(
            &req,
            "Update teacher",
            "update_teacher.html",
            Context::new()
                .text("id", teacher.id.to_string())
                .text("name", &teacher.name)
                .text("last_name", &teacher.last_name)
                .text("birth_date", teacher.birth_date.format(DATE_FORMAT).to_string())
                .text("salary", teacher.salary.to_string())
                .html("university_options", options),
        ),
        Err(e) => {
            error!("Failed to render university options: {}", e);
            HttpResponse::InternalServerError().body("Failed to render page")
        }
    }
}

/// `POST /update_teacher`
pub async fn update(db: web::Data<Database>, form: web::Form<TeacherForm>) -> impl Responder {
    debug!("User click to update teacher");
    let Some(id) = form
        .teacher_id
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
    else {
        return flash::redirect("/", Flash::error("Wrong teacher id."));
    };

    match teachers::update(&db, id, &form.to_payload()) {
        Ok(_) => {
            debug!("Teacher {} was successfully updated.", id);
            flash::redirect("/", Flash::success("Teacher was updated."))
        }
        Err(e) => {
            log_failure(&e);
            flash::redirect(&format!("/update_teacher/{id}"), Flash::error(e.user_message()))
        }
    }
}

/// `POST /search_by_date`
pub async fn search(
    req: HttpRequest,
    db: web::Data<Database>,
    form: web::Form<DateRangeForm>,
) -> impl Responder {
    debug!("User click to search teachers in date intervals");
    let range = DateRangeRequest {
        date_from: form.date_from.clone().map(Value::String),
        date_to: form.date_to.clone().map(Value::String),
    };
    match teachers::search_by_birth_date(&db, &range) {
        Ok(found) => {
            debug!("{} teachers were found in the date interval.", found.len());
            teachers_page(&req, &found, None)
        }
        Err(e) => {
            log_failure(&e);
            flash::redirect("/", Flash::error(e.user_message()))
        }
    }
}

/// `POST /delete_teacher/{id}`
pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User click delete teacher with id {}.", id);
    match teachers::delete(&db, id) {
        Ok(_) => flash::redirect("/", Flash::success("Teacher was deleted.")),
        Err(e) => {
            log_failure(&e);
            flash::redirect("/", Flash::error(e.user_message()))
        }
    }
}

fn log_failure(err: &ServiceError) {
    match err {
        ServiceError::Persistence(e) => error!("Teacher write failed: {}", e),
        other => debug!("Teacher request rejected: {}", other),
    }
}
