use crate::db::Database;
use crate::domain::teachers;
use crate::services::api::respond;
use actix_web::{web, Responder};
use common::requests::{DateRangeRequest, TeacherPayload};
use log::debug;

/// `GET /api/`
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    debug!("Api show all teachers in database.");
    respond(teachers::list(&db))
}

/// `GET /api/{id}`
pub(crate) async fn read(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User get teacher with id {} in REST-API", id);
    respond(teachers::get(&db, id))
}

/// `POST /api/`
pub(crate) async fn create(
    db: web::Data<Database>,
    payload: web::Json<TeacherPayload>,
) -> impl Responder {
    debug!("User make post method add_teacher in REST-API");
    respond(teachers::create(&db, &payload))
}

/// `PATCH /api/{id}`
pub(crate) async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<TeacherPayload>,
) -> impl Responder {
    let id = id.into_inner();
    debug!("User make patch method update_teacher with id {} in REST-API", id);
    respond(teachers::update(&db, id, &payload))
}

/// `DELETE /api/{id}`
pub(crate) async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User make delete method delete_teacher with id {} in REST-API", id);
    respond(teachers::delete(&db, id))
}

/// `POST /api/search_by_date`
pub(crate) async fn search_by_date(
    db: web::Data<Database>,
    range: web::Json<DateRangeRequest>,
) -> impl Responder {
    debug!("User make post method search_by_date in REST-API");
    respond(teachers::search_by_birth_date(&db, &range))
}
