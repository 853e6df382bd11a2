use crate::db::Database;
use crate::domain::universities;
use crate::services::api::respond;
use actix_web::{web, Responder};
use common::requests::UniversityPayload;
use log::debug;

/// `GET /api/university`
pub(crate) async fn list(db: web::Data<Database>) -> impl Responder {
    debug!("User get universities in REST-API");
    respond(universities::list(&db))
}

/// `GET /api/university/{id}`
pub(crate) async fn read(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User get university with id {} in REST-API", id);
    respond(universities::get(&db, id))
}

/// `POST /api/university`
pub(crate) async fn create(
    db: web::Data<Database>,
    payload: web::Json<UniversityPayload>,
) -> impl Responder {
    debug!("User make post method to create new university in REST-API");
    respond(universities::create(&db, &payload))
}

/// `PATCH /api/university/{id}`
pub(crate) async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<UniversityPayload>,
) -> impl Responder {
    let id = id.into_inner();
    debug!("User make method patch to update university {} in REST-API", id);
    respond(universities::update(&db, id, &payload))
}

/// `DELETE /api/university/{id}`
pub(crate) async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> impl Responder {
    let id = id.into_inner();
    debug!("User make delete method to delete university {} in REST-API", id);
    respond(universities::delete(&db, id))
}
