use actix_web::{web, Responder};
use sinoclock::skill::SkillRequest;
use crate::server;

pub async fn post(data: web::Data<server::State>, req: web::Json<SkillRequest>)
-> actix_web::Result<impl Responder> {
    Ok(web::Json(data.router.handle(&req)))
}
