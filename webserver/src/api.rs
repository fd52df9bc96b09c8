use actix_web::dev::HttpServiceFactory;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

pub mod notfound;
mod schedule;
mod skill;

pub const HANDLE_SKILL: &str = "handle skill request";
pub const LIST_SCHEDULES: &str = "list schedules";
pub const GET_SCHEDULE: &str = "get schedule";

pub fn service(api_path: &str) -> impl HttpServiceFactory {
    web::scope(api_path)
        .service(web::resource("/skill").name(HANDLE_SKILL).post(skill::post))
        .service(web::resource("/schedule").name(LIST_SCHEDULES)
                 .get(schedule::list))
        .service(web::resource("/schedule/{name}").name(GET_SCHEDULE)
                 .get(schedule::get))
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn not_found(error: String) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody { error })
}

/// Malformed request bodies get a JSON error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let resp = HttpResponse::BadRequest()
        .json(ErrorBody { error: err.to_string() });
    InternalError::from_response(err, resp).into()
}
