use actix_web::{HttpRequest, HttpResponse};
use crate::api;

pub async fn get(req: HttpRequest) -> HttpResponse {
    api::not_found(format!("no such path: {}", req.path()))
}
