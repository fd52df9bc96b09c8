use actix_web::error::ErrorInternalServerError;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sinoclock::util::query::{self, ScheduleStatus};
use crate::{api, server};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInfo {
    #[serde(flatten)]
    status: ScheduleStatus,
    /// Start of the next or active occurrence, RFC 3339.
    starts_at: String,
}

fn info(data: &server::State, name: &str)
-> actix_web::Result<Option<ScheduleInfo>> {
    let Some(schedule) = data.router.schedules().get(name) else {
        return Ok(None)
    };
    let now = data.router.now();
    let status = query::status(schedule, now)
        .map_err(ErrorInternalServerError)?;
    let starts_at = query::occurrence_start(&status, now).to_rfc3339();
    Ok(Some(ScheduleInfo { status, starts_at }))
}

pub async fn list(data: web::Data<server::State>)
-> actix_web::Result<HttpResponse> {
    let names: Vec<&str> = data.router.schedules().iter()
        .map(|s| s.name.as_str())
        .collect();
    let mut infos = Vec::with_capacity(names.len());
    for name in names {
        infos.extend(info(&data, name)?);
    }
    Ok(HttpResponse::Ok().json(infos))
}

pub async fn get(data: web::Data<server::State>, path: web::Path<String>)
-> actix_web::Result<HttpResponse> {
    let name = path.into_inner();
    Ok(match info(&data, &name)? {
        Some(info) => HttpResponse::Ok().json(info),
        None => api::not_found(format!("unknown schedule: {name}")),
    })
}
