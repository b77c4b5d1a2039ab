use rocket::serde::json::Json;
use serde::Serialize;

pub mod github;

/// Static status body for the health routes, matching `{"status": "ok"}` on the wire.
#[derive(Serialize)]
pub struct ServiceStatus {
    status: &'static str,
}

impl ServiceStatus {
    pub(crate) fn ok() -> Json<ServiceStatus> {
        Json(ServiceStatus { status: "ok" })
    }
}

#[rocket::get("/api/health")]
pub fn health() -> Json<ServiceStatus> {
    ServiceStatus::ok()
}

pub fn routes() -> Vec<rocket::Route> {
    rocket::routes![
        health,
        github::github_webhook,
        github::github_status,
        github::github_put,
        github::github_delete,
        github::github_patch,
    ]
}
