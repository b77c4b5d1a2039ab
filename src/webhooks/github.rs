use std::io;

use anyhow::anyhow;
use rocket::{
    data::{ByteUnit, FromData, Outcome},
    http::{ContentType, Status},
    serde::json::Json,
    Data, Request, State,
};
use tracing::{debug, info, trace, warn};

use crate::{messages::handle_github_event, notifier::Notifier, webhooks::ServiceStatus};

pub mod events;
use events::{GitHubEvent, InboundEvent};

#[rocket::post("/api/github", data = "<payload>")]
pub async fn github_webhook(payload: GitHubPayload, notifier: &State<Notifier>) -> Status {
    let event = match payload.0.classify() {
        Some(event) => event,
        None => {
            debug!("payload is neither an issue nor a pull request, ignoring");
            return Status::Ok;
        }
    };

    match &event {
        GitHubEvent::Issues(event) => {
            info!("received issue event: {} {}", event.action, event.issue)
        }
        GitHubEvent::PullRequest(event) => info!(
            "received pull request event: {} {}",
            event.action, event.pull_request
        ),
    }

    let message = match handle_github_event(event) {
        Some(message) => message,
        None => {
            trace!("event didn't need to be announced");
            return Status::Ok;
        }
    };

    // delivery is best-effort: GitHub must see a successful delivery either way, or it
    // starts retrying on its own
    if let Err(err) = notifier.send(&message).await {
        warn!("failed to deliver notification: {:#}", err);
    }

    Status::Ok
}

/// The original deployment answered its health checks on the handler path too.
#[rocket::get("/api/github")]
pub fn github_status() -> Json<ServiceStatus> {
    ServiceStatus::ok()
}

#[rocket::put("/api/github")]
pub fn github_put() -> Status {
    Status::MethodNotAllowed
}

#[rocket::delete("/api/github")]
pub fn github_delete() -> Status {
    Status::MethodNotAllowed
}

#[rocket::patch("/api/github")]
pub fn github_patch() -> Status {
    Status::MethodNotAllowed
}

pub struct GitHubPayload(pub InboundEvent);

const LIMIT: ByteUnit = ByteUnit::Mebibyte(1);

// Reads and parses the raw body ourselves instead of using Json<InboundEvent>: an unparseable
// payload must surface as a 500, not rocket's default 422.
#[rocket::async_trait]
impl<'r> FromData<'r> for GitHubPayload {
    type Error = anyhow::Error;

    async fn from_data(request: &'r Request<'_>, data: Data<'r>) -> Outcome<'r, Self> {
        trace!("received payload on GitHub webhook endpoint: {:?}", request);

        let json_ct = ContentType::new("application", "json");
        if request.content_type() != Some(&json_ct) {
            trace!(
                "content type `{:?}` wasn't json, stopping here...",
                request.content_type()
            );
            return Outcome::Error((Status::BadRequest, anyhow!("wrong content type")));
        }

        let size_limit = request.limits().get("json").unwrap_or(LIMIT);
        let content = match data.open(size_limit).into_string().await {
            Ok(s) if s.is_complete() => s.into_inner(),
            Ok(_) => {
                let eof = io::ErrorKind::UnexpectedEof;
                trace!("payload was too big");
                return Outcome::Error((
                    Status::PayloadTooLarge,
                    io::Error::new(eof, "data limit exceeded").into(),
                ));
            }
            Err(e) => return Outcome::Error((Status::BadRequest, e.into())),
        };

        match serde_json::from_str(&content) {
            Ok(event) => Outcome::Success(GitHubPayload(event)),
            Err(e) => {
                debug!("couldn't parse webhook payload: {}", e);
                Outcome::Error((Status::InternalServerError, anyhow!(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::blocking::Client,
    };
    use url::Url;

    use crate::{notifier::Notifier, webhooks};

    fn client(destination: Option<Url>) -> Client {
        let notifier = Notifier::new(destination).unwrap();
        let rocket = rocket::build()
            .mount("/", webhooks::routes())
            .manage(notifier);
        Client::tracked(rocket).unwrap()
    }

    #[test]
    fn issue_event_is_acknowledged_without_a_destination() {
        let client = client(None);

        let response = client
            .post("/api/github")
            .header(ContentType::JSON)
            .body(
                r#"{"action":"opened","issue":{"title":"Bug X","html_url":"http://x/1","user":{"login":"alice"},"assignees":[]}}"#,
            )
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn delivery_failure_does_not_change_the_response() {
        // nothing listens on the discard port, so delivery fails with a connection error
        let destination = Url::parse("http://127.0.0.1:9/webhook").unwrap();
        let client = client(Some(destination));

        let response = client
            .post("/api/github")
            .header(ContentType::JSON)
            .body(
                r#"{"action":"closed","pull_request":{"title":"Fix Y","html_url":"http://x/2","merged":true,"merged_by":{"login":"bob"}}}"#,
            )
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn unsupported_event_kinds_are_acknowledged() {
        let client = client(None);

        let response = client
            .post("/api/github")
            .header(ContentType::JSON)
            .body(r#"{"action":"created","comment":{"body":"nice"},"sender":{"login":"carol"}}"#)
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn malformed_payload_is_a_server_error() {
        let client = client(None);

        let response = client
            .post("/api/github")
            .header(ContentType::JSON)
            .body(r#"{"action": "#)
            .dispatch();

        assert_eq!(response.status(), Status::InternalServerError);
    }

    #[test]
    fn missing_content_type_is_rejected() {
        let client = client(None);

        let response = client.post("/api/github").body("{}").dispatch();

        assert_eq!(response.status(), Status::BadRequest);
    }

    #[test]
    fn health_check_answers_ok() {
        let client = client(None);

        let response = client.get("/api/health").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn webhook_path_answers_health_checks_too() {
        let client = client(None);

        let response = client.get("/api/github").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap(), r#"{"status":"ok"}"#);
    }

    #[test]
    fn disallowed_methods_are_rejected() {
        let client = client(None);

        for request in [
            client.put("/api/github"),
            client.delete("/api/github"),
            client.patch("/api/github"),
        ] {
            assert_eq!(request.dispatch().status(), Status::MethodNotAllowed);
        }
    }
}
