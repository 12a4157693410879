use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header::ACCEPT, HeaderMap, StatusCode},
    routing::post,
    Form, Json, Router,
};
use client_core::{
    clipboard::{ScratchId, SelectionHost},
    ClipboardError, ClipboardService, ContactError, ContactFormController, FormBackend,
    HttpFormBackend, PageContext, SubmissionPhase,
};
use shared::{domain::FieldKey, protocol::ContactSubmission};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone)]
struct Captured {
    accept: Option<String>,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct ServerState {
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn capture(state: &ServerState, headers: &HeaderMap, fields: HashMap<String, String>) {
    state.captured.lock().await.push(Captured {
        accept: headers
            .get(ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        fields,
    });
}

async fn accept_form(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    capture(&state, &headers, fields).await;
    Json(serde_json::json!({ "next": "/thanks", "ok": true }))
}

async fn reject_form(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Form(fields): Form<HashMap<String, String>>,
) -> (StatusCode, Json<serde_json::Value>) {
    capture(&state, &headers, fields).await;
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "errors": [
                { "field": "email", "code": "TYPE_EMAIL", "message": "Invalid email" }
            ]
        })),
    )
}

async fn broken_form() -> StatusCode {
    StatusCode::BAD_GATEWAY
}

async fn spawn_form_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/f/ok", post(accept_form))
        .route("/f/reject", post(reject_form))
        .route("/f/broken", post(broken_form))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), state)
}

struct NoSelection;

impl SelectionHost for NoSelection {
    fn create_scratch(&self, _text: &str) -> Result<ScratchId, ClipboardError> {
        Err(ClipboardError::Unavailable("headless".into()))
    }

    fn select_contents(&self, _id: ScratchId) -> Result<(), ClipboardError> {
        Ok(())
    }

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        Ok(())
    }

    fn remove_scratch(&self, _id: ScratchId) {}
}

fn controller(endpoint: String, page: PageContext) -> ContactFormController {
    let mut controller = ContactFormController::new(
        page,
        "me@example.dev",
        Arc::new(HttpFormBackend::new(endpoint)),
        ClipboardService::new(None, Arc::new(NoSelection)),
    );
    controller.update_field(FieldKey::Name, "Ada Lovelace");
    controller.update_field(FieldKey::Email, "ada@example.com");
    controller.update_field(FieldKey::Message, "Hello there");
    controller
}

#[tokio::test]
async fn posts_form_encoded_fields_with_json_accept_header() {
    let (base, state) = spawn_form_server().await;
    let backend = HttpFormBackend::new(format!("{base}/f/ok"));
    let submission = ContactSubmission {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        message: "Line one\nLine two & more".into(),
        page_url: "https://example.dev/contact?subject=Data".into(),
        subject: "Portfolio inquiry: Data".into(),
        gotcha: String::new(),
    };

    let response = backend.post_submission(&submission).await.expect("post");

    assert_eq!(response.status, 200);
    assert!(response.is_success());
    let captured = state.captured.lock().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].accept.as_deref(), Some("application/json"));
    let fields = &captured[0].fields;
    assert_eq!(fields["name"], "Ada Lovelace");
    assert_eq!(fields["message"], "Line one\nLine two & more");
    assert_eq!(fields["page_url"], "https://example.dev/contact?subject=Data");
    assert_eq!(fields["_subject"], "Portfolio inquiry: Data");
    assert_eq!(fields["_gotcha"], "");
}

#[tokio::test]
async fn controller_round_trip_against_accepting_backend() {
    let (base, state) = spawn_form_server().await;
    let page = PageContext::from_url("https://example.dev/contact?subject=Freelance%20work")
        .expect("page");
    let mut controller = controller(format!("{base}/f/ok"), page);

    controller.submit().await.expect("submit");

    assert_eq!(controller.phase(), SubmissionPhase::Succeeded);
    assert!(controller.form().name.is_empty());
    let captured = state.captured.lock().await;
    assert_eq!(
        captured[0].fields["_subject"],
        "Portfolio inquiry: Freelance work"
    );
}

#[tokio::test]
async fn controller_surfaces_backend_error_list() {
    let (base, _state) = spawn_form_server().await;
    let mut controller = controller(
        format!("{base}/f/reject"),
        PageContext::new("https://example.dev/contact", None),
    );

    let err = controller.submit().await.expect_err("must fail");

    assert_eq!(
        err,
        ContactError::SubmissionRejected {
            status: 422,
            message: "Invalid email".into(),
        }
    );
    assert_eq!(controller.form().email, "ada@example.com");
}

#[tokio::test]
async fn controller_uses_generic_message_for_empty_error_body() {
    let (base, _state) = spawn_form_server().await;
    let mut controller = controller(
        format!("{base}/f/broken"),
        PageContext::new("https://example.dev/contact", None),
    );

    let err = controller.submit().await.expect_err("must fail");

    assert_eq!(
        err.to_string(),
        "Oops! There was a problem submitting your form."
    );
    assert_eq!(controller.phase(), SubmissionPhase::Failed);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let mut controller = controller(
        format!("http://{addr}/f/ok"),
        PageContext::new("https://example.dev/contact", None),
    );

    let err = controller.submit().await.expect_err("must fail");

    assert!(
        matches!(err, ContactError::SubmissionNetworkError(ref message) if !message.is_empty())
    );
    assert!(controller.can_submit());
}
