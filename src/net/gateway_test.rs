use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::net::types::Method;
use crate::state::notify::Severity;
use crate::testing::{FakeButton, FakeForm, FakeSlot, FakeTransport, RecordingSurface, reply};
use crate::util::timer::ManualScheduler;

struct Harness {
    surface: Rc<RecordingSurface>,
    gateway: Gateway<FakeTransport>,
}

fn harness(transport: FakeTransport) -> Harness {
    let sched = ManualScheduler::new();
    let surface = Rc::new(RecordingSurface::default());
    let settings = Settings::default();
    let notices = Rc::new(NotificationCenter::new(surface.clone(), Rc::new(sched), &settings));
    Harness { surface, gateway: Gateway::new(transport, notices, &settings) }
}

fn form(button: Option<Rc<FakeButton>>) -> FakeForm {
    FakeForm {
        payload: FormPayload {
            action: "/courses/7".to_owned(),
            method: Method::Post,
            fields: vec![("title".to_owned(), "Rust 101".to_owned())],
        },
        button,
    }
}

// =============================================================
// submit_form
// =============================================================

#[test]
fn success_response_notifies_once_and_returns_body() {
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"success":true,"message":"Saved","id":7}"#)));
    let resp = block_on(h.gateway.submit_form(&form(None))).unwrap();

    assert_eq!(resp.message.as_deref(), Some("Saved"));
    assert_eq!(resp.extra.get("id"), Some(&serde_json::json!(7)));
    let notices = h.surface.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Success);
    assert_eq!(notices[0].message, "Saved");
}

#[test]
fn success_without_message_uses_default_text() {
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"success":true}"#)));
    block_on(h.gateway.submit_form(&form(None))).unwrap();
    assert_eq!(h.surface.notices()[0].message, DEFAULT_SUCCESS_MESSAGE);
}

#[test]
fn rejected_response_notifies_error_with_server_message() {
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"success":false,"message":"Bad input"}"#)));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();

    assert_eq!(err, AjaxError::Rejected("Bad input".to_owned()));
    let notices = h.surface.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert_eq!(notices[0].message, "Bad input");
}

#[test]
fn missing_success_flag_reports_server_message() {
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"message":"Bad input"}"#)));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();

    assert_eq!(err, AjaxError::Rejected("Bad input".to_owned()));
    let notices = h.surface.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert_eq!(notices[0].message, "Bad input");
}

#[test]
fn missing_success_flag_without_message_uses_rejection_default() {
    let h = harness(FakeTransport::replying(reply(200, "OK", "{}")));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();
    assert_eq!(h.surface.notices()[0].message, err.to_string());
    assert_eq!(err.to_string(), "Operation failed");
}

#[test]
fn server_error_status_notifies_with_code_and_never_succeeds() {
    let h = harness(FakeTransport::replying(reply(500, "Internal Server Error", r#"{"success":true}"#)));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();

    assert_eq!(err.status(), Some(500));
    let notices = h.surface.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains("500"));
}

#[test]
fn transport_failure_is_reported() {
    let h = harness(FakeTransport::replying(Err(AjaxError::Transport("Failed to fetch".to_owned()))));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch");
    assert_eq!(h.surface.notices()[0].message, "Failed to fetch");
}

#[test]
fn empty_transport_message_falls_back_to_generic_text() {
    let h = harness(FakeTransport::replying(Err(AjaxError::Transport(String::new()))));
    let _ = block_on(h.gateway.submit_form(&form(None)));
    assert_eq!(h.surface.notices()[0].message, DEFAULT_ERROR_MESSAGE);
}

#[test]
fn non_json_body_is_a_decode_failure() {
    let h = harness(FakeTransport::replying(reply(200, "OK", "<html>login</html>")));
    let err = block_on(h.gateway.submit_form(&form(None))).unwrap_err();
    assert!(matches!(err, AjaxError::Decode(_)));
}

#[test]
fn button_is_busy_during_request_and_restored_after_success() {
    let button = FakeButton::new("Save");
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"success":true}"#)));
    block_on(h.gateway.submit_form(&form(Some(button.clone())))).unwrap();

    let history = button.history.borrow();
    assert_eq!(history[0].0, busy_markup("Saving..."));
    assert_eq!(*button.label.borrow(), "Save");
    assert!(!button.disabled.get());
}

#[test]
fn button_is_restored_after_every_failure_kind() {
    let failures = vec![
        reply(500, "Internal Server Error", ""),
        reply(200, "OK", r#"{"success":false}"#),
        reply(200, "OK", "not json"),
        Err(AjaxError::Transport("offline".to_owned())),
    ];
    for failure in failures {
        let button = FakeButton::new("<b>Submit</b>");
        let h = harness(FakeTransport::replying(failure));
        assert!(block_on(h.gateway.submit_form(&form(Some(button.clone())))).is_err());
        assert_eq!(*button.label.borrow(), "<b>Submit</b>");
        assert!(!button.disabled.get());
    }
}

#[test]
fn guard_disables_while_engaged() {
    let button = FakeButton::new("Go");
    {
        let _guard = BusyGuard::engage(button.clone(), "busy");
        assert!(button.disabled.get());
        assert_eq!(*button.label.borrow(), "busy");
    }
    assert!(!button.disabled.get());
    assert_eq!(*button.label.borrow(), "Go");
}

#[test]
fn submit_sends_form_encoded_post_with_ajax_header() {
    let h = harness(FakeTransport::replying(reply(200, "OK", r#"{"success":true}"#)));
    block_on(h.gateway.submit_form(&form(None))).unwrap();

    let requests = h.gateway.transport.requests.borrow();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "/courses/7");
    assert_eq!(req.body.as_deref(), Some("title=Rust+101"));
    assert_eq!(req.header_value("x-requested-with"), Some("XMLHttpRequest"));
    assert_eq!(req.header_value("Content-Type"), Some(FORM_CONTENT_TYPE));
}

#[test]
fn get_submission_moves_fields_into_query_string() {
    let payload = FormPayload {
        action: "/search?page=2".to_owned(),
        method: Method::Get,
        fields: vec![("q".to_owned(), "a b".to_owned())],
    };
    let req = submit_request(&payload);
    assert_eq!(req.url, "/search?page=2&q=a+b");
    assert_eq!(req.body, None);
    assert_eq!(req.header_value("Content-Type"), None);

    let payload = FormPayload { action: "/search".to_owned(), ..payload };
    assert_eq!(submit_request(&payload).url, "/search?q=a+b");
}

// =============================================================
// load_data
// =============================================================

#[test]
fn load_into_missing_container_is_noop() {
    let h = harness(FakeTransport::default());
    let outcome = block_on(h.gateway.load_data("/partials/list", None, None));
    assert_eq!(outcome, LoadOutcome::Missing);
    assert!(h.gateway.transport.requests.borrow().is_empty());
    assert!(h.surface.notices().is_empty());
}

#[test]
fn load_shows_spinner_then_fragment_and_refreshes_widgets() {
    let h = harness(FakeTransport::replying(reply(200, "OK", "<ul><li>one</li></ul>")));
    let refreshed = Rc::new(Cell::new(0));
    let counter = Rc::clone(&refreshed);
    h.gateway.set_refresh(Rc::new(move || counter.set(counter.get() + 1)));

    let slot = FakeSlot::default();
    let outcome = block_on(h.gateway.load_data("/partials/list", Some(&slot), Some("Fetching...")));

    assert_eq!(outcome, LoadOutcome::Loaded);
    let writes = slot.writes.borrow();
    assert_eq!(writes.len(), 2);
    assert!(writes[0].contains("Fetching..."));
    assert_eq!(writes[1], "<ul><li>one</li></ul>");
    assert_eq!(refreshed.get(), 1);

    let requests = h.gateway.transport.requests.borrow();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, "/partials/list");
}

#[test]
fn load_uses_default_loading_message() {
    let h = harness(FakeTransport::replying(reply(200, "OK", "")));
    let slot = FakeSlot::default();
    block_on(h.gateway.load_data("/x", Some(&slot), None));
    assert!(slot.writes.borrow()[0].contains("Loading..."));
}

#[test]
fn load_failure_puts_reason_in_container_without_refresh() {
    let h = harness(FakeTransport::replying(reply(404, "Not Found", "missing")));
    let refreshed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&refreshed);
    h.gateway.set_refresh(Rc::new(move || flag.set(true)));

    let slot = FakeSlot::default();
    let outcome = block_on(h.gateway.load_data("/gone", Some(&slot), None));

    assert!(matches!(outcome, LoadOutcome::Failed(AjaxError::Status { status: 404, .. })));
    assert!(slot.html().contains("Error loading data: HTTP 404: Not Found"));
    assert!(!refreshed.get());
}

#[test]
fn load_transport_failure_reason_is_shown() {
    let h = harness(FakeTransport::replying(Err(AjaxError::Transport("NetworkError".to_owned()))));
    let slot = FakeSlot::default();
    block_on(h.gateway.load_data("/x", Some(&slot), None));
    assert!(slot.html().contains("NetworkError"));
}
