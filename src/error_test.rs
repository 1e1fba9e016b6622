use super::*;

#[test]
fn status_error_includes_code_and_text() {
    let err = AjaxError::Status { status: 500, status_text: "Internal Server Error".to_owned() };
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(err.status(), Some(500));
}

#[test]
fn status_error_without_text_omits_separator() {
    let err = AjaxError::Status { status: 404, status_text: String::new() };
    assert_eq!(err.to_string(), "HTTP 404");
}

#[test]
fn rejected_prefers_server_message() {
    assert_eq!(AjaxError::rejected(Some("Bad input")).to_string(), "Bad input");
}

#[test]
fn rejected_falls_back_when_message_missing_or_blank() {
    assert_eq!(AjaxError::rejected(None).to_string(), "Operation failed");
    assert_eq!(AjaxError::rejected(Some("  ")).to_string(), "Operation failed");
}

#[test]
fn decode_and_transport_messages() {
    assert_eq!(AjaxError::Decode("eof".to_owned()).to_string(), "invalid response: eof");
    assert_eq!(AjaxError::Transport("offline".to_owned()).to_string(), "offline");
    assert_eq!(AjaxError::Transport("offline".to_owned()).status(), None);
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(AjaxError::Status { status: 500, status_text: String::new() }.error_code(), "E_HTTP_STATUS");
    assert_eq!(AjaxError::Transport(String::new()).error_code(), "E_TRANSPORT");
    assert_eq!(AjaxError::rejected(None).error_code(), "E_REJECTED");
    assert_eq!(AjaxError::Decode(String::new()).error_code(), "E_DECODE");
    assert_eq!(StoreError::Unavailable.error_code(), "E_STORE_UNAVAILABLE");
    assert_eq!(StoreError::Write("quota".to_owned()).error_code(), "E_STORE_WRITE");
}

#[test]
fn config_invalid_message_names_field() {
    let err = ConfigError::Invalid { field: "fade_ms", reason: "must be positive" };
    assert_eq!(err.to_string(), "invalid setting fade_ms: must be positive");
}
