use super::*;

#[test]
fn export_json_uses_two_space_indent() {
    let value = serde_json::json!({"name": "Ada", "tags": ["a"]});
    let text = export_json(&value).unwrap();
    assert_eq!(text, "{\n  \"name\": \"Ada\",\n  \"tags\": [\n    \"a\"\n  ]\n}");
}

#[test]
fn export_json_round_trips_structure() {
    let value = serde_json::json!([{"id": 1}, {"id": 2}]);
    let text = export_json(&value).unwrap();
    let back: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(back, value);
}

#[test]
fn print_document_embeds_markup_and_stylesheet() {
    let settings = Settings::default();
    let html = print_document(r#"<table id="grades"></table>"#, &settings);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<table id="grades"></table>"#));
    assert!(html.contains(&settings.print_stylesheet));
    assert!(html.contains("<title>Print</title>"));
    assert!(html.contains(".no-print { display: none !important; }"));
}

#[test]
fn print_document_escapes_title() {
    let settings = Settings { print_title: "A & B".to_owned(), ..Settings::default() };
    let html = print_document("", &settings);
    assert!(html.contains("<title>A &amp; B</title>"));
}
