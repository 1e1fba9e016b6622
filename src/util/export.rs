//! JSON download and print-window helpers.
//!
//! The document builders are pure; the browser side (Blob download, popup
//! print) is hydrate-only and silently gives up when the DOM refuses.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::config::Settings;
use crate::util::markup::escape_html;

/// Pretty-print `value` with two-space indentation.
///
/// # Errors
///
/// Returns the serializer error for values JSON cannot represent.
pub fn export_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Standalone print document wrapping `markup`.
pub fn print_document(markup: &str, settings: &Settings) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title}</title>
<link href="{stylesheet}" rel="stylesheet">
<style>
@media print {{
  .no-print {{ display: none !important; }}
  body {{ background: white !important; }}
}}
</style>
</head>
<body>
{markup}
</body>
</html>
"#,
        title = escape_html(&settings.print_title),
        stylesheet = escape_html(&settings.print_stylesheet),
    )
}

/// Trigger a browser download of `value` as a JSON file.
#[cfg(feature = "hydrate")]
pub fn download_json<T: serde::Serialize + ?Sized>(value: &T, filename: &str) {
    use wasm_bindgen::JsCast;

    let Ok(text) = export_json(value) else {
        log::warn!("export: value is not serializable");
        return;
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(&text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) else {
        return;
    };
    if let Some(anchor) =
        document.create_element("a").ok().and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
    {
        anchor.set_href(&url);
        anchor.set_download(filename);
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

/// Open a window holding only the element `element_id` and print it.
///
/// Missing element or blocked popup is a no-op.
#[cfg(feature = "hydrate")]
pub fn print_element(element_id: &str, settings: &Settings) {
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(element) = window.document().and_then(|d| d.get_element_by_id(element_id)) else {
        return;
    };
    let Ok(Some(popup)) = window.open_with_url_and_target("", "_blank") else {
        log::warn!("print: popup blocked");
        return;
    };
    let html = print_document(&element.outer_html(), settings);
    if let Some(doc) = popup.document().and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok()) {
        let _ = doc.write(&js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(&html)));
        let _ = doc.close();
    }
    let _ = popup.print();
}
