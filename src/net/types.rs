//! Request/response shapes for the AJAX gateway and the DOM seams it drives.
//!
//! DESIGN
//! ======
//! `SubmitResponse` mirrors the `{ success, message? }` contract of the
//! server's AJAX endpoints while keeping the full body for callers that need
//! extra fields.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AjaxError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Parse a form's `method` attribute; missing or unknown means POST.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_ascii_uppercase()).as_deref() {
            Some("GET") => Self::Get,
            Some("HEAD") => Self::Head,
            Some("PUT") => Self::Put,
            Some("PATCH") => Self::Patch,
            Some("DELETE") => Self::Delete,
            _ => Self::Post,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// GET and HEAD requests cannot carry a body.
    pub fn allows_body(self) -> bool {
        !matches!(self, Self::Get | Self::Head)
    }
}

/// Everything needed to submit a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPayload {
    /// Target URL; empty means the current page.
    pub action: String,
    pub method: Method,
    /// Field entries in document order.
    pub fields: Vec<(String, String)>,
}

impl FormPayload {
    /// `application/x-www-form-urlencoded` encoding of the fields.
    pub fn encoded(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.fields).finish()
    }
}

/// Body of a successful AJAX submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Missing or falsy (`0`, `""`, `null`) means the server rejected it.
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Any other fields the endpoint returned.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SubmitResponse {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns `AjaxError::Decode` when the body is not the expected JSON.
    pub fn parse(body: &str) -> Result<Self, AjaxError> {
        serde_json::from_str(body).map_err(|e| AjaxError::Decode(e.to_string()))
    }
}

fn truthy<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(de)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Outcome of a partial-content load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The container did not exist; nothing happened.
    Missing,
    Loaded,
    Failed(AjaxError),
}

// =============================================================================
// DOM SEAMS
// =============================================================================

/// The button whose label and enabled state track an in-flight submit.
pub trait SubmitControl {
    fn label(&self) -> String;
    fn set_label(&self, markup: &str);
    fn set_disabled(&self, disabled: bool);
}

/// A form that can be submitted over AJAX.
pub trait SubmitTarget {
    fn payload(&self) -> FormPayload;
    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>>;
}

/// A container whose markup can be replaced.
pub trait ContentSlot {
    fn set_html(&self, html: &str);
}

#[cfg(feature = "hydrate")]
impl SubmitControl for web_sys::HtmlElement {
    fn label(&self) -> String {
        self.inner_html()
    }

    fn set_label(&self, markup: &str) {
        self.set_inner_html(markup);
    }

    fn set_disabled(&self, disabled: bool) {
        if disabled {
            let _ = self.set_attribute("disabled", "");
        } else {
            let _ = self.remove_attribute("disabled");
        }
    }
}

#[cfg(feature = "hydrate")]
impl ContentSlot for web_sys::Element {
    fn set_html(&self, html: &str) {
        self.set_inner_html(html);
    }
}

#[cfg(feature = "hydrate")]
impl SubmitTarget for web_sys::HtmlFormElement {
    fn payload(&self) -> FormPayload {
        let action = self
            .get_attribute("action")
            .filter(|a| !a.trim().is_empty())
            .or_else(|| web_sys::window().and_then(|w| w.location().href().ok()))
            .unwrap_or_default();
        let method = Method::parse(self.get_attribute("method").as_deref());
        let fields = crate::state::autosave::DomForm(self.clone()).entries();
        FormPayload { action, method, fields }
    }

    fn submit_control(&self) -> Option<Rc<dyn SubmitControl>> {
        use wasm_bindgen::JsCast;

        let button = self.query_selector(r#"button[type="submit"]"#).ok()??;
        let button = button.dyn_into::<web_sys::HtmlElement>().ok()?;
        Some(Rc::new(button))
    }
}
