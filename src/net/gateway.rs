//! AJAX form submission and partial-content loading.
//!
//! ARCHITECTURE
//! ============
//! `Gateway` turns a form or URL into an `HttpRequest`, runs it through a
//! `Transport`, and folds the three failure kinds (bad status, transport,
//! `success: false`) into one `AjaxError` path that raises an error toast.
//! Callers get a `Result`/`LoadOutcome` back instead of passing callbacks.
//!
//! The submit button is restored by `BusyGuard`'s `Drop`, so it comes back
//! on every exit path, including a dropped future.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::transport::{FORM_CONTENT_TYPE, HttpRequest, REQUESTED_WITH, Transport};
use super::types::{ContentSlot, FormPayload, LoadOutcome, SubmitControl, SubmitResponse, SubmitTarget};
use crate::config::Settings;
use crate::error::{AjaxError, ErrorCode};
use crate::state::notify::NotificationCenter;
use crate::util::markup::{busy_markup, load_error_markup, loading_markup};

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed successfully";
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Disables a submit control and swaps in a busy label until dropped.
pub struct BusyGuard {
    control: Rc<dyn SubmitControl>,
    original: String,
}

impl BusyGuard {
    pub fn engage(control: Rc<dyn SubmitControl>, busy_markup: &str) -> Self {
        let original = control.label();
        control.set_label(busy_markup);
        control.set_disabled(true);
        Self { control, original }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.control.set_label(&self.original);
        self.control.set_disabled(false);
    }
}

/// Build the request for a form submission.
///
/// Bodyless methods carry the fields in the query string instead.
pub fn submit_request(payload: &FormPayload) -> HttpRequest {
    let encoded = payload.encoded();
    let mut request = HttpRequest {
        method: payload.method,
        url: payload.action.clone(),
        headers: vec![(REQUESTED_WITH.0.to_owned(), REQUESTED_WITH.1.to_owned())],
        body: None,
    };
    if payload.method.allows_body() {
        request.headers.push(("Content-Type".to_owned(), FORM_CONTENT_TYPE.to_owned()));
        request.body = Some(encoded);
    } else if !encoded.is_empty() {
        let sep = if request.url.contains('?') { '&' } else { '?' };
        request.url = format!("{}{sep}{encoded}", request.url);
    }
    request
}

pub struct Gateway<T> {
    transport: T,
    notices: Rc<NotificationCenter>,
    busy_label: String,
    loading_message: String,
    refresh: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, notices: Rc<NotificationCenter>, settings: &Settings) -> Self {
        Self {
            transport,
            notices,
            busy_label: settings.busy_label.clone(),
            loading_message: settings.loading_message.clone(),
            refresh: RefCell::new(None),
        }
    }

    /// Hook run after a partial is injected, to activate its widgets.
    pub fn set_refresh(&self, refresh: Rc<dyn Fn()>) {
        *self.refresh.borrow_mut() = Some(refresh);
    }

    /// Submit `form` and report the outcome with a toast.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure; an error toast has already been shown.
    pub async fn submit_form(&self, form: &dyn SubmitTarget) -> Result<SubmitResponse, AjaxError> {
        let _busy = form.submit_control().map(|control| BusyGuard::engage(control, &busy_markup(&self.busy_label)));
        let request = submit_request(&form.payload());
        let result = self.exchange(request).await;
        match &result {
            Ok(resp) => {
                let message = resp.message.as_deref().filter(|m| !m.is_empty()).unwrap_or(DEFAULT_SUCCESS_MESSAGE);
                self.notices.success(message);
            }
            Err(e) => {
                log::warn!("submit failed ({}): {e}", e.error_code());
                let text = e.to_string();
                self.notices.error(if text.is_empty() { DEFAULT_ERROR_MESSAGE } else { text.as_str() });
            }
        }
        result
    }

    async fn exchange(&self, request: HttpRequest) -> Result<SubmitResponse, AjaxError> {
        let reply = self.transport.send(request).await?.require_ok()?;
        let resp = SubmitResponse::parse(&reply.body)?;
        if resp.success { Ok(resp) } else { Err(AjaxError::rejected(resp.message.as_deref())) }
    }

    /// Replace `slot` with the fragment at `url`.
    ///
    /// A missing slot is a no-op. On failure the slot shows an inline error
    /// with the reason.
    pub async fn load_data(&self, url: &str, slot: Option<&dyn ContentSlot>, loading_message: Option<&str>) -> LoadOutcome {
        let Some(slot) = slot else {
            return LoadOutcome::Missing;
        };
        slot.set_html(&loading_markup(loading_message.unwrap_or(self.loading_message.as_str())));
        match self.fetch_fragment(url).await {
            Ok(html) => {
                slot.set_html(&html);
                let refresh = self.refresh.borrow().clone();
                if let Some(refresh) = refresh {
                    refresh();
                }
                LoadOutcome::Loaded
            }
            Err(e) => {
                log::warn!("load {url} failed: {e}");
                slot.set_html(&load_error_markup(&e.to_string()));
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn fetch_fragment(&self, url: &str) -> Result<String, AjaxError> {
        let reply = self.transport.send(HttpRequest::get(url)).await?.require_ok()?;
        Ok(reply.body)
    }
}
