//! Toast notifications and the fade-then-detach lifecycle.
//!
//! DESIGN
//! ======
//! `NotificationCenter` owns ids and timing; a `NoticeSurface` owns the DOM.
//! Mounting hands back a `Fadeable` handle, and the same `retire` routine
//! removes both service-created toasts and ambient alerts rendered by the
//! server, so every removal goes through the opacity transition first.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::Settings;
use crate::util::markup::escape_html;
use crate::util::timer::Scheduler;

/// Inline style pinning a toast to the top-right corner.
pub const NOTICE_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    /// Parse a severity name; unknown or missing names mean `Info`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            Some("success") => Self::Success,
            Some("error" | "danger") => Self::Error,
            Some("warning" | "warn") => Self::Warning,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Bootstrap contextual class. Bootstrap has no `alert-error`.
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
            Self::Warning => "alert-warning",
            Self::Info => "alert-info",
        }
    }

    /// Bootstrap Icons glyph name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error | Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

pub type NoticeId = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u32,
}

impl Notification {
    pub fn class_name(&self) -> String {
        format!("alert {} alert-dismissible fade show position-fixed", self.severity.alert_class())
    }

    pub fn inner_markup(&self) -> String {
        format!(
            r#"<i class="bi bi-{}"></i> {}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>"#,
            self.severity.icon(),
            escape_html(&self.message)
        )
    }
}

/// A mounted element that can be faded out and detached.
pub trait Fadeable {
    /// Whether the element is still in the document.
    fn is_attached(&self) -> bool;
    /// Start the opacity transition.
    fn begin_fade(&self, fade_ms: u32);
    fn detach(&self);
}

/// Where toasts are rendered.
pub trait NoticeSurface {
    /// Insert the toast; `None` when there is nowhere to put it.
    fn mount(&self, notice: &Notification) -> Option<Rc<dyn Fadeable>>;
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Fade `target` and detach it once the transition has run.
///
/// Elements already gone (dismissed by the user) are left alone.
pub fn retire(scheduler: &Rc<dyn Scheduler>, target: Rc<dyn Fadeable>, fade_ms: u32) {
    if !target.is_attached() {
        return;
    }
    target.begin_fade(fade_ms);
    scheduler.schedule(
        fade_ms,
        Box::new(move || {
            if target.is_attached() {
                target.detach();
            }
        }),
    );
}

/// Retire `target` after `delay_ms`.
pub fn retire_later(scheduler: &Rc<dyn Scheduler>, target: Rc<dyn Fadeable>, delay_ms: u32, fade_ms: u32) {
    let sched = Rc::clone(scheduler);
    scheduler.schedule(delay_ms, Box::new(move || retire(&sched, target, fade_ms)));
}

/// Whether a server-rendered alert should hide itself.
///
/// Permanent alerts and alerts the user can close stay put.
pub fn ambient_alert_auto_hides(class_list: &str, has_close_button: bool) -> bool {
    let permanent = class_list.split_whitespace().any(|c| c == "alert-permanent");
    !permanent && !has_close_button
}

// =============================================================================
// SERVICE
// =============================================================================

pub struct NotificationCenter {
    surface: Rc<dyn NoticeSurface>,
    scheduler: Rc<dyn Scheduler>,
    default_duration_ms: u32,
    fade_ms: u32,
    next_id: Cell<NoticeId>,
}

impl NotificationCenter {
    pub fn new(surface: Rc<dyn NoticeSurface>, scheduler: Rc<dyn Scheduler>, settings: &Settings) -> Self {
        Self {
            surface,
            scheduler,
            default_duration_ms: settings.notice_duration_ms,
            fade_ms: settings.fade_ms,
            next_id: Cell::new(0),
        }
    }

    /// Show a toast that retires itself after `duration_ms` (or the default).
    ///
    /// Returns the notice id, or `None` if the surface could not mount it.
    pub fn notify(&self, message: &str, severity: Severity, duration_ms: Option<u32>) -> Option<NoticeId> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let notice = Notification {
            id,
            message: message.to_owned(),
            severity,
            duration_ms: duration_ms.unwrap_or(self.default_duration_ms),
        };
        let Some(handle) = self.surface.mount(&notice) else {
            log::warn!("notify: no surface for {} notice {id}", severity.as_str());
            return None;
        };
        retire_later(&self.scheduler, handle, notice.duration_ms, self.fade_ms);
        Some(id)
    }

    pub fn success(&self, message: &str) -> Option<NoticeId> {
        self.notify(message, Severity::Success, None)
    }

    pub fn error(&self, message: &str) -> Option<NoticeId> {
        self.notify(message, Severity::Error, None)
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn fade_ms(&self) -> u32 {
        self.fade_ms
    }
}

// =============================================================================
// BROWSER
// =============================================================================

#[cfg(feature = "hydrate")]
impl Fadeable for web_sys::HtmlElement {
    fn is_attached(&self) -> bool {
        self.parent_node().is_some()
    }

    fn begin_fade(&self, fade_ms: u32) {
        let style = self.style();
        let _ = style.set_property("transition", &format!("opacity {fade_ms}ms ease-out"));
        let _ = style.set_property("opacity", "0");
    }

    fn detach(&self) {
        self.remove();
    }
}

/// Appends toasts to `document.body`.
#[cfg(feature = "hydrate")]
pub struct BodySurface;

#[cfg(feature = "hydrate")]
impl NoticeSurface for BodySurface {
    fn mount(&self, notice: &Notification) -> Option<Rc<dyn Fadeable>> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let body = document.body()?;
        let el = document.create_element("div").ok()?.dyn_into::<web_sys::HtmlElement>().ok()?;
        el.set_class_name(&notice.class_name());
        let _ = el.set_attribute("style", NOTICE_STYLE);
        let _ = el.set_attribute("role", "alert");
        el.set_inner_html(&notice.inner_markup());
        body.append_child(&el).ok()?;
        Some(Rc::new(el))
    }
}
