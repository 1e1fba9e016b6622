//! Page controller: wires the services together for one document.
//!
//! ARCHITECTURE
//! ============
//! Construction builds the scheduler, notification service, auto-save engine,
//! gateway, and widget registry once. `init` is the explicit startup scan;
//! the gateway re-runs the same scan after injecting a partial so new markup
//! is activated without double-binding the old.

use std::rc::Rc;

use web_sys::{Element, HtmlFormElement};

use crate::config::Settings;
use crate::error::AjaxError;
use crate::net::gateway::Gateway;
use crate::net::transport::GlooTransport;
use crate::net::types::{ContentSlot, LoadOutcome, SubmitResponse};
use crate::state::autosave::AutoSaveEngine;
use crate::state::notify::{BodySurface, NoticeId, NotificationCenter, Severity};
use crate::state::snapshot::{FormSnapshot, LocalStorageStore};
use crate::util::format::{format_currency, format_date};
use crate::util::timer::{BrowserScheduler, Scheduler};
use crate::widgets::dom::{AmbientAlertWidget, AutoSaveWidget, ConfirmWidget, TooltipWidget, ValidationWidget};
use crate::widgets::registry::WidgetRegistry;

pub struct PageController {
    settings: Settings,
    scheduler: Rc<dyn Scheduler>,
    notices: Rc<NotificationCenter>,
    autosave: Rc<AutoSaveEngine>,
    gateway: Gateway<GlooTransport>,
    registry: Rc<WidgetRegistry<Element>>,
}

fn build_registry(settings: &Settings, scheduler: &Rc<dyn Scheduler>, autosave: &Rc<AutoSaveEngine>) -> WidgetRegistry<Element> {
    let mut registry = WidgetRegistry::new();
    registry
        .register(TooltipWidget)
        .register(ConfirmWidget { fallback: settings.confirm_message.clone() })
        .register(ValidationWidget)
        .register(AutoSaveWidget { engine: Rc::clone(autosave) })
        .register(AmbientAlertWidget {
            scheduler: Rc::clone(scheduler),
            delay_ms: settings.ambient_alert_ms,
            fade_ms: settings.fade_ms,
        });
    registry
}

fn scan_document(registry: &WidgetRegistry<Element>) -> usize {
    match web_sys::window().and_then(|w| w.document()) {
        Some(document) => registry.scan(&document),
        None => 0,
    }
}

impl PageController {
    pub fn new(settings: Settings) -> Rc<Self> {
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new());
        let notices = Rc::new(NotificationCenter::new(Rc::new(BodySurface), Rc::clone(&scheduler), &settings));
        let autosave = Rc::new(AutoSaveEngine::new(Rc::new(LocalStorageStore), Rc::clone(&notices), &settings));
        let registry = Rc::new(build_registry(&settings, &scheduler, &autosave));
        let gateway = Gateway::new(GlooTransport, Rc::clone(&notices), &settings);

        let for_refresh = Rc::clone(&registry);
        gateway.set_refresh(Rc::new(move || {
            let attached = scan_document(&for_refresh);
            log::debug!("rescan after partial load attached {attached} widgets");
        }));

        Rc::new(Self { settings, scheduler, notices, autosave, gateway, registry })
    }

    /// Activate every marked element in the document.
    pub fn init(&self) -> usize {
        let attached = self.rescan();
        log::info!("pagekit initialized: {attached} widgets across {} markers", self.registry.len());
        attached
    }

    /// Activate marked elements not yet bound.
    pub fn rescan(&self) -> usize {
        scan_document(&self.registry)
    }

    /// Activate unbound marked elements inside the first element matching
    /// `selector`, including that element. Missing or invalid selectors
    /// attach nothing.
    pub fn rescan_within(&self, selector: &str) -> usize {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(selector).ok().flatten());
        match root {
            Some(root) => self.registry.scan(&root),
            None => 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn notify(&self, message: &str, severity: Severity, duration_ms: Option<u32>) -> Option<NoticeId> {
        self.notices.notify(message, severity, duration_ms)
    }

    /// Submit `form` over AJAX.
    ///
    /// # Errors
    ///
    /// Returns the normalized failure after showing an error notification.
    pub async fn submit_form(&self, form: &HtmlFormElement) -> Result<SubmitResponse, AjaxError> {
        self.gateway.submit_form(form).await
    }

    /// Load `url` into the first element matching `selector`.
    pub async fn load_data(&self, url: &str, selector: &str, loading_message: Option<&str>) -> LoadOutcome {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(selector).ok().flatten());
        self.gateway.load_data(url, container.as_ref().map(|c| c as &dyn ContentSlot), loading_message).await
    }

    /// Saved draft for a form id.
    pub fn saved_draft(&self, form_id: Option<&str>) -> Option<FormSnapshot> {
        self.autosave.load(form_id)
    }

    pub fn format_date(&self, input: &str) -> String {
        format_date(input, &self.settings.date_locale)
    }

    pub fn format_currency(&self, amount: f64, currency: Option<&str>) -> String {
        let currency = currency.filter(|c| !c.trim().is_empty()).unwrap_or(self.settings.default_currency.as_str());
        format_currency(amount, currency, &self.settings.currency_locale)
    }
}
