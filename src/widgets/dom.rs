//! Browser implementations of the widget handlers.
//!
//! Event listeners live as long as the page, so their closures are handed to
//! JS with `forget`. Failed DOM calls are ignored; a widget that cannot attach
//! leaves the element as rendered by the server.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, HtmlFormElement};

use super::markers::{CONFIRM_ATTRIBUTE, Marker, VALIDATED_CLASS, confirm_message};
use super::registry::{Markable, Scope, Widget, subtree_matches};
use crate::state::autosave::{AutoSaveEngine, DomForm};
use crate::state::notify::{ambient_alert_auto_hides, retire_later};
use crate::util::timer::Scheduler;

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    type Tooltip;

    #[wasm_bindgen(static_method_of = Tooltip, js_name = getOrCreateInstance, catch)]
    fn get_or_create_instance(element: &Element) -> Result<Tooltip, JsValue>;
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()).is_ok() {
        cb.forget();
    }
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length()).filter_map(|i| list.get(i)).filter_map(|node| node.dyn_into::<Element>().ok()).collect()
}

impl Markable for Element {
    fn is_bound(&self, attribute: &str) -> bool {
        self.has_attribute(attribute)
    }

    fn mark_bound(&self, attribute: &str) {
        let _ = self.set_attribute(attribute, "");
    }
}

impl Scope<Element> for web_sys::Document {
    fn select_all(&self, selector: &str) -> Vec<Element> {
        self.query_selector_all(selector).map(|list| collect_elements(&list)).unwrap_or_default()
    }
}

impl Scope<Element> for Element {
    fn select_all(&self, selector: &str) -> Vec<Element> {
        let descendants = self.query_selector_all(selector).map(|list| collect_elements(&list)).unwrap_or_default();
        subtree_matches(self, self.matches(selector).unwrap_or(false), descendants)
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Bootstrap tooltip activation.
pub struct TooltipWidget;

impl Widget<Element> for TooltipWidget {
    fn marker(&self) -> Marker {
        Marker::Tooltip
    }

    fn attach(&self, element: &Element) {
        if let Err(e) = get_or_create_instance(element) {
            log::warn!("tooltip: bootstrap unavailable: {e:?}");
        }
    }
}

/// `window.confirm` gate on click.
pub struct ConfirmWidget {
    pub fallback: String,
}

impl Widget<Element> for ConfirmWidget {
    fn marker(&self) -> Marker {
        Marker::Confirm
    }

    fn attach(&self, element: &Element) {
        let target = element.clone();
        let fallback = self.fallback.clone();
        listen(element, "click", move |event| {
            let text = confirm_message(target.get_attribute(CONFIRM_ATTRIBUTE).as_deref(), &fallback);
            let accepted = web_sys::window().and_then(|w| w.confirm_with_message(&text).ok()).unwrap_or(false);
            if !accepted {
                event.prevent_default();
            }
        });
    }
}

/// Constraint validation on submit.
pub struct ValidationWidget;

impl Widget<Element> for ValidationWidget {
    fn marker(&self) -> Marker {
        Marker::Validation
    }

    fn attach(&self, element: &Element) {
        let Some(form) = element.dyn_ref::<HtmlFormElement>().cloned() else {
            return;
        };
        listen(element, "submit", move |event| {
            if !form.check_validity() {
                event.prevent_default();
                event.stop_propagation();
            }
            let _ = form.class_list().add_1(VALIDATED_CLASS);
        });
    }
}

/// Feeds form input events into the auto-save engine.
pub struct AutoSaveWidget {
    pub engine: Rc<AutoSaveEngine>,
}

impl Widget<Element> for AutoSaveWidget {
    fn marker(&self) -> Marker {
        Marker::AutoSave
    }

    fn attach(&self, element: &Element) {
        let Some(form) = element.dyn_ref::<HtmlFormElement>().cloned() else {
            log::warn!("autosave: data-autosave on a non-form element");
            return;
        };
        let tracked = self.engine.track(Rc::new(DomForm(form)));
        listen(element, "input", move |_| tracked.on_input());
    }
}

/// Auto-hide for alerts rendered by the server.
pub struct AmbientAlertWidget {
    pub scheduler: Rc<dyn Scheduler>,
    pub delay_ms: u32,
    pub fade_ms: u32,
}

impl Widget<Element> for AmbientAlertWidget {
    fn marker(&self) -> Marker {
        Marker::AmbientAlert
    }

    fn attach(&self, element: &Element) {
        let has_close = element.query_selector(".btn-close").ok().flatten().is_some();
        if !ambient_alert_auto_hides(&element.class_name(), has_close) {
            return;
        }
        let Ok(alert) = element.clone().dyn_into::<HtmlElement>() else {
            return;
        };
        retire_later(&self.scheduler, Rc::new(alert), self.delay_ms, self.fade_ms);
    }
}
