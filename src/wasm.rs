//! `wasm-bindgen` exports for inline page scripts.
//!
//! ```js
//! import init, { PageKit } from "./pkg/pagekit.js";
//! await init();
//! const kit = new PageKit('{"ambient_alert_ms": 8000}');
//! kit.init();
//! ```
//!
//! Only compiled with the `hydrate` feature.

use std::rc::Rc;
use std::sync::Once;

use js_sys::{Function, JSON, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlFormElement;

use crate::config::Settings;
use crate::controller::PageController;
use crate::net::types::LoadOutcome;
use crate::state::notify::Severity;
use crate::util::debounce::debounce;
use crate::util::export::{download_json, print_element};

fn install_logging() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Page utilities handle exposed to JavaScript.
#[wasm_bindgen]
pub struct PageKit {
    inner: Rc<PageController>,
}

#[wasm_bindgen]
impl PageKit {
    /// Build the controller from an optional JSON settings object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<PageKit, JsValue> {
        install_logging();
        let settings = Settings::from_json(config.as_deref()).map_err(|e| js_error(&e.to_string()))?;
        Ok(Self { inner: PageController::new(settings) })
    }

    /// Attach behavior to every marked element. Returns the number attached.
    pub fn init(&self) -> u32 {
        u32::try_from(self.inner.init()).unwrap_or(u32::MAX)
    }

    /// Attach behavior to marked elements added since the last scan.
    pub fn rescan(&self) -> u32 {
        u32::try_from(self.inner.rescan()).unwrap_or(u32::MAX)
    }

    /// Like `rescan`, limited to the subtree at `selector`.
    #[wasm_bindgen(js_name = rescanWithin)]
    pub fn rescan_within(&self, selector: &str) -> u32 {
        u32::try_from(self.inner.rescan_within(selector)).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = showNotification)]
    pub fn show_notification(&self, message: &str, kind: Option<String>, duration_ms: Option<u32>) {
        self.inner.notify(message, Severity::parse(kind.as_deref()), duration_ms);
    }

    /// Resolves to `true` when the fragment was injected, `false` otherwise.
    #[wasm_bindgen(js_name = loadData)]
    pub fn load_data(&self, url: String, container: String, loading_message: Option<String>) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let outcome = inner.load_data(&url, &container, loading_message.as_deref()).await;
            Ok(JsValue::from_bool(outcome == LoadOutcome::Loaded))
        })
    }

    /// Resolves to the parsed response body; rejects with an `Error` whose
    /// message is the one shown to the user.
    #[wasm_bindgen(js_name = submitForm)]
    pub fn submit_form(&self, form: HtmlFormElement) -> Promise {
        let inner = Rc::clone(&self.inner);
        future_to_promise(async move {
            let resp = inner.submit_form(&form).await.map_err(|e| js_error(&e.to_string()))?;
            let raw = serde_json::to_string(&resp).map_err(|e| js_error(&e.to_string()))?;
            JSON::parse(&raw)
        })
    }

    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(&self, input: &str) -> String {
        self.inner.format_date(input)
    }

    #[wasm_bindgen(js_name = formatCurrency)]
    pub fn format_currency(&self, amount: f64, currency: Option<String>) -> String {
        self.inner.format_currency(amount, currency.as_deref())
    }

    /// Download `data` as pretty-printed JSON.
    #[wasm_bindgen(js_name = exportData)]
    pub fn export_data(&self, data: JsValue, filename: Option<String>) -> Result<(), JsValue> {
        let raw: String = JSON::stringify(&data)?.into();
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| js_error(&e.to_string()))?;
        let filename = filename.unwrap_or_else(|| self.inner.settings().export_filename.clone());
        download_json(&value, &filename);
        Ok(())
    }

    #[wasm_bindgen(js_name = printElement)]
    pub fn print_element(&self, element_id: &str) {
        print_element(element_id, self.inner.settings());
    }

    /// Wrap a one-argument function so bursts of calls collapse into one.
    pub fn debounce(&self, func: Function, wait_ms: u32) -> Function {
        let debounced = debounce(Rc::clone(self.inner.scheduler()), wait_ms, move |arg: JsValue| {
            if let Err(e) = func.call1(&JsValue::NULL, &arg) {
                log::warn!("debounced callback threw: {e:?}");
            }
        });
        let cb = Closure::wrap(Box::new(move |arg: JsValue| debounced.call(arg)) as Box<dyn FnMut(JsValue)>);
        cb.into_js_value().unchecked_into::<Function>()
    }
}
