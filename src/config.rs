//! Runtime settings for timings, labels, storage keys, and locales.
//!
//! Pages pass an optional JSON object to `new PageKit(configJson)`; absent
//! keys keep their defaults.
//!
//! TRADE-OFFS
//! ==========
//! The ambient-alert lifetime and the notification lifetime are separate
//! knobs. They have different defaults and nothing ties them together.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_AUTOSAVE_DELAY_MS: u32 = 2000;
pub const DEFAULT_AUTOSAVE_NOTICE_MS: u32 = 1000;
pub const DEFAULT_NOTICE_DURATION_MS: u32 = 3000;
pub const DEFAULT_AMBIENT_ALERT_MS: u32 = 5000;
pub const DEFAULT_FADE_MS: u32 = 300;
pub const DEFAULT_PRINT_STYLESHEET: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Idle time after the last edit before a form snapshot is written.
    pub autosave_delay_ms: u32,
    /// Lifetime of the "Data auto-saved" notice.
    pub autosave_notice_ms: u32,
    pub autosave_key_prefix: String,
    /// Storage key suffix for forms without an `id`.
    pub default_form_key: String,
    /// Default notification lifetime.
    pub notice_duration_ms: u32,
    /// Lifetime of alerts rendered by the server.
    pub ambient_alert_ms: u32,
    /// Opacity transition before an element is detached.
    pub fade_ms: u32,
    pub confirm_message: String,
    pub loading_message: String,
    pub busy_label: String,
    pub date_locale: String,
    pub currency_locale: String,
    pub default_currency: String,
    pub export_filename: String,
    pub print_title: String,
    pub print_stylesheet: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            autosave_notice_ms: DEFAULT_AUTOSAVE_NOTICE_MS,
            autosave_key_prefix: "autosave_".to_owned(),
            default_form_key: "default_form".to_owned(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            ambient_alert_ms: DEFAULT_AMBIENT_ALERT_MS,
            fade_ms: DEFAULT_FADE_MS,
            confirm_message: "Are you sure?".to_owned(),
            loading_message: "Loading...".to_owned(),
            busy_label: "Saving...".to_owned(),
            date_locale: "en-GB".to_owned(),
            currency_locale: "uk-UA".to_owned(),
            default_currency: "UAH".to_owned(),
            export_filename: "export.json".to_owned(),
            print_title: "Print".to_owned(),
            print_stylesheet: DEFAULT_PRINT_STYLESHEET.to_owned(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON object, filling gaps with defaults.
    ///
    /// A missing or blank string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown keys and
    /// `ConfigError::Invalid` when a value fails validation.
    pub fn from_json(raw: Option<&str>) -> Result<Self, ConfigError> {
        let settings = match raw.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => serde_json::from_str::<Self>(raw)?,
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("autosave_delay_ms", self.autosave_delay_ms),
            ("autosave_notice_ms", self.autosave_notice_ms),
            ("notice_duration_ms", self.notice_duration_ms),
            ("ambient_alert_ms", self.ambient_alert_ms),
        ];
        if let Some((field, _)) = positive.into_iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Invalid { field, reason: "must be positive" });
        }
        if self.autosave_key_prefix.is_empty() {
            return Err(ConfigError::Invalid { field: "autosave_key_prefix", reason: "must not be empty" });
        }
        if self.default_form_key.is_empty() {
            return Err(ConfigError::Invalid { field: "default_form_key", reason: "must not be empty" });
        }
        Ok(())
    }
}
