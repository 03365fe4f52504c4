//! Timezone Store
//!
//! Display timezone for contest deadlines and chart dates.

use leptos::prelude::*;
use serde::Serialize;
use wasm_bindgen::JsValue;

use super::{claim, InitGuard};
use crate::api;
use crate::storage::TIMEZONE_KEY;

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// (IANA id, label) pairs offered in the selector
pub const SUPPORTED_TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("America/New_York", "New York (ET)"),
    ("America/Chicago", "Chicago (CT)"),
    ("America/Denver", "Denver (MT)"),
    ("America/Los_Angeles", "Los Angeles (PT)"),
    ("America/Sao_Paulo", "São Paulo"),
    ("Europe/London", "London"),
    ("Europe/Paris", "Paris"),
    ("Europe/Berlin", "Berlin"),
    ("Europe/Warsaw", "Warsaw"),
    ("Asia/Dubai", "Dubai"),
    ("Asia/Kolkata", "India"),
    ("Asia/Tokyo", "Tokyo"),
    ("Asia/Seoul", "Seoul"),
    ("Australia/Sydney", "Sydney"),
];

/// Saved choice first, then the browser's zone, then UTC
pub fn resolve_timezone(saved: Option<String>, detected: Option<String>) -> String {
    saved
        .into_iter()
        .chain(detected)
        .map(|tz| tz.trim().to_string())
        .find(|tz| !tz.is_empty())
        .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string())
}

pub fn timezone_label(tz: &str) -> &str {
    SUPPORTED_TIMEZONES
        .iter()
        .find(|(id, _)| *id == tz)
        .map(|(_, label)| *label)
        .unwrap_or(tz)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DateTimeOptions<'a> {
    time_zone: &'a str,
    date_style: &'a str,
    time_style: &'a str,
}

/// Browser timezone via `Intl.DateTimeFormat().resolvedOptions().timeZone`
fn detect_timezone() -> Option<String> {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    let options = format.resolved_options();
    js_sys::Reflect::get(&options, &JsValue::from_str("timeZone"))
        .ok()?
        .as_string()
}

#[derive(Clone, Copy)]
pub struct TimezoneStore {
    pub timezone: RwSignal<String>,
    guard: StoredValue<InitGuard>,
}

impl TimezoneStore {
    pub fn new() -> Self {
        Self {
            timezone: RwSignal::new(DEFAULT_TIMEZONE.to_string()),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    pub fn init(&self) {
        if !claim(self.guard) {
            return;
        }
        let saved = api::client().storage().get(TIMEZONE_KEY);
        let tz = resolve_timezone(saved, detect_timezone());
        tracing::debug!(timezone = %tz, "timezone resolved");
        self.timezone.set(tz);
        self.guard.update_value(|g| g.finish(true));
    }

    pub fn set_timezone(&self, tz: &str) {
        let tz = resolve_timezone(Some(tz.to_string()), None);
        api::client().storage().set(TIMEZONE_KEY, &tz);
        tracing::info!(timezone = %tz, "timezone changed");
        self.timezone.set(tz);
    }

    /// Render an ISO timestamp in the selected zone; unparseable input comes back as-is
    pub fn format_datetime(&self, iso: &str) -> String {
        let tz = self.timezone.get();
        let date = js_sys::Date::new(&JsValue::from_str(&crate::format::utc_timestamp(iso)));
        if date.get_time().is_nan() {
            return iso.to_string();
        }
        let options = DateTimeOptions {
            time_zone: &tz,
            date_style: "medium",
            time_style: "short",
        };
        match serde_wasm_bindgen::to_value(&options) {
            Ok(options) => String::from(date.to_locale_string("en-US", &options)),
            Err(e) => {
                tracing::debug!(error = %e, "could not build Intl options");
                iso.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_saved() {
        assert_eq!(
            resolve_timezone(Some("Europe/Warsaw".into()), Some("Asia/Tokyo".into())),
            "Europe/Warsaw"
        );
        assert_eq!(resolve_timezone(None, Some("Asia/Tokyo".into())), "Asia/Tokyo");
        assert_eq!(resolve_timezone(Some("  ".into()), None), "UTC");
        assert_eq!(resolve_timezone(None, None), "UTC");
    }

    #[test]
    fn test_labels() {
        assert_eq!(timezone_label("America/New_York"), "New York (ET)");
        assert_eq!(timezone_label("Pacific/Auckland"), "Pacific/Auckland");
        assert!(SUPPORTED_TIMEZONES.iter().any(|(id, _)| *id == DEFAULT_TIMEZONE));
    }
}
