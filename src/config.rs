//! UI Configuration
//!
//! Optional page-supplied settings read from `window.INVENTORY_UI_CONFIG`.

use leptos::logging::warn;
use serde::Deserialize;
use wasm_bindgen::JsValue;

use inventory_line_items::{FieldTemplate, RowFieldTemplates, DEFAULT_EXPORT_FILENAME};

/// Name of the global JS object holding overrides
pub const CONFIG_GLOBAL: &str = "INVENTORY_UI_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prefix of the REST endpoints, without trailing slash
    pub api_base: String,
    /// Delay before alerts close themselves
    pub alert_timeout_ms: u32,
    pub item_field: String,
    pub quantity_field: String,
    pub price_field: String,
    pub default_export_filename: String,
    pub search_placeholder: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        let fields = RowFieldTemplates::default();
        Self {
            api_base: "/api".to_string(),
            alert_timeout_ms: 5000,
            item_field: fields.item.pattern().to_string(),
            quantity_field: fields.quantity.pattern().to_string(),
            price_field: fields.unit_price.pattern().to_string(),
            default_export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            search_placeholder: "Search...".to_string(),
        }
    }
}

impl UiConfig {
    /// Read the page config, falling back to defaults when absent or malformed
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<UiConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(e) => {
                warn!("[CONFIG] Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        while self.api_base.ends_with('/') {
            self.api_base.pop();
        }
        self
    }

    pub fn field_templates(&self) -> RowFieldTemplates {
        RowFieldTemplates {
            item: FieldTemplate::new(self.item_field.clone()),
            quantity: FieldTemplate::new(self.quantity_field.clone()),
            unit_price: FieldTemplate::new(self.price_field.clone()),
        }
    }
}
