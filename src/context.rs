//! Application Context
//!
//! Shared state provided via Leptos Context API to every mounted widget.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::UiConfig;
use crate::models::{Alert, AlertLevel};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Page configuration
    config: StoredValue<UiConfig>,
    /// Client-side alerts currently shown - read
    pub alerts: ReadSignal<Vec<Alert>>,
    /// Client-side alerts currently shown - write
    set_alerts: WriteSignal<Vec<Alert>>,
    next_alert_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: UiConfig) -> Self {
        let (alerts, set_alerts) = signal(Vec::<Alert>::new());
        Self {
            config: StoredValue::new(config),
            alerts,
            set_alerts,
            next_alert_id: StoredValue::new(0),
        }
    }

    pub fn config(&self) -> UiConfig {
        self.config.get_value()
    }

    pub fn api_base(&self) -> String {
        self.config.with_value(|c| c.api_base.clone())
    }

    /// Show an alert that closes itself after the configured timeout
    pub fn push_alert(&self, level: AlertLevel, message: impl Into<String>) -> u32 {
        let id = self.next_alert_id.get_value();
        self.next_alert_id.set_value(id + 1);
        let alert = Alert { id, level, message: message.into() };
        self.set_alerts.update(|alerts| alerts.push(alert));

        let ctx = *self;
        let timeout = self.config.with_value(|c| c.alert_timeout_ms);
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            ctx.dismiss_alert(id);
        });
        id
    }

    pub fn dismiss_alert(&self, id: u32) {
        self.set_alerts.update(|alerts| alerts.retain(|a| a.id != id));
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
