//! Page Enhancements
//!
//! Binds behavior to server-rendered markup: print and CSV export buttons,
//! validated forms, custom file inputs, tooltips, popovers and
//! auto-closing alerts. Every handler is attached to its own element.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::logging::{log, warn};
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement};

use inventory_line_items::{encode_csv, export_filename, CSV_MIME_TYPE};

use crate::commands;
use crate::context::AppContext;
use crate::dom::{listen, query_all, query_within, read_table_cells};
use crate::models::display_file_name;

pub fn enhance_page(ctx: AppContext) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let config = ctx.config();

    bind_print_buttons(&document);
    bind_export_buttons(&document, config.default_export_filename.clone());
    bind_validated_forms(&document);
    bind_file_inputs(&document);
    bind_tooltips(&document);
    bind_popovers(&document);
    close_alerts_later(&document, config.alert_timeout_ms);
}

// ========================
// Print / Export
// ========================

fn bind_print_buttons(document: &Document) {
    for button in query_all(document, ".btn-print") {
        listen(&button, "click", |ev| {
            ev.prevent_default();
            if let Err(e) = commands::print_page() {
                warn!("[PAGE] Print failed: {}", e);
            }
        });
    }
}

fn bind_export_buttons(document: &Document, default_filename: String) {
    for button in query_all(document, ".btn-export-csv") {
        let trigger = button.clone();
        let default_filename = default_filename.clone();
        listen(&button, "click", move |ev| {
            ev.prevent_default();
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(selector) = trigger.get_attribute("data-table") else {
                warn!("[EXPORT] Button has no data-table selector");
                return;
            };
            let Some(table) = document.query_selector(&selector).ok().flatten() else {
                warn!("[EXPORT] No table matches {}", selector);
                return;
            };

            let requested = trigger.get_attribute("data-filename");
            let filename = export_filename(requested.as_deref(), &default_filename);
            let rows = read_table_cells(&table);
            match encode_csv(&rows) {
                Ok(csv) => {
                    log!("[EXPORT] {} rows -> {}", rows.len(), filename);
                    if let Err(e) = commands::download_text(&filename, CSV_MIME_TYPE, &csv) {
                        warn!("[EXPORT] Download failed: {}", e);
                    }
                }
                Err(e) => warn!("[EXPORT] {}", e),
            }
        });
    }
}

// ========================
// Forms
// ========================

fn bind_validated_forms(document: &Document) {
    for form in query_all(document, ".needs-validation") {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let target = form.clone();
        listen(&form, "submit", move |ev| {
            if !target.check_validity() {
                ev.prevent_default();
                ev.stop_propagation();
            }
            let _ = target.class_list().add_1("was-validated");
        });
    }
}

fn bind_file_inputs(document: &Document) {
    for input in query_all(document, ".custom-file-input") {
        let Ok(input) = input.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let target = input.clone();
        listen(&input, "change", move |_| {
            let value = target.value();
            let labels = target
                .parent_element()
                .map(|parent| query_within(&parent, ".custom-file-label"))
                .unwrap_or_default();
            for label in labels {
                let _ = label.class_list().add_1("selected");
                label.set_text_content(Some(display_file_name(&value)));
            }
        });
    }
}

// ========================
// Tooltips / Popovers
// ========================

/// Absolutely positioned bubble below `anchor`
fn show_bubble(anchor: &Element, class: &str, title: Option<&str>, body: &str) -> Option<Element> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let page = document.body()?;

    let bubble = document.create_element("div").ok()?;
    bubble.set_class_name(class);
    let _ = bubble.set_attribute("role", "tooltip");
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        let header = document.create_element("div").ok()?;
        header.set_class_name(&format!("{}-header", class.split(' ').next().unwrap_or(class)));
        header.set_text_content(Some(title));
        let _ = bubble.append_child(&header);
    }
    let inner = document.create_element("div").ok()?;
    inner.set_class_name(if class.starts_with("popover") { "popover-body" } else { "tooltip-inner" });
    inner.set_text_content(Some(body));
    let _ = bubble.append_child(&inner);

    let rect = anchor.get_bounding_client_rect();
    let top = rect.bottom() + window.scroll_y().unwrap_or(0.0) + 4.0;
    let left = rect.left() + window.scroll_x().unwrap_or(0.0);
    let _ = bubble.set_attribute("style", &format!("position:absolute;top:{}px;left:{}px;", top, left));

    page.append_child(&bubble).ok()?;
    Some(bubble)
}

fn bind_tooltips(document: &Document) {
    for el in query_all(document, "[data-bs-toggle=\"tooltip\"]") {
        let text = el
            .get_attribute("data-bs-title")
            .or_else(|| el.get_attribute("title"))
            .unwrap_or_default();
        if text.is_empty() {
            continue;
        }
        // Keep the native tooltip from doubling ours
        let _ = el.remove_attribute("title");
        let _ = el.set_attribute("data-bs-original-title", &text);

        let shown: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));
        for event in ["mouseenter", "focusin"] {
            let anchor = el.clone();
            let shown = shown.clone();
            let text = text.clone();
            listen(&el, event, move |_| {
                if shown.borrow().is_none() {
                    *shown.borrow_mut() = show_bubble(&anchor, "tooltip bs-tooltip-bottom show", None, &text);
                }
            });
        }
        for event in ["mouseleave", "focusout"] {
            let shown = shown.clone();
            listen(&el, event, move |_| {
                if let Some(bubble) = shown.borrow_mut().take() {
                    bubble.remove();
                }
            });
        }
    }
}

fn bind_popovers(document: &Document) {
    for el in query_all(document, "[data-bs-toggle=\"popover\"]") {
        let shown: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));
        let anchor = el.clone();
        listen(&el, "click", move |ev| {
            ev.prevent_default();
            let mut shown = shown.borrow_mut();
            match shown.take() {
                Some(bubble) => bubble.remove(),
                None => {
                    let title = anchor
                        .get_attribute("data-bs-title")
                        .or_else(|| anchor.get_attribute("title"));
                    let body = anchor.get_attribute("data-bs-content").unwrap_or_default();
                    *shown = show_bubble(&anchor, "popover bs-popover-bottom show", title.as_deref(), &body);
                }
            }
        });
    }
}

// ========================
// Alerts
// ========================

/// Close server-rendered alerts after `timeout_ms`
fn close_alerts_later(document: &Document, timeout_ms: u32) {
    let alerts = query_all(document, ".alert");
    if alerts.is_empty() {
        return;
    }
    spawn_local(async move {
        TimeoutFuture::new(timeout_ms).await;
        log!("[PAGE] Closing {} alerts", alerts.len());
        for alert in alerts {
            alert.remove();
        }
    });
}
