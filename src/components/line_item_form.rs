//! Line-Item Form Component
//!
//! Drives the rows of `#items-container`. New rows are instantiated from
//! `#item-row-template` and server-rendered rows are adopted in place. The
//! page's own `#add-item-row` button and `#grand-total` element are bound to
//! the form store. The component itself only renders the alert stack.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use web_sys::{Document, Element};

use inventory_line_items::{LineItemRow, LookupOutcome, LookupStatus, Selection};

use crate::commands;
use crate::components::AlertStack;
use crate::context::{use_app_context, AppContext};
use crate::dom::{self, RowTemplate};
use crate::models::AlertLevel;
use crate::store::{
    store_add_row, store_complete_lookup, store_fail_lookup, store_remove_row, store_select_item,
    store_set_item_options, store_set_quantity, store_set_unit_price, FormState, FormStateStoreFields,
    FormStore,
};

pub const ADD_ROW_BUTTON_ID: &str = "add-item-row";
pub const GRAND_TOTAL_ID: &str = "grand-total";

/// Derived cells of one row. The quantity and price inputs are not part of
/// it: they hold what the user typed and are only written on lookup or clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub unit_label: String,
    pub balance: String,
    pub total: String,
    pub max_quantity: Option<String>,
    pub exceeds_balance: bool,
    pub pending: bool,
    pub failed: bool,
}

impl RowDisplay {
    pub fn of(row: &LineItemRow) -> Self {
        Self {
            unit_label: row.unit_label().to_string(),
            balance: row.balance_text(),
            total: row.line_total().to_string(),
            max_quantity: row.max_quantity().map(|m| m.to_trimmed_string()),
            exceeds_balance: row.exceeds_balance(),
            pending: row.lookup_status() == LookupStatus::Pending,
            failed: row.lookup_status() == LookupStatus::Failed,
        }
    }
}

/// Price to write into the row's price input once a lookup settles
pub fn price_after_lookup(outcome: LookupOutcome, row: Option<&LineItemRow>) -> Option<String> {
    match outcome {
        LookupOutcome::Applied => row.map(|r| r.unit_price_text().to_string()),
        LookupOutcome::Stale | LookupOutcome::RowGone => None,
    }
}

fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

fn show_row(el: &Element, display: &RowDisplay) {
    if let Some(uom) = dom::first_within(el, ".item-uom") {
        dom::set_control(&uom, &display.unit_label);
    }
    if let Some(balance) = dom::first_within(el, ".item-balance") {
        dom::set_control(&balance, &display.balance);
    }
    if let Some(total) = dom::first_within(el, ".item-total") {
        dom::set_control(&total, &display.total);
    }
    if let Some(quantity) = dom::first_within(el, ".item-quantity") {
        let _ = match &display.max_quantity {
            Some(max) => quantity.set_attribute("max", max),
            None => quantity.remove_attribute("max"),
        };
        toggle_class(&quantity, "is-invalid", display.exceeds_balance);
    }
    if let Some(select) = dom::first_within(el, ".item-select") {
        toggle_class(&select, "is-invalid", display.failed);
        let _ = select.set_attribute("aria-busy", if display.pending { "true" } else { "false" });
    }
}

/// Row elements keyed by row index
type RowElements = Rc<RefCell<BTreeMap<usize, Element>>>;

#[derive(Clone)]
struct RowBinder {
    ctx: AppContext,
    store: FormStore,
    document: Document,
    container: Element,
    template: Rc<RowTemplate>,
    rows: RowElements,
}

impl RowBinder {
    /// Instantiate the template for a row the editor already holds
    fn render_row(&self, index: usize) {
        let Some(row) = dom::instantiate_row(&self.document, &self.container, &self.template.render(index)) else {
            warn!("[EDITOR] Could not instantiate row {} from the template", index);
            return;
        };
        let options = self.store.item_options().get_untracked();
        dom::fill_item_options(&self.document, &row, &options);
        self.bind_row(index, row);
    }

    fn add_row(&self) {
        let index = store_add_row(&self.store);
        self.render_row(index);
        log!("[EDITOR] Added row {}", index);
    }

    fn bind_row(&self, index: usize, row: Element) {
        if let Some(select) = dom::first_within(&row, ".item-select") {
            let binder = self.clone();
            let (target, row) = (select.clone(), row.clone());
            dom::listen(&select, "change", move |_| {
                binder.select_item(index, &row, &dom::control_value(&target));
            });
        }
        if let Some(quantity) = dom::first_within(&row, ".item-quantity") {
            let (store, target) = (self.store, quantity.clone());
            dom::listen(&quantity, "input", move |_| {
                store_set_quantity(&store, index, &dom::control_value(&target));
            });
        }
        if let Some(price) = dom::first_within(&row, ".item-price") {
            let (store, target) = (self.store, price.clone());
            dom::listen(&price, "input", move |_| {
                store_set_unit_price(&store, index, &dom::control_value(&target));
            });
        }
        for button in dom::query_within(&row, ".remove-item-row") {
            let binder = self.clone();
            dom::listen(&button, "click", move |ev| {
                ev.prevent_default();
                binder.remove_row(index);
            });
        }
        self.rows.borrow_mut().insert(index, row);
    }

    fn remove_row(&self, index: usize) {
        if let Some(el) = self.rows.borrow_mut().remove(&index) {
            el.remove();
        }
        if store_remove_row(&self.store, index) {
            log!("[EDITOR] Removed row {}", index);
        }
    }

    fn select_item(&self, index: usize, row: &Element, value: &str) {
        match store_select_item(&self.store, index, value) {
            Selection::Cleared => {
                if let Some(price) = dom::first_within(row, ".item-price") {
                    dom::set_control(&price, "");
                }
                log!("[EDITOR] Row {} cleared", index);
            }
            Selection::NoSuchRow => {}
            Selection::Lookup(ticket) => {
                let (ctx, store, row) = (self.ctx, self.store, row.clone());
                let api_base = ctx.api_base();
                spawn_local(async move {
                    match commands::fetch_item_details(&api_base, &ticket.item_id).await {
                        Ok(details) => {
                            let outcome = store_complete_lookup(&store, &ticket, &details);
                            let price = price_after_lookup(outcome, store.editor().read_untracked().row(index));
                            match (price, dom::first_within(&row, ".item-price")) {
                                (Some(price), Some(input)) => dom::set_control(&input, &price),
                                (Some(_), None) => {}
                                (None, _) => {
                                    log!("[LOOKUP] Dropped {:?} response for row {} (item {})", outcome, index, ticket.item_id)
                                }
                            }
                        }
                        Err(e) => {
                            warn!("[LOOKUP] Item {} for row {}: {}", ticket.item_id, index, e);
                            if store_fail_lookup(&store, &ticket) == LookupOutcome::Applied {
                                ctx.push_alert(AlertLevel::Warning, format!("Could not load item details: {}", e));
                            }
                        }
                    }
                });
            }
        }
    }
}

/// Line-item editor over the page's existing rows. Renders the alert stack.
///
/// # Arguments
/// * `container` - Element holding the `.item-row`s (`#items-container`)
/// * `template` - Row markup, item choices and field names
#[component]
pub fn LineItemForm(container: Element, template: RowTemplate) -> impl IntoView {
    let ctx = use_app_context();
    match web_sys::window().and_then(|w| w.document()) {
        Some(document) => attach(ctx, document, container, template),
        None => warn!("[EDITOR] No document to attach to"),
    }
    view! { <AlertStack /> }
}

/// Bind the rows, the add button and the grand total to a new form store.
/// Effects created here belong to the calling component.
fn attach(ctx: AppContext, document: Document, container: Element, template: RowTemplate) {
    let existing = dom::existing_rows(&container);
    let seeds = existing.iter().map(dom::read_row_seed).collect::<Vec<_>>();
    let adopted = existing.len();
    let needs_options = template.options.is_empty();
    let store = Store::new(FormState::new(seeds, template.options.clone()));
    log!("[EDITOR] Adopted {} rows, {} item options", adopted, template.options.len());

    let binder = RowBinder {
        ctx,
        store,
        document: document.clone(),
        container,
        template: Rc::new(template),
        rows: Rc::new(RefCell::new(BTreeMap::new())),
    };

    // Restored rows take indices 0..adopted in document order
    for (index, row) in existing.into_iter().enumerate() {
        binder.bind_row(index, row);
    }
    let synthesized = store
        .editor()
        .read_untracked()
        .rows()
        .iter()
        .map(|r| r.index())
        .filter(|&i| i >= adopted)
        .collect::<Vec<_>>();
    for index in synthesized {
        binder.render_row(index);
    }

    match document.get_element_by_id(ADD_ROW_BUTTON_ID) {
        Some(button) => {
            let binder = binder.clone();
            dom::listen(&button, "click", move |ev| {
                ev.prevent_default();
                binder.add_row();
            });
        }
        None => warn!("[EDITOR] No #{} button on the page", ADD_ROW_BUTTON_ID),
    }

    if needs_options {
        let binder = binder.clone();
        spawn_local(async move {
            match commands::list_item_options(&binder.ctx.api_base()).await {
                Ok(options) => {
                    log!("[EDITOR] Loaded {} item options", options.len());
                    for row in binder.rows.borrow().values() {
                        dom::fill_item_options(&binder.document, row, &options);
                    }
                    store_set_item_options(&binder.store, options);
                }
                Err(e) => warn!("[EDITOR] Could not load item list: {}", e),
            }
        });
    }

    let grand_total = document.get_element_by_id(GRAND_TOTAL_ID);
    let rows = binder.rows.clone();
    Effect::new(move |_| {
        let editor = store.editor().read();
        let elements = rows.borrow();
        for row in editor.rows() {
            if let Some(el) = elements.get(&row.index()) {
                show_row(el, &RowDisplay::of(row));
            }
        }
        if let Some(total) = &grand_total {
            dom::set_control(total, &editor.grand_total().to_string());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_line_items::{ItemDetails, LineItemEditor, Money};

    fn details() -> ItemDetails {
        ItemDetails {
            unit_of_measure_name: Some("kg".into()),
            current_price: Money::parse_or_zero("3.50"),
            current_balance: Money::from(100),
        }
    }

    #[test]
    fn test_typing_only_changes_derived_cells() {
        let mut editor = LineItemEditor::new();
        let index = editor.add_row();
        let Selection::Lookup(ticket) = editor.select_item(index, "42") else {
            panic!("expected a lookup");
        };
        editor.complete_lookup(&ticket, &details());
        editor.set_quantity(index, "3");
        let before = RowDisplay::of(editor.row(index).unwrap());
        assert_eq!(before.total, "10.50");

        // A browser may report a half-typed number as ""
        editor.set_quantity(index, "");
        let after = RowDisplay::of(editor.row(index).unwrap());
        assert_eq!(after.total, "0.00");
        assert_eq!(after.unit_label, before.unit_label);
        assert_eq!(after.max_quantity, Some("100".to_string()));
        assert_eq!(editor.row(index).unwrap().quantity_text(), "");
    }

    #[test]
    fn test_price_written_only_for_applied_lookups() {
        let mut editor = LineItemEditor::new();
        let index = editor.add_row();
        let Selection::Lookup(first) = editor.select_item(index, "42") else {
            panic!("expected a lookup");
        };
        let Selection::Lookup(second) = editor.select_item(index, "43") else {
            panic!("expected a lookup");
        };

        let stale = editor.complete_lookup(&first, &details());
        assert_eq!(price_after_lookup(stale, editor.row(index)), None);

        let applied = editor.complete_lookup(&second, &details());
        assert_eq!(price_after_lookup(applied, editor.row(index)), Some("3.50".to_string()));
    }

    #[test]
    fn test_binds_the_page_controls() {
        assert_eq!(ADD_ROW_BUTTON_ID, "add-item-row");
        assert_eq!(GRAND_TOTAL_ID, "grand-total");
    }

    #[test]
    fn test_display_flags() {
        let mut editor = LineItemEditor::new();
        let index = editor.add_row();
        let Selection::Lookup(ticket) = editor.select_item(index, "42") else {
            panic!("expected a lookup");
        };
        assert!(RowDisplay::of(editor.row(index).unwrap()).pending);

        editor.fail_lookup(&ticket);
        let display = RowDisplay::of(editor.row(index).unwrap());
        assert!(display.failed);
        assert!(!display.pending);
    }
}
