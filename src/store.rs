//! Line-Item Form State Store
//!
//! Uses Leptos reactive_stores for field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use inventory_line_items::{ItemDetails, LineItemEditor, LookupOutcome, LookupTicket, RowSeed, Selection};

use crate::models::ItemOption;

/// State of one line-item form
#[derive(Clone, Debug, Default, Store)]
pub struct FormState {
    /// Rows and totals
    pub editor: LineItemEditor,
    /// Choices of every row's item selector
    pub item_options: Vec<ItemOption>,
}

impl FormState {
    /// Adopt rows already in the page, then guarantee at least one row
    pub fn new(seeds: Vec<RowSeed>, item_options: Vec<ItemOption>) -> Self {
        let mut editor = LineItemEditor::new();
        for seed in seeds {
            editor.restore_row(seed);
        }
        editor.ensure_initial_row();
        Self { editor, item_options }
    }
}

/// Type alias for the store
pub type FormStore = Store<FormState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_add_row(store: &FormStore) -> usize {
    store.editor().write().add_row()
}

pub fn store_remove_row(store: &FormStore, index: usize) -> bool {
    store.editor().write().remove_row(index)
}

pub fn store_set_quantity(store: &FormStore, index: usize, text: &str) {
    store.editor().write().set_quantity(index, text);
}

pub fn store_set_unit_price(store: &FormStore, index: usize, text: &str) {
    store.editor().write().set_unit_price(index, text);
}

pub fn store_select_item(store: &FormStore, index: usize, item_id: &str) -> Selection {
    store.editor().write().select_item(index, item_id)
}

pub fn store_complete_lookup(store: &FormStore, ticket: &LookupTicket, details: &ItemDetails) -> LookupOutcome {
    store.editor().write().complete_lookup(ticket, details)
}

pub fn store_fail_lookup(store: &FormStore, ticket: &LookupTicket) -> LookupOutcome {
    store.editor().write().fail_lookup(ticket)
}

pub fn store_set_item_options(store: &FormStore, options: Vec<ItemOption>) {
    *store.item_options().write() = options;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_state_creates_first_row() {
        let state = FormState::new(Vec::new(), Vec::new());
        assert_eq!(state.editor.len(), 1);
        assert_eq!(state.editor.rows()[0].index(), 0);
    }

    #[test]
    fn test_form_state_adopts_existing_rows() {
        let seeds = vec![
            RowSeed { quantity: "1".into(), unit_price: "2".into(), ..Default::default() },
            RowSeed { quantity: "3".into(), unit_price: "1.5".into(), ..Default::default() },
        ];
        let state = FormState::new(seeds, Vec::new());
        assert_eq!(state.editor.len(), 2);
        assert_eq!(state.editor.grand_total().to_string(), "6.50");
    }
}
