//! Line-Item Editor
//!
//! Owns the rows of one form and keeps every line total and the grand
//! total in sync after each mutation.
//!
//! Lookups are sequenced per row: [`LineItemEditor::select_item`] hands out
//! a [`LookupTicket`] and only the ticket carrying the row's latest token
//! may write its response back.

use crate::lookup::{ItemDetails, LookupOutcome, LookupTicket};
use crate::money::Money;
use crate::row::{LineItemRow, RowSeed};

/// Result of changing a row's item selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Empty selection, row fields were cleared and totals recomputed
    Cleared,
    /// A lookup must be issued for this ticket
    Lookup(LookupTicket),
    /// No row with that index
    NoSuchRow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItemEditor {
    rows: Vec<LineItemRow>,
    next_index: usize,
    grand_total: Money,
}

impl Default for LineItemEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemEditor {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_index: 0,
            grand_total: Money::zero(),
        }
    }

    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&LineItemRow> {
        self.rows.iter().find(|r| r.index() == index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn grand_total(&self) -> &Money {
        &self.grand_total
    }

    /// Append a blank row and return its index
    pub fn add_row(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        self.rows.push(LineItemRow::new(index));
        self.recompute_grand_total();
        index
    }

    /// Append a row carrying values already present in the page
    pub fn restore_row(&mut self, seed: RowSeed) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        self.rows.push(LineItemRow::restored(index, seed));
        self.recompute_row_total(index);
        index
    }

    /// Make sure the user never sees an empty item list
    pub fn ensure_initial_row(&mut self) -> Option<usize> {
        if self.rows.is_empty() {
            Some(self.add_row())
        } else {
            None
        }
    }

    /// Remove a row; unknown indices are a no-op
    pub fn remove_row(&mut self, index: usize) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.index() != index);
        let removed = self.rows.len() != before;
        if removed {
            self.recompute_grand_total();
        }
        removed
    }

    pub fn set_quantity(&mut self, index: usize, text: &str) -> bool {
        self.edit_row(index, |row| row.set_quantity(text))
    }

    pub fn set_unit_price(&mut self, index: usize, text: &str) -> bool {
        self.edit_row(index, |row| row.set_unit_price(text))
    }

    /// React to the item selector of a row changing to `item_id`
    pub fn select_item(&mut self, index: usize, item_id: &str) -> Selection {
        let item_id = item_id.trim();
        let Some(row) = self.row_mut(index) else {
            return Selection::NoSuchRow;
        };

        if item_id.is_empty() {
            row.clear_item();
            self.recompute_row_total(index);
            return Selection::Cleared;
        }

        let token = row.begin_lookup(item_id);
        Selection::Lookup(LookupTicket {
            row_index: index,
            token,
            item_id: item_id.to_string(),
        })
    }

    /// Apply a successful lookup if the ticket is still current
    pub fn complete_lookup(&mut self, ticket: &LookupTicket, details: &ItemDetails) -> LookupOutcome {
        let outcome = self.check_ticket(ticket);
        if outcome == LookupOutcome::Applied {
            if let Some(row) = self.row_mut(ticket.row_index) {
                row.apply_details(details);
            }
            self.recompute_row_total(ticket.row_index);
        }
        outcome
    }

    /// Record a failed lookup if the ticket is still current. Row values
    /// stay as they were.
    pub fn fail_lookup(&mut self, ticket: &LookupTicket) -> LookupOutcome {
        let outcome = self.check_ticket(ticket);
        if outcome == LookupOutcome::Applied {
            if let Some(row) = self.row_mut(ticket.row_index) {
                row.mark_failed();
            }
        }
        outcome
    }

    fn check_ticket(&self, ticket: &LookupTicket) -> LookupOutcome {
        match self.row(ticket.row_index) {
            None => LookupOutcome::RowGone,
            Some(row) if row.lookup_token() != ticket.token => LookupOutcome::Stale,
            Some(_) => LookupOutcome::Applied,
        }
    }

    fn row_mut(&mut self, index: usize) -> Option<&mut LineItemRow> {
        self.rows.iter_mut().find(|r| r.index() == index)
    }

    fn edit_row(&mut self, index: usize, edit: impl FnOnce(&mut LineItemRow)) -> bool {
        match self.row_mut(index) {
            Some(row) => {
                edit(row);
                self.recompute_row_total(index);
                true
            }
            None => false,
        }
    }

    fn recompute_row_total(&mut self, index: usize) {
        if let Some(row) = self.row_mut(index) {
            row.recompute_total();
        }
        self.recompute_grand_total();
    }

    fn recompute_grand_total(&mut self) {
        let sum: Money = self.rows.iter().map(LineItemRow::line_total).sum();
        self.grand_total = sum.round2();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupStatus;

    fn kg_details() -> ItemDetails {
        serde_json::from_str(
            r#"{"unit_of_measure_name":"kg","current_price":"3.50","current_balance":"100"}"#,
        )
        .unwrap()
    }

    fn ticket(selection: Selection) -> LookupTicket {
        match selection {
            Selection::Lookup(t) => t,
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_initial_row_synthesized_once() {
        let mut editor = LineItemEditor::new();
        assert_eq!(editor.ensure_initial_row(), Some(0));
        assert_eq!(editor.ensure_initial_row(), None);
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_add_row_assigns_sequential_indices() {
        let mut editor = LineItemEditor::new();
        assert_eq!(editor.add_row(), 0);
        assert_eq!(editor.add_row(), 1);
        assert_eq!(editor.add_row(), 2);
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_indices_stay_unique_after_removal() {
        let mut editor = LineItemEditor::new();
        editor.add_row();
        editor.add_row();
        assert!(editor.remove_row(0));
        let next = editor.add_row();
        assert_eq!(next, 2);
        let indices: Vec<usize> = editor.rows().iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_restored_rows_count_toward_grand_total() {
        let mut editor = LineItemEditor::new();
        let seeded = editor.restore_row(RowSeed {
            item_id: Some("42".into()),
            unit_label: "kg".into(),
            unit_price: "3.50".into(),
            balance: Some(Money::from(100)),
            quantity: "4".into(),
        });
        assert_eq!(seeded, 0);
        assert_eq!(editor.ensure_initial_row(), None);
        assert_eq!(editor.add_row(), 1);
        assert_eq!(editor.grand_total().to_string(), "14.00");
        assert_eq!(editor.row(seeded).unwrap().lookup_status(), LookupStatus::Loaded);
    }

    #[test]
    fn test_row_total_and_grand_total() {
        let mut editor = LineItemEditor::new();
        let a = editor.add_row();
        let b = editor.add_row();

        editor.set_quantity(a, "2");
        editor.set_unit_price(a, "1.25");
        editor.set_quantity(b, "3");
        editor.set_unit_price(b, "0.10");

        assert_eq!(editor.row(a).unwrap().line_total().to_string(), "2.50");
        assert_eq!(editor.row(b).unwrap().line_total().to_string(), "0.30");
        assert_eq!(editor.grand_total().to_string(), "2.80");
    }

    #[test]
    fn test_non_numeric_inputs_count_as_zero() {
        let mut editor = LineItemEditor::new();
        let a = editor.add_row();
        editor.set_quantity(a, "");
        editor.set_unit_price(a, "x");
        assert_eq!(editor.grand_total().to_string(), "0.00");
    }

    #[test]
    fn test_remove_row_updates_grand_total_and_keeps_others() {
        let mut editor = LineItemEditor::new();
        let a = editor.add_row();
        let b = editor.add_row();
        editor.set_quantity(a, "1");
        editor.set_unit_price(a, "5");
        editor.set_quantity(b, "2");
        editor.set_unit_price(b, "4");
        assert_eq!(editor.grand_total().to_string(), "13.00");

        assert!(editor.remove_row(a));
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.grand_total().to_string(), "8.00");
        let kept = editor.row(b).unwrap();
        assert_eq!(kept.quantity_text(), "2");
        assert_eq!(kept.unit_price_text(), "4");
    }

    #[test]
    fn test_remove_unknown_row_is_noop() {
        let mut editor = LineItemEditor::new();
        editor.add_row();
        assert!(!editor.remove_row(7));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_lookup_populates_row() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        editor.set_quantity(row, "2");

        let t = ticket(editor.select_item(row, "42"));
        assert_eq!(t.item_id, "42");
        assert_eq!(editor.row(row).unwrap().lookup_status(), LookupStatus::Pending);

        assert_eq!(editor.complete_lookup(&t, &kg_details()), LookupOutcome::Applied);

        let r = editor.row(row).unwrap();
        assert_eq!(r.unit_label(), "kg");
        assert_eq!(r.unit_price_text(), "3.50");
        assert_eq!(r.balance_text(), "100");
        assert_eq!(r.max_quantity(), Some(&Money::from(100)));
        assert_eq!(r.line_total().to_string(), "7.00");
        assert_eq!(editor.grand_total().to_string(), "7.00");
    }

    #[test]
    fn test_user_can_override_looked_up_price() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        let t = ticket(editor.select_item(row, "42"));
        editor.complete_lookup(&t, &kg_details());

        editor.set_quantity(row, "10");
        editor.set_unit_price(row, "3.00");
        assert_eq!(editor.grand_total().to_string(), "30.00");
    }

    #[test]
    fn test_clearing_selection_keeps_quantity() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        editor.set_quantity(row, "5");
        let t = ticket(editor.select_item(row, "42"));
        editor.complete_lookup(&t, &kg_details());
        assert_eq!(editor.grand_total().to_string(), "17.50");

        assert_eq!(editor.select_item(row, ""), Selection::Cleared);

        let r = editor.row(row).unwrap();
        assert_eq!(r.item_id(), None);
        assert_eq!(r.unit_label(), "");
        assert_eq!(r.unit_price_text(), "");
        assert_eq!(r.balance_text(), "");
        assert_eq!(r.quantity_text(), "5");
        assert!(r.line_total().is_zero());
        assert!(editor.grand_total().is_zero());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        let first = ticket(editor.select_item(row, "1"));
        let second = ticket(editor.select_item(row, "2"));

        let newer = ItemDetails {
            unit_of_measure_name: Some("pcs".into()),
            current_price: Money::from(2),
            current_balance: Money::from(5),
        };
        assert_eq!(editor.complete_lookup(&second, &newer), LookupOutcome::Applied);
        assert_eq!(editor.complete_lookup(&first, &kg_details()), LookupOutcome::Stale);

        let r = editor.row(row).unwrap();
        assert_eq!(r.item_id(), Some("2"));
        assert_eq!(r.unit_label(), "pcs");
    }

    #[test]
    fn test_response_after_clear_is_ignored() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        let t = ticket(editor.select_item(row, "42"));
        editor.select_item(row, "");
        assert_eq!(editor.complete_lookup(&t, &kg_details()), LookupOutcome::Stale);
        assert_eq!(editor.row(row).unwrap().unit_label(), "");
    }

    #[test]
    fn test_response_for_removed_row() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        let t = ticket(editor.select_item(row, "42"));
        editor.remove_row(row);
        assert_eq!(editor.complete_lookup(&t, &kg_details()), LookupOutcome::RowGone);
        assert!(editor.grand_total().is_zero());
    }

    #[test]
    fn test_failed_lookup_marks_row_only_when_current() {
        let mut editor = LineItemEditor::new();
        let row = editor.add_row();
        let first = ticket(editor.select_item(row, "1"));
        let second = ticket(editor.select_item(row, "2"));

        assert_eq!(editor.fail_lookup(&first), LookupOutcome::Stale);
        assert_eq!(editor.row(row).unwrap().lookup_status(), LookupStatus::Pending);

        assert_eq!(editor.fail_lookup(&second), LookupOutcome::Applied);
        assert_eq!(editor.row(row).unwrap().lookup_status(), LookupStatus::Failed);
    }

    #[test]
    fn test_select_on_missing_row() {
        let mut editor = LineItemEditor::new();
        assert_eq!(editor.select_item(3, "42"), Selection::NoSuchRow);
    }
}
