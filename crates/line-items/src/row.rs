//! Line-Item Row
//!
//! One quantity/price entry of the dynamic form.

use crate::lookup::{ItemDetails, LookupStatus};
use crate::money::Money;

/// Field values of a row that already exists in the page markup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSeed {
    pub item_id: Option<String>,
    pub unit_label: String,
    pub unit_price: String,
    pub balance: Option<Money>,
    pub quantity: String,
}

/// A single line item. Editable fields are kept as the raw text the user
/// typed; numeric views go through [`Money::parse_or_zero`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    index: usize,
    item_id: Option<String>,
    unit_label: String,
    unit_price: String,
    available_balance: Option<Money>,
    quantity: String,
    line_total: Money,
    lookup_token: u64,
    lookup_status: LookupStatus,
}

impl LineItemRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            item_id: None,
            unit_label: String::new(),
            unit_price: String::new(),
            available_balance: None,
            quantity: String::new(),
            line_total: Money::zero(),
            lookup_token: 0,
            lookup_status: LookupStatus::Idle,
        }
    }

    /// Row rebuilt from existing markup; its total is recomputed by the editor
    pub fn restored(index: usize, seed: RowSeed) -> Self {
        let item_id = seed.item_id.filter(|id| !id.trim().is_empty());
        let lookup_status = if item_id.is_some() { LookupStatus::Loaded } else { LookupStatus::Idle };
        Self {
            item_id,
            unit_label: seed.unit_label,
            unit_price: seed.unit_price,
            available_balance: seed.balance,
            quantity: seed.quantity,
            lookup_status,
            ..Self::new(index)
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }

    /// Raw price text as shown in the editable price field
    pub fn unit_price_text(&self) -> &str {
        &self.unit_price
    }

    /// Raw quantity text as shown in the quantity field
    pub fn quantity_text(&self) -> &str {
        &self.quantity
    }

    pub fn unit_price(&self) -> Money {
        Money::parse_or_zero(&self.unit_price)
    }

    pub fn quantity(&self) -> Money {
        Money::parse_or_zero(&self.quantity)
    }

    pub fn line_total(&self) -> &Money {
        &self.line_total
    }

    pub fn available_balance(&self) -> Option<&Money> {
        self.available_balance.as_ref()
    }

    /// Balance as display text, empty when no item is loaded
    pub fn balance_text(&self) -> String {
        self.available_balance
            .as_ref()
            .map(Money::to_trimmed_string)
            .unwrap_or_default()
    }

    /// Upper bound for the quantity input
    pub fn max_quantity(&self) -> Option<&Money> {
        self.available_balance.as_ref()
    }

    /// Quantity typed beyond the known balance. Advisory only.
    pub fn exceeds_balance(&self) -> bool {
        match &self.available_balance {
            Some(balance) => self.quantity() > *balance,
            None => false,
        }
    }

    pub fn lookup_status(&self) -> LookupStatus {
        self.lookup_status
    }

    pub(crate) fn lookup_token(&self) -> u64 {
        self.lookup_token
    }

    pub(crate) fn set_quantity(&mut self, text: &str) {
        self.quantity = text.to_string();
    }

    pub(crate) fn set_unit_price(&mut self, text: &str) {
        self.unit_price = text.to_string();
    }

    /// Start a new lookup generation; earlier tokens become stale
    pub(crate) fn bump_token(&mut self) -> u64 {
        self.lookup_token += 1;
        self.lookup_token
    }

    pub(crate) fn begin_lookup(&mut self, item_id: &str) -> u64 {
        self.item_id = Some(item_id.to_string());
        self.lookup_status = LookupStatus::Pending;
        self.bump_token()
    }

    /// Item deselected: unit, price and balance go, quantity stays
    pub(crate) fn clear_item(&mut self) {
        self.bump_token();
        self.item_id = None;
        self.unit_label.clear();
        self.unit_price.clear();
        self.available_balance = None;
        self.lookup_status = LookupStatus::Idle;
    }

    pub(crate) fn apply_details(&mut self, details: &ItemDetails) {
        self.unit_label = details.unit_of_measure_name.clone().unwrap_or_default();
        self.unit_price = details.current_price.to_string();
        self.available_balance = Some(details.current_balance.clone());
        self.lookup_status = LookupStatus::Loaded;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.lookup_status = LookupStatus::Failed;
    }

    /// total = round2(quantity x unit price)
    pub(crate) fn recompute_total(&mut self) -> &Money {
        self.line_total = (&self.quantity() * &self.unit_price()).round2();
        &self.line_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_blank() {
        let row = LineItemRow::new(3);
        assert_eq!(row.index(), 3);
        assert_eq!(row.item_id(), None);
        assert!(row.line_total().is_zero());
        assert_eq!(row.balance_text(), "");
        assert_eq!(row.lookup_status(), LookupStatus::Idle);
    }

    #[test]
    fn test_restored_row_drops_blank_item() {
        let row = LineItemRow::restored(1, RowSeed { item_id: Some(" ".into()), quantity: "2".into(), ..Default::default() });
        assert_eq!(row.item_id(), None);
        assert_eq!(row.lookup_status(), LookupStatus::Idle);
        assert_eq!(row.quantity_text(), "2");
    }

    #[test]
    fn test_recompute_total_coerces_invalid_to_zero() {
        let mut row = LineItemRow::new(0);
        row.set_quantity("4");
        row.set_unit_price("2.125");
        assert_eq!(row.recompute_total().to_string(), "8.50");

        row.set_quantity("four");
        assert_eq!(row.recompute_total().to_string(), "0.00");

        row.set_quantity("3");
        row.set_unit_price("");
        assert_eq!(row.recompute_total().to_string(), "0.00");
    }

    #[test]
    fn test_exceeds_balance() {
        let mut row = LineItemRow::new(0);
        row.set_quantity("150");
        assert!(!row.exceeds_balance());

        row.apply_details(&ItemDetails {
            unit_of_measure_name: Some("kg".into()),
            current_price: Money::parse_or_zero("3.50"),
            current_balance: Money::from(100),
        });
        assert!(row.exceeds_balance());

        row.set_quantity("100");
        assert!(!row.exceeds_balance());
    }
}
