//! Item Lookup Types
//!
//! Wire shapes of the item endpoints and the tickets that tag
//! in-flight lookups so stale responses can be dropped.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Item metadata returned by `GET /api/items/{id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetails {
    #[serde(default)]
    pub unit_of_measure_name: Option<String>,
    #[serde(default)]
    pub current_price: Money,
    #[serde(default)]
    pub current_balance: Money,
}

/// Entry of `GET /api/items/`, used to build selector options
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSummary {
    pub id: u64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// The list endpoint may or may not be paginated
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemListResponse {
    Plain(Vec<ItemSummary>),
    Paginated { results: Vec<ItemSummary> },
}

impl ItemListResponse {
    pub fn into_options(self) -> Vec<ItemOption> {
        let items = match self {
            ItemListResponse::Plain(items) => items,
            ItemListResponse::Paginated { results } => results,
        };
        items.into_iter().map(ItemOption::from).collect()
    }
}

/// One choice in a row's item selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemOption {
    pub value: String,
    pub label: String,
}

impl From<ItemSummary> for ItemOption {
    fn from(item: ItemSummary) -> Self {
        let label = match (item.code.is_empty(), item.description.is_empty()) {
            (false, false) => format!("{} - {}", item.code, item.description),
            (false, true) => item.code,
            (true, false) => item.description,
            (true, true) => format!("#{}", item.id),
        };
        Self { value: item.id.to_string(), label }
    }
}

/// Identifies one lookup request for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub row_index: usize,
    pub token: u64,
    pub item_id: String,
}

/// Lookup progress of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Pending,
    Loaded,
    Failed,
}

/// What happened when a lookup response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied,
    /// A newer selection (or a clear) superseded this request
    Stale,
    /// The row was removed while the request was in flight
    RowGone,
}
