//! UI Components
//!
//! Leptos components mounted into the server-rendered pages.

mod alert_stack;
mod data_table;
mod line_item_form;

pub use alert_stack::AlertStack;
pub use data_table::DataTable;
pub use line_item_form::LineItemForm;
