//! Inventory Line Items
//!
//! Browser-independent core of the inventory frontend: the line-item
//! editor with its totals and lookup sequencing, money arithmetic,
//! field-name templates, data-table search/sort and CSV encoding.

pub mod csv_export;
pub mod editor;
pub mod error;
pub mod lookup;
pub mod money;
pub mod row;
pub mod table;
pub mod template;

pub use csv_export::{encode_csv, export_filename, CSV_MIME_TYPE, DEFAULT_EXPORT_FILENAME};
pub use editor::{LineItemEditor, Selection};
pub use error::{CsvExportError, LookupError};
pub use lookup::{ItemDetails, ItemListResponse, ItemOption, ItemSummary, LookupOutcome, LookupStatus, LookupTicket};
pub use money::Money;
pub use row::{LineItemRow, RowSeed};
pub use table::{SortDirection, SortState, TableData};
pub use template::{FieldTemplate, RowFieldNames, RowFieldTemplates, INDEX_PLACEHOLDER};
