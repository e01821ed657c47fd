//! Browser-Side Commands
//!
//! REST lookups against the inventory API and browser actions
//! (download, print), organized by concern.

mod items;
mod browser;

// Re-export all public items
pub use items::*;
pub use browser::*;
