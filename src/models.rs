//! Frontend Models
//!
//! UI-side data structures. Editor and lookup types come from
//! `inventory-line-items`.

pub use inventory_line_items::ItemOption;

/// Severity of an alert, mapped to Bootstrap contextual classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            AlertLevel::Success => "alert alert-success alert-dismissible",
            AlertLevel::Info => "alert alert-info alert-dismissible",
            AlertLevel::Warning => "alert alert-warning alert-dismissible",
            AlertLevel::Danger => "alert alert-danger alert-dismissible",
        }
    }
}

/// One message in the alert stack
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u32,
    pub level: AlertLevel,
    pub message: String,
}

/// Text shown by a custom file input: the part after the last backslash
/// (browsers report `C:\fakepath\name.ext`)
pub fn display_file_name(value: &str) -> &str {
    value.rsplit('\\').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_file_name() {
        assert_eq!(display_file_name("C:\\fakepath\\invoice.pdf"), "invoice.pdf");
        assert_eq!(display_file_name("plain.txt"), "plain.txt");
        assert_eq!(display_file_name(""), "");
    }

    #[test]
    fn test_alert_classes() {
        assert!(AlertLevel::Warning.css_class().contains("alert-warning"));
    }
}
