//! Field-Name Templates
//!
//! Form field names carry the row index through a literal `INDEX`
//! placeholder, e.g. `items[INDEX][quantity]` -> `items[3][quantity]`.

/// Placeholder substituted with the row index
pub const INDEX_PLACEHOLDER: &str = "INDEX";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTemplate {
    pattern: String,
}

impl FieldTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self { pattern: pattern.into() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace every placeholder occurrence with `index`
    pub fn render(&self, index: usize) -> String {
        self.pattern.replace(INDEX_PLACEHOLDER, &index.to_string())
    }

    pub fn has_placeholder(&self) -> bool {
        self.pattern.contains(INDEX_PLACEHOLDER)
    }
}

/// Names of the submitted fields of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFieldTemplates {
    pub item: FieldTemplate,
    pub quantity: FieldTemplate,
    pub unit_price: FieldTemplate,
}

impl Default for RowFieldTemplates {
    fn default() -> Self {
        Self {
            item: FieldTemplate::new("items[INDEX][item]"),
            quantity: FieldTemplate::new("items[INDEX][quantity]"),
            unit_price: FieldTemplate::new("items[INDEX][unit_price]"),
        }
    }
}

/// Rendered names for a concrete row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFieldNames {
    pub item: String,
    pub quantity: String,
    pub unit_price: String,
}

impl RowFieldTemplates {
    pub fn for_row(&self, index: usize) -> RowFieldNames {
        RowFieldNames {
            item: self.item.render(index),
            quantity: self.quantity.render(index),
            unit_price: self.unit_price.render(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_every_placeholder() {
        let t = FieldTemplate::new("row-INDEX-items[INDEX]");
        assert_eq!(t.render(7), "row-7-items[7]");
        assert!(t.has_placeholder());
    }

    #[test]
    fn test_default_names() {
        let names = RowFieldTemplates::default().for_row(2);
        assert_eq!(names.item, "items[2][item]");
        assert_eq!(names.quantity, "items[2][quantity]");
        assert_eq!(names.unit_price, "items[2][unit_price]");
    }

    #[test]
    fn test_default_names_match_server_keys() {
        // The server collects rows by keys ending in `][item]` and reads the
        // siblings with the same index
        for index in [0, 3, 12] {
            let names = RowFieldTemplates::default().for_row(index);
            assert!(names.item.starts_with("items["));
            assert!(names.item.ends_with("][item]"));
            let key_index = names.item.split('[').nth(1).and_then(|s| s.split(']').next());
            assert_eq!(key_index, Some(index.to_string().as_str()));
            assert_eq!(names.quantity, format!("items[{}][quantity]", index));
            assert_eq!(names.unit_price, format!("items[{}][unit_price]", index));
        }
    }

    #[test]
    fn test_pattern_without_placeholder_is_unchanged() {
        let t = FieldTemplate::new("notes");
        assert!(!t.has_placeholder());
        assert_eq!(t.render(1), "notes");
    }
}
