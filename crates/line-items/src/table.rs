//! Data Table Model
//!
//! Search and sort over plain cell text for the data-table widget.

use std::cmp::Ordering;

/// Header and body cells of one table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Next state after clicking `column`: same column flips direction,
    /// another column starts ascending
    pub fn toggled(current: Option<SortState>, column: usize) -> SortState {
        match current {
            Some(s) if s.column == column && s.direction == SortDirection::Ascending => SortState {
                column,
                direction: SortDirection::Descending,
            },
            _ => SortState {
                column,
                direction: SortDirection::Ascending,
            },
        }
    }
}

impl TableData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Rows matching `query` (case-insensitive substring of any cell),
    /// ordered by `sort`. Row order is stable for equal keys.
    pub fn visible_rows(&self, query: &str, sort: Option<SortState>) -> Vec<&Vec<String>> {
        let needle = query.trim().to_lowercase();
        let mut rows: Vec<&Vec<String>> = self
            .rows
            .iter()
            .filter(|row| needle.is_empty() || row.iter().any(|c| c.to_lowercase().contains(&needle)))
            .collect();

        if let Some(sort) = sort {
            rows.sort_by(|a, b| {
                let ord = compare_cells(
                    a.get(sort.column).map(String::as_str).unwrap_or(""),
                    b.get(sort.column).map(String::as_str).unwrap_or(""),
                );
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }
}

fn numeric_value(cell: &str) -> Option<f64> {
    let cleaned: String = cell.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numbers compare numerically and sort before text
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.trim().to_lowercase().cmp(&b.trim().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData::new(
            vec!["Code".into(), "Item".into(), "Balance".into()],
            vec![
                vec!["A-1".into(), "Bolts".into(), "1,200".into()],
                vec!["A-2".into(), "nuts".into(), "90".into()],
                vec!["B-1".into(), "Washers".into(), "300".into()],
            ],
        )
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let table = sample();
        let rows = table.visible_rows("NUT", None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "A-2");
        assert_eq!(table.visible_rows("  ", None).len(), 3);
        assert!(table.visible_rows("zzz", None).is_empty());
    }

    #[test]
    fn test_numeric_sort() {
        let table = sample();
        let asc = table.visible_rows("", Some(SortState { column: 2, direction: SortDirection::Ascending }));
        let order: Vec<&str> = asc.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(order, vec!["A-2", "B-1", "A-1"]);
    }

    #[test]
    fn test_text_sort_descending() {
        let table = sample();
        let desc = table.visible_rows("", Some(SortState { column: 1, direction: SortDirection::Descending }));
        let order: Vec<&str> = desc.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(order, vec!["Washers", "nuts", "Bolts"]);
    }

    #[test]
    fn test_sort_toggle() {
        let first = SortState::toggled(None, 1);
        assert_eq!(first.direction, SortDirection::Ascending);
        let second = SortState::toggled(Some(first), 1);
        assert_eq!(second.direction, SortDirection::Descending);
        let other = SortState::toggled(Some(second), 0);
        assert_eq!(other, SortState { column: 0, direction: SortDirection::Ascending });
    }

    #[test]
    fn test_missing_cells_sort_as_text() {
        let table = TableData::new(vec![], vec![vec!["x".into()], vec!["y".into(), "1".into()]]);
        let rows = table.visible_rows("", Some(SortState { column: 1, direction: SortDirection::Ascending }));
        assert_eq!(rows[0][0], "y");
    }
}
