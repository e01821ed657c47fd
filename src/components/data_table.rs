//! Data Table Component
//!
//! Searchable, sortable replacement for server-rendered `table.datatable`.

use leptos::prelude::*;

use inventory_line_items::{SortDirection, SortState, TableData};

use crate::context::use_app_context;

/// Table with a search box and click-to-sort headers
///
/// # Arguments
/// * `table` - Header and body cells read from the original table
/// * `table_id` - `id` carried over so export buttons still find it
/// * `table_class` - `class` carried over from the original table
#[component]
pub fn DataTable(
    table: TableData,
    table_id: Option<String>,
    table_class: Option<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let placeholder = ctx.config().search_placeholder;
    let total = table.rows.len();
    let column_count = table.headers.len().max(1).to_string();
    let headers = table.headers.clone();
    let table = StoredValue::new(table);

    let (query, set_query) = signal(String::new());
    let (sort, set_sort) = signal::<Option<SortState>>(None);

    let visible = move || {
        table.with_value(|t| {
            t.visible_rows(&query.get(), sort.get())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };
    let indicator = move |column: usize| match sort.get() {
        Some(s) if s.column == column => match s.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    };

    view! {
        <div class="datatable-wrapper">
            <div class="datatable-search mb-2">
                <input
                    type="search"
                    class="form-control form-control-sm"
                    placeholder=placeholder
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>
            <div class="table-responsive">
                <table id=table_id class=table_class.unwrap_or_else(|| "table datatable".to_string())>
                    <thead>
                        <tr>
                            {headers.into_iter().enumerate().map(|(column, header)| view! {
                                <th
                                    class="sortable"
                                    role="button"
                                    on:click=move |_| set_sort.update(|s| *s = Some(SortState::toggled(*s, column)))
                                >
                                    {header}
                                    {move || indicator(column)}
                                </th>
                            }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = visible();
                            if rows.is_empty() {
                                view! {
                                    <tr>
                                        <td colspan=column_count.clone() class="text-center text-muted">
                                            "No matching records found"
                                        </td>
                                    </tr>
                                }.into_any()
                            } else {
                                rows.into_iter().map(|row| view! {
                                    <tr>
                                        {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                    </tr>
                                }).collect_view().into_any()
                            }
                        }}
                    </tbody>
                </table>
            </div>
            <div class="datatable-info small text-muted">
                {move || format!("Showing {} of {} entries", visible().len(), total)}
            </div>
        </div>
    }
}
