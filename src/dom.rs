//! Markup Readers
//!
//! Helpers over the server-rendered markup the widgets take over:
//! the row template, rows already in the form, and plain tables.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DocumentFragment, Element, Event, EventTarget, HtmlInputElement, HtmlSelectElement,
    HtmlTemplateElement, Node, NodeList,
};

use inventory_line_items::{FieldTemplate, ItemOption, Money, RowFieldTemplates, RowSeed, TableData};

pub const ROW_TEMPLATE_ID: &str = "item-row-template";

/// Markup of `#item-row-template` plus what it tells about items and field names
#[derive(Debug, Clone)]
pub struct RowTemplate {
    /// Row markup with the `INDEX` placeholder still in place
    pub markup: FieldTemplate,
    pub options: Vec<ItemOption>,
    pub fields: RowFieldTemplates,
}

impl RowTemplate {
    /// Row markup for `index`
    pub fn render(&self, index: usize) -> String {
        self.markup.render(index)
    }
}

/// Row used when the page carries no `#item-row-template`
pub fn default_row_markup(fields: &RowFieldTemplates) -> String {
    format!(
        concat!(
            r#"<tr class="item-row">"#,
            r#"<td><select class="form-select item-select" name="{item}" required><option value="">---------</option></select></td>"#,
            r#"<td class="item-uom"></td>"#,
            r#"<td class="item-balance"></td>"#,
            r#"<td><input type="number" class="form-control item-quantity" name="{quantity}" min="0" step="any" required></td>"#,
            r#"<td><input type="number" class="form-control item-price" name="{price}" min="0" step="0.01"></td>"#,
            r#"<td><input type="text" class="form-control-plaintext item-total" readonly tabindex="-1"></td>"#,
            r#"<td><button type="button" class="btn btn-outline-danger btn-sm remove-item-row">&times;</button></td>"#,
            r#"</tr>"#,
        ),
        item = fields.item.pattern(),
        quantity = fields.quantity.pattern(),
        price = fields.unit_price.pattern(),
    )
}

/// Attach a handler that lives as long as the page
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        web_sys::console::warn_2(&format!("[PAGE] Failed to bind {}", event).into(), &e);
    }
    cb.forget();
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document.query_selector_all(selector).map(elements).unwrap_or_default()
}

pub fn query_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map(elements).unwrap_or_default()
}

pub fn first_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// Current value of a form control, or the text of any other element
pub fn control_value(el: &Element) -> String {
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        text_of(el)
    }
}

/// Write a form control's value, or the text of any other element
pub fn set_control(el: &Element, text: &str) {
    if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(text);
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(text);
    } else {
        el.set_text_content(Some(text));
    }
}

fn field_value(row: &Element, selector: &str) -> String {
    first_within(row, selector).map(|el| control_value(&el)).unwrap_or_default()
}

/// Parse markup the way `<template>` does, so `<tr>` rows survive
fn parse_fragment(document: &Document, markup: &str) -> Option<DocumentFragment> {
    let holder = document
        .create_element("template")
        .ok()?
        .dyn_into::<HtmlTemplateElement>()
        .ok()?;
    holder.set_inner_html(markup);
    Some(holder.content())
}

/// Name attribute of `selector` if it still carries the index placeholder
fn name_template(root: &DocumentFragment, selector: &str) -> Option<FieldTemplate> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("name"))
        .map(FieldTemplate::new)
        .filter(FieldTemplate::has_placeholder)
}

/// Non-empty `<option>`s of `select`
fn select_options(select: &Element) -> Vec<ItemOption> {
    query_within(select, "option")
        .iter()
        .filter_map(|opt| {
            let value = opt.get_attribute("value").unwrap_or_default();
            if value.trim().is_empty() {
                return None;
            }
            Some(ItemOption { value, label: text_of(opt) })
        })
        .collect()
}

/// Read `#item-row-template`. Works for `<template>` and `<script>` holders;
/// without one the built-in row markup is used.
pub fn read_row_template(document: &Document, defaults: RowFieldTemplates) -> RowTemplate {
    let markup = document
        .get_element_by_id(ROW_TEMPLATE_ID)
        .map(|holder| holder.inner_html())
        .filter(|html| !html.trim().is_empty())
        .unwrap_or_else(|| default_row_markup(&defaults));

    let mut template = RowTemplate {
        markup: FieldTemplate::new(markup),
        options: Vec::new(),
        fields: defaults,
    };
    let Some(fragment) = parse_fragment(document, template.markup.pattern()) else {
        return template;
    };

    if let Some(select) = fragment.query_selector(".item-select").ok().flatten() {
        template.options = select_options(&select);
    }
    if let Some(t) = name_template(&fragment, ".item-select") {
        template.fields.item = t;
    }
    if let Some(t) = name_template(&fragment, ".item-quantity") {
        template.fields.quantity = t;
    }
    if let Some(t) = name_template(&fragment, ".item-price") {
        template.fields.unit_price = t;
    }
    template
}

/// Append `markup` to `container`, returning the row element it created
pub fn instantiate_row(document: &Document, container: &Element, markup: &str) -> Option<Element> {
    let fragment = parse_fragment(document, markup)?;
    let row = fragment.first_element_child()?;
    container.append_child(&fragment).ok()?;
    Some(row)
}

/// Fill an empty `.item-select` inside `row` with `options`
pub fn fill_item_options(document: &Document, row: &Element, options: &[ItemOption]) {
    let Some(select) = first_within(row, ".item-select") else {
        return;
    };
    if options.is_empty() || !select_options(&select).is_empty() {
        return;
    }
    for opt in options {
        let Ok(el) = document.create_element("option") else {
            continue;
        };
        let _ = el.set_attribute("value", &opt.value);
        el.set_text_content(Some(&opt.label));
        let _ = select.append_child(&el);
    }
}

/// `.item-row` elements already inside `container`, in document order
pub fn existing_rows(container: &Element) -> Vec<Element> {
    query_within(container, ".item-row")
}

/// Values of a server-rendered row
pub fn read_row_seed(row: &Element) -> RowSeed {
    let item_id = field_value(row, ".item-select");
    let balance = field_value(row, ".item-balance");
    RowSeed {
        item_id: Some(item_id).filter(|id| !id.trim().is_empty()),
        unit_label: field_value(row, ".item-uom"),
        unit_price: field_value(row, ".item-price"),
        balance: Some(balance)
            .filter(|b| !b.trim().is_empty())
            .map(|b| Money::parse_or_zero(&b)),
        quantity: field_value(row, ".item-quantity"),
    }
}

/// Text of every `th`/`td` of every `tr`, in document order
pub fn read_table_cells(table: &Element) -> Vec<Vec<String>> {
    query_within(table, "tr")
        .iter()
        .map(|tr| query_within(tr, "th, td").iter().map(text_of).collect())
        .collect()
}

/// Split a table into header cells (`thead` or a leading all-`th` row) and body rows
pub fn read_table_data(table: &Element) -> TableData {
    let header_row = first_within(table, "thead tr").or_else(|| {
        first_within(table, "tr").filter(|tr| {
            let cells = query_within(tr, "th, td");
            !cells.is_empty() && cells.iter().all(|c| c.tag_name().eq_ignore_ascii_case("th"))
        })
    });

    let headers = header_row
        .as_ref()
        .map(|tr| query_within(tr, "th, td").iter().map(text_of).collect())
        .unwrap_or_default();

    let rows = query_within(table, "tr")
        .iter()
        .filter(|tr| {
            let node: &Node = tr;
            header_row.as_ref().map_or(true, |h| !h.is_same_node(Some(node)))
        })
        .filter(|tr| tr.closest("thead").ok().flatten().is_none())
        .map(|tr| query_within(tr, "th, td").iter().map(text_of).collect())
        .collect();

    TableData::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template_from(markup: String) -> RowTemplate {
        RowTemplate {
            markup: FieldTemplate::new(markup),
            options: Vec::new(),
            fields: RowFieldTemplates::default(),
        }
    }

    #[test]
    fn test_default_row_markup_renders_server_names() {
        let template = template_from(default_row_markup(&RowFieldTemplates::default()));
        let html = template.render(4);
        assert!(html.contains(r#"name="items[4][item]""#));
        assert!(html.contains(r#"name="items[4][quantity]""#));
        assert!(html.contains(r#"name="items[4][unit_price]""#));
        assert!(!html.contains("INDEX"));
        // Rows repeat, so they must not carry the page's singleton ids
        assert!(!html.contains("id="));
    }

    #[test]
    fn test_page_template_keeps_its_own_fields() {
        // Store requisition rows carry no price but an extra remarks field
        let markup = concat!(
            r#"<tr class="item-row"><td><select class="item-select" name="items[INDEX][item]"></select></td>"#,
            r#"<td><input class="item-quantity" name="items[INDEX][quantity]"></td>"#,
            r#"<td><input name="items[INDEX][remarks]"></td></tr>"#,
        );
        let html = template_from(markup.to_string()).render(1);
        assert!(html.contains(r#"name="items[1][remarks]""#));
        assert!(!html.contains("item-price"));
    }
}
