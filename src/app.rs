//! Inventory Frontend Widgets
//!
//! Mounts the Leptos widgets into the server-rendered page: the line-item
//! form and the data tables.

use leptos::logging::{log, warn};
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

use crate::components::{DataTable, LineItemForm};
use crate::context::AppContext;
use crate::dom;

/// Container whose presence enables the line-item form
pub const FORM_CONTAINER_ID: &str = "dynamic-form-container";
/// Element the rows are rendered into
pub const ROWS_CONTAINER_ID: &str = "items-container";

pub fn mount_widgets(ctx: AppContext) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    mount_line_item_form(&document, ctx);
    mount_data_tables(&document, ctx);
}

fn mount_line_item_form(document: &Document, ctx: AppContext) {
    let Some(form_container) = document.get_element_by_id(FORM_CONTAINER_ID) else {
        return;
    };
    let container = document
        .get_element_by_id(ROWS_CONTAINER_ID)
        .unwrap_or_else(|| form_container.clone());
    let template = dom::read_row_template(document, ctx.config().field_templates());

    // Rows stay in `container`; only the alert stack is rendered by Leptos
    let Ok(host) = document.create_element("div") else {
        return;
    };
    host.set_class_name("alert-stack-host");
    if let Err(e) = form_container.prepend_with_node_1(&host) {
        web_sys::console::warn_2(&"[EDITOR] Could not place alert host".into(), &e);
        return;
    }
    let Ok(host) = host.dyn_into::<HtmlElement>() else {
        warn!("[EDITOR] Alert host is not an HTML element");
        return;
    };
    mount_to(host, move || {
        provide_context(ctx);
        view! { <LineItemForm container=container template=template /> }
    })
    .forget();
}

fn mount_data_tables(document: &Document, ctx: AppContext) {
    for table in dom::query_all(document, "table.datatable") {
        let Some(parent) = table.parent_node() else {
            continue;
        };
        let Ok(wrapper) = document.create_element("div") else {
            continue;
        };
        let anchor: &Node = &table;
        if let Err(e) = parent.insert_before(&wrapper, Some(anchor)) {
            web_sys::console::warn_2(&"[TABLE] Could not place wrapper".into(), &e);
            continue;
        }

        let data = dom::read_table_data(&table);
        let table_id = table.get_attribute("id");
        let table_class = table.get_attribute("class");
        table.remove();
        log!("[TABLE] {} rows in {:?}", data.rows.len(), table_id);

        let Ok(wrapper) = wrapper.dyn_into::<HtmlElement>() else {
            continue;
        };
        mount_to(wrapper, move || {
            provide_context(ctx);
            view! { <DataTable table=data table_id=table_id table_class=table_class /> }
        })
        .forget();
    }
}
