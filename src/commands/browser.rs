//! Browser Commands
//!
//! File download and print through web-sys.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

/// Open the browser's native print dialog for the current page
pub fn print_page() -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    window.print().map_err(js_err)
}

/// Offer `contents` as a file download named `filename`
pub fn download_text(filename: &str, mime_type: &str, contents: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let body = document.body().ok_or("no body")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let link = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "anchor cast failed".to_string())?;
    link.set_href(&url);
    link.set_download(filename);
    link.style().set_property("visibility", "hidden").map_err(js_err)?;

    body.append_child(&link).map_err(js_err)?;
    link.click();
    body.remove_child(&link).map_err(js_err)?;
    Url::revoke_object_url(&url).map_err(js_err)?;
    Ok(())
}
