//! Item Commands
//!
//! Frontend bindings for the item endpoints of the inventory REST API.

use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use inventory_line_items::{ItemDetails, ItemListResponse, ItemOption, LookupError};

// ========================
// URLs
// ========================

/// `{api_base}/items/{id}/`, id percent-encoded as one path segment
pub fn item_details_url(api_base: &str, item_id: &str) -> String {
    format!(
        "{}/items/{}/",
        api_base.trim_end_matches('/'),
        utf8_percent_encode(item_id.trim(), NON_ALPHANUMERIC)
    )
}

pub fn item_list_url(api_base: &str) -> String {
    format!("{}/items/", api_base.trim_end_matches('/'))
}

// ========================
// Commands
// ========================

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, LookupError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| LookupError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(LookupError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| LookupError::Decode(e.to_string()))
}

/// Current unit, price and balance of one item
pub async fn fetch_item_details(api_base: &str, item_id: &str) -> Result<ItemDetails, LookupError> {
    get_json(&item_details_url(api_base, item_id)).await
}

/// All items as selector options
pub async fn list_item_options(api_base: &str) -> Result<Vec<ItemOption>, LookupError> {
    let list: ItemListResponse = get_json(&item_list_url(api_base)).await?;
    Ok(list.into_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_details_url() {
        assert_eq!(item_details_url("/api", "42"), "/api/items/42/");
        assert_eq!(item_details_url("/api/", " 42 "), "/api/items/42/");
        assert_eq!(item_details_url("/api", "a/b"), "/api/items/a%2Fb/");
    }

    #[test]
    fn test_item_list_url() {
        assert_eq!(item_list_url("https://host/api"), "https://host/api/items/");
    }
}
