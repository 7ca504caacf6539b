//! Shared REST plumbing for the concrete resource kinds.
//!
//! Every kind maps onto the same `v1/{collection}` layout, so the
//! per-kind `Resource` impls delegate here and only differ in the
//! request bodies they build.

use crate::api_client::ApiClient;
use orchestrate::Result;
use serde_json::Value;

pub(crate) fn collection_path(collection: &str) -> String {
    format!("v1/{collection}")
}

pub(crate) fn object_path(collection: &str, name: &str) -> String {
    format!("v1/{collection}/{name}")
}

/// POST the object; the API echoes it back with a `created_at` stamp.
pub(crate) fn create(client: &ApiClient, collection: &str, body: &Value) -> Result<bool> {
    let response = client.post(&collection_path(collection), body)?;
    Ok(response.get("created_at").is_some())
}

pub(crate) fn read(client: &ApiClient, collection: &str, name: &str) -> Result<Option<Value>> {
    client.get(&object_path(collection, name))
}

pub(crate) fn update(
    client: &ApiClient,
    collection: &str,
    name: &str,
    body: &Value,
) -> Result<bool> {
    let response = client.put(&object_path(collection, name), body)?;
    Ok(!response.is_null())
}

pub(crate) fn delete(client: &ApiClient, collection: &str, name: &str) -> Result<bool> {
    let response = client.delete(&object_path(collection, name))?;
    if let Some(status) = response.get("status").and_then(Value::as_str) {
        return Ok(status == "Success");
    }
    Ok(!response.is_null())
}

/// Poll helper: does the object currently report the expected status?
pub(crate) fn status_is(
    client: &ApiClient,
    collection: &str,
    name: &str,
    expected: &str,
) -> Result<bool> {
    let Some(object) = read(client, collection, name)? else {
        return Ok(false);
    };
    Ok(object.get("status").and_then(Value::as_str) == Some(expected))
}

/// Poll helper: has the object disappeared from the API?
pub(crate) fn absent(client: &ApiClient, collection: &str, name: &str) -> Result<bool> {
    Ok(read(client, collection, name)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_the_v1_layout() {
        assert_eq!(collection_path("buckets"), "v1/buckets");
        assert_eq!(object_path("clusters", "prod"), "v1/clusters/prod");
    }
}
