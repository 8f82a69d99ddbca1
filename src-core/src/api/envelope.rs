//! Response Envelopes
//!
//! Some endpoints answer with the bare payload, others wrap it as
//! `{success, data, message, page, limit, total, pages}`. Both shapes are
//! accepted.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::store::Pagination;

/// Records decoded from a list response
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Present only when the backend paginates
    pub pagination: Option<Pagination>,
    /// Entries that failed to decode and were left out
    pub skipped: usize,
}

/// Strip the envelope, failing on `success: false`
pub fn unwrap_envelope(value: Value) -> Result<Value, ApiError> {
    match value {
        Value::Object(mut map) if map.contains_key("success") => {
            if map.get("success").and_then(Value::as_bool) != Some(true) {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Request failed")
                    .to_string();
                return Err(ApiError::Unsuccessful(message));
            }
            match map.remove("data") {
                Some(data) => Ok(data),
                None => Ok(Value::Object(map)),
            }
        }
        other => Ok(other),
    }
}

fn pagination_of(value: &Value) -> Option<Pagination> {
    let field = |name: &str| value.get(name).and_then(Value::as_u64);
    let page = field("page")?;
    let defaults = Pagination::default();
    Some(Pagination {
        page: page as u32,
        limit: field("limit").map(|v| v as u32).unwrap_or(defaults.limit),
        total: field("total").unwrap_or(0),
        pages: field("pages").map(|v| v as u32).unwrap_or(defaults.pages),
    })
}

/// Decode a list, skipping entries that do not fit the record type
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<ListPage<T>, ApiError> {
    let pagination = pagination_of(&value);
    let data = unwrap_envelope(value)?;
    let Value::Array(entries) = data else {
        return Err(ApiError::Decode(format!("expected a list, got {}", kind_of(&data))));
    };

    let mut items = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        match serde_json::from_value::<T>(entry) {
            Ok(item) => items.push(item),
            Err(e) => {
                skipped += 1;
                log::warn!("Skipping undecodable record: {}", e);
            }
        }
    }
    Ok(ListPage {
        items,
        pagination,
        skipped,
    })
}

/// Decode a single record
pub fn decode_one<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    let data = unwrap_envelope(value)?;
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_bare_list() {
        let page: ListPage<Named> = decode_list(json!([{"name": "a"}, {"name": "b"}])).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination, None);
    }

    #[test]
    fn test_enveloped_list_with_pagination() {
        let page: ListPage<Named> = decode_list(json!({
            "success": true,
            "data": [{"name": "a"}],
            "page": 2, "limit": 10, "total": 11, "pages": 2
        }))
        .unwrap();
        assert_eq!(page.items, vec![Named { name: "a".into() }]);
        assert_eq!(
            page.pagination,
            Some(Pagination { page: 2, limit: 10, total: 11, pages: 2 })
        );
    }

    #[test]
    fn test_unsuccessful_envelope() {
        let err = decode_list::<Named>(json!({"success": false, "message": "Invalid category"})).unwrap_err();
        assert_eq!(err, ApiError::Unsuccessful("Invalid category".into()));
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let page: ListPage<Named> = decode_list(json!([{"name": "ok"}, {"other": 1}])).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.skipped, 1);
    }

    #[test]
    fn test_list_expected() {
        let err = decode_list::<Named>(json!({"name": "x"})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_decode_one_both_shapes() {
        let bare: Named = decode_one(json!({"name": "a"})).unwrap();
        let wrapped: Named = decode_one(json!({"success": true, "data": {"name": "a"}})).unwrap();
        assert_eq!(bare, wrapped);
    }
}
