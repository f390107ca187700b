//! Response envelope normalization.
//!
//! The catalog API is inconsistent about where it puts its payload:
//!
//! | Endpoint | Shape |
//! |---|---|
//! | `people?page=n&limit=m` | `{ results: [{uid, name, url}], next, previous, total_records, total_pages }` |
//! | `people?name=q` | `{ result: [{uid, properties: {name, url, ...}}] }` |
//! | `people/{id}` | `{ message, result: { uid, properties: {...} } }` |
//!
//! Every shape decision lives here. Callers receive [`CharacterPage`] and
//! [`CharacterDetails`] and never look at raw JSON.

use crate::model::{CharacterDetails, CharacterPage, CharacterSummary, FetchError, Uid};
use serde_json::Value;
use tracing::warn;

/// Extract the summaries of a list response.
///
/// Fallback order: `results` array, then `result` array, else empty.
/// Items without a usable `uid` are skipped.
pub fn extract_summaries(value: &Value) -> Vec<CharacterSummary> {
    let items = value
        .get("results")
        .and_then(Value::as_array)
        .or_else(|| value.get("result").and_then(Value::as_array));

    let Some(items) = items else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let summary = summary_from_item(item);
            if summary.is_none() {
                warn!(item = %item, "Skipping list item without a uid");
            }
            summary
        })
        .collect()
}

/// Normalize a whole list response: summaries plus pagination metadata.
pub fn normalize_page(value: &Value) -> CharacterPage {
    CharacterPage {
        characters: extract_summaries(value),
        next: value
            .get("next")
            .and_then(Value::as_str)
            .map(str::to_string),
        total_records: value.get("total_records").and_then(as_count),
        total_pages: value.get("total_pages").and_then(as_count),
    }
}

/// Unwrap a detail response (`result.properties`) into a record.
///
/// The uid is taken from `result.uid` when the properties do not carry one.
///
/// # Errors
///
/// `FetchError::Malformed` when `result.properties` is missing or does not
/// deserialize into a record.
pub fn unwrap_details(value: Value) -> Result<CharacterDetails, FetchError> {
    let Value::Object(mut root) = value else {
        return Err(FetchError::Malformed("expected a JSON object".into()));
    };
    let Some(Value::Object(mut result)) = root.remove("result") else {
        return Err(FetchError::Malformed("missing `result` object".into()));
    };
    let envelope_uid = result.get("uid").and_then(uid_from_value);
    let Some(properties) = result.remove("properties").filter(Value::is_object) else {
        return Err(FetchError::Malformed("missing `result.properties` object".into()));
    };

    let mut details: CharacterDetails = serde_json::from_value(properties)?;
    if details.uid.is_none() {
        details.uid = envelope_uid;
    }
    Ok(details)
}

fn summary_from_item(item: &Value) -> Option<CharacterSummary> {
    let uid = item.get("uid").and_then(uid_from_value)?;
    let properties = item.get("properties");
    let field = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .or_else(|| properties.and_then(|p| p.get(key)).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    };
    Some(CharacterSummary::new(uid, field("name"), field("url")))
}

/// Uids arrive as strings, but tolerate bare numbers too.
fn uid_from_value(value: &Value) -> Option<Uid> {
    match value {
        Value::String(s) => Uid::new(s.as_str()).ok(),
        Value::Number(n) => Uid::new(n.to_string()).ok(),
        _ => None,
    }
}

fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(summaries: &[CharacterSummary]) -> Vec<&str> {
        summaries.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn results_array_is_used_first() {
        let value = json!({
            "results": [
                {"uid": "1", "name": "Luke Skywalker", "url": "https://x/people/1"},
                {"uid": "2", "name": "C-3PO", "url": "https://x/people/2"}
            ]
        });
        let summaries = extract_summaries(&value);
        insta::assert_debug_snapshot!(names(&summaries), @r#"
        [
            "Luke Skywalker",
            "C-3PO",
        ]
        "#);
    }

    #[test]
    fn result_array_is_the_fallback() {
        let value = json!({
            "result": [
                {"uid": "1", "name": "Luke Skywalker", "url": "u1"},
                {"uid": "2", "name": "C-3PO", "url": "u2"}
            ]
        });
        assert_eq!(names(&extract_summaries(&value)), ["Luke Skywalker", "C-3PO"]);
    }

    #[test]
    fn empty_object_yields_no_summaries() {
        assert!(extract_summaries(&json!({})).is_empty());
    }

    #[test]
    fn non_array_results_falls_through_to_result() {
        let value = json!({
            "results": null,
            "result": [{"uid": "3", "name": "R2-D2", "url": ""}]
        });
        assert_eq!(names(&extract_summaries(&value)), ["R2-D2"]);
    }

    #[test]
    fn result_object_is_not_a_list() {
        let value = json!({"result": {"uid": "1", "properties": {"name": "Luke"}}});
        assert!(extract_summaries(&value).is_empty());
    }

    #[test]
    fn name_search_items_read_from_properties() {
        let value = json!({
            "message": "ok",
            "result": [{
                "uid": "1",
                "description": "A person within the Star Wars universe",
                "properties": {
                    "name": "Luke Skywalker",
                    "url": "https://www.swapi.tech/api/people/1"
                }
            }]
        });
        let summaries = extract_summaries(&value);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].uid.as_str(), "1");
        assert_eq!(summaries[0].name, "Luke Skywalker");
        assert_eq!(summaries[0].url, "https://www.swapi.tech/api/people/1");
    }

    #[test]
    fn items_without_uid_are_skipped() {
        let value = json!({
            "results": [
                {"name": "Nobody"},
                {"uid": "", "name": "Blank"},
                {"uid": 5, "name": "Numeric"}
            ]
        });
        let summaries = extract_summaries(&value);
        assert_eq!(names(&summaries), ["Numeric"]);
        assert_eq!(summaries[0].uid.as_str(), "5");
    }

    #[test]
    fn normalize_page_reads_pagination_metadata() {
        let value = json!({
            "message": "ok",
            "total_records": 82,
            "total_pages": 9,
            "previous": null,
            "next": "https://www.swapi.tech/api/people?page=2&limit=10",
            "results": [{"uid": "1", "name": "Luke Skywalker", "url": "u"}]
        });
        let page = normalize_page(&value);
        assert!(page.has_next());
        assert_eq!(page.total_records, Some(82));
        assert_eq!(page.total_pages, Some(9));
        assert_eq!(page.characters.len(), 1);
    }

    #[test]
    fn normalize_page_null_next_means_last_page() {
        let value = json!({"next": null, "results": []});
        let page = normalize_page(&value);
        assert!(!page.has_next());
        assert_eq!(page.total_records, None);
    }

    #[test]
    fn unwrap_details_reads_nested_properties() {
        let value = json!({
            "message": "ok",
            "result": {
                "uid": "1",
                "properties": {
                    "name": "Luke Skywalker",
                    "height": "172",
                    "mass": "77",
                    "films": ["f1", "f2"],
                    "vehicles": ["v1"],
                    "starships": ["s1", "s2"]
                }
            }
        });
        let details = unwrap_details(value).unwrap();
        assert_eq!(details.name, "Luke Skywalker");
        assert_eq!(details.uid, Some(Uid::new("1").unwrap()));
        assert_eq!(details.films.len(), 2);
        assert_eq!(details.craft_count(), 3);
    }

    #[test]
    fn unwrap_details_rejects_missing_properties() {
        let err = unwrap_details(json!({"message": "ok", "result": {"uid": "1"}})).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn unwrap_details_rejects_non_object_root() {
        let err = unwrap_details(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn unwrap_details_keeps_record_with_null_attribute() {
        let value = json!({
            "message": "ok",
            "result": {
                "uid": "1",
                "properties": {"name": "Luke Skywalker", "homeworld": null, "films": null}
            }
        });
        let details = unwrap_details(value).unwrap();
        assert_eq!(details.name, "Luke Skywalker");
        assert_eq!(details.homeworld, "");
        assert!(details.films.is_empty());
    }

    #[test]
    fn unwrap_details_keeps_record_with_numeric_attribute() {
        let value = json!({
            "result": {"uid": 1, "properties": {"name": "Luke Skywalker", "height": 172}}
        });
        let details = unwrap_details(value).unwrap();
        assert_eq!(details.height, "172");
        assert_eq!(details.uid, Some(Uid::new("1").unwrap()));
    }

    #[test]
    fn unwrap_details_rejects_wrong_field_types() {
        let value = json!({"result": {"properties": {"films": "not a list"}}});
        assert!(matches!(
            unwrap_details(value),
            Err(FetchError::Malformed(_))
        ));
    }
}
