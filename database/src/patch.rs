//! Field whitelist applied to partial ticket updates.

use bson::{Bson, DateTime, Document};
use serde_json::{Map, Value};

/// A field clients may change, and how its JSON value becomes a stored value.
/// `coerce` returns `None` for a value of the wrong type.
pub struct PatchField {
    pub name: &'static str,
    coerce: fn(&Value) -> Option<Bson>,
}

pub const UPDATABLE_FIELDS: &[PatchField] = &[
    PatchField { name: "title", coerce: text },
    PatchField { name: "description", coerce: text },
    PatchField { name: "site", coerce: text },
    PatchField { name: "category", coerce: text },
    PatchField { name: "assignedTo", coerce: text },
    PatchField { name: "priority", coerce: integer },
    PatchField { name: "status", coerce: text },
];

fn text(value: &Value) -> Option<Bson> {
    value.as_str().map(Bson::from)
}

// any JSON number is accepted, fractions are truncated
fn integer(value: &Value) -> Option<Bson> {
    value.as_f64().map(|n| Bson::Int64(n as i64))
}

/// Builds the `$set` body for `updates`. Unknown keys and mistyped values are
/// dropped. `updatedAt` is refreshed whenever `updates` is non-empty, even if
/// nothing else survived.
pub fn build_patch(updates: &Map<String, Value>, now: DateTime) -> Document {
    let mut set = Document::new();

    for field in UPDATABLE_FIELDS {
        if let Some(value) = updates.get(field.name).and_then(field.coerce) {
            set.insert(field.name, value);
        }
    }

    if !updates.is_empty() {
        set.insert("updatedAt", now);
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> Document {
        let updates = match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        };

        build_patch(&updates, DateTime::from_millis(1_000))
    }

    #[test]
    fn test_empty_updates_produce_empty_patch() {
        assert!(patch(json!({})).is_empty());
    }

    #[test]
    fn test_recognised_fields_are_copied() {
        let set = patch(json!({
            "title": "New title",
            "description": "d",
            "site": "s",
            "category": "c",
            "assignedTo": "a",
            "status": "closed",
            "priority": 3
        }));

        assert_eq!(set.len(), 8);
        assert_eq!(set.get_str("title").unwrap(), "New title");
        assert_eq!(set.get_str("assignedTo").unwrap(), "a");
        assert_eq!(set.get_str("status").unwrap(), "closed");
        assert_eq!(set.get_i64("priority").unwrap(), 3);
        assert_eq!(set.get_datetime("updatedAt").unwrap(), &DateTime::from_millis(1_000));
    }

    #[test]
    fn test_priority_is_truncated() {
        let set = patch(json!({ "priority": 2.9 }));
        assert_eq!(set.get_i64("priority").unwrap(), 2);
    }

    #[test]
    fn test_mistyped_and_unknown_are_dropped() {
        let set = patch(json!({
            "priority": "not-a-number",
            "title": 7,
            "status": null,
            "createdBy": "mallory",
            "id": "65f1c0ffee00000000000001",
            "createdOn": "2020-01-01T00:00:00Z",
            "colour": "red"
        }));

        assert_eq!(set.len(), 1);
        assert!(set.contains_key("updatedAt"));
    }
}
