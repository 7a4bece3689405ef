//! Document store contract consumed by the persistence gateway.

use async_trait::async_trait;
use serde_json::Value;

use super::Result;

/// External key-value document service.
///
/// Documents are JSON objects. Writes replace the whole document (last write
/// wins); there is no merge and no conflict detection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write `document` at `collection/key`, replacing any previous version.
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<()>;

    /// Read the document at `collection/key`.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Up to `n` documents of `collection` ordered by numeric `sort_field`,
    /// descending. Documents without a numeric value for the field sort last.
    async fn top_n(&self, collection: &str, sort_field: &str, n: usize) -> Result<Vec<Value>>;
}

/// Orders documents by a numeric field, descending, and keeps the first `n`.
///
/// Ties keep their input order.
pub fn rank_by_field(mut documents: Vec<Value>, sort_field: &str, n: usize) -> Vec<Value> {
    let key = |doc: &Value| doc.get(sort_field).and_then(Value::as_f64);
    documents.sort_by(|a, b| match (key(a), key(b)) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    documents.truncate(n);
    documents
}

/// Rejects keys that could escape a collection or collide with file names.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '\0']);
    if valid {
        Ok(())
    } else {
        Err(super::StoreError::InvalidKey(key.to_owned()))
    }
}

pub(crate) fn ensure_object(collection: &str, key: &str, document: &Value) -> Result<()> {
    if document.is_object() {
        Ok(())
    } else {
        Err(super::StoreError::NotAnObject {
            collection: collection.to_owned(),
            key: key.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ranks_descending_with_missing_fields_last() {
        let docs = vec![
            json!({"uid": "a", "coins": 5}),
            json!({"uid": "b"}),
            json!({"uid": "c", "coins": 50}),
            json!({"uid": "d", "coins": 12}),
        ];
        let ranked = rank_by_field(docs, "coins", 3);
        let uids: Vec<&str> = ranked.iter().filter_map(|d| d["uid"].as_str()).collect();
        assert_eq!(uids, vec!["c", "d", "a"]);
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("user-123").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
