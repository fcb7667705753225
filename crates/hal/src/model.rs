//! The input document model.
//!
//! [`DocumentValue`] is the closed set of shapes a stored record can take.
//! Store kinds outside that set are carried by [`DocumentValue::Opaque`],
//! which only promises that the value renders as a string.

use std::fmt;
use std::sync::Arc;

use bson::Bson;
use bson::oid::ObjectId;
use indexmap::IndexMap;

/// A stored record, or any properties mapping handed to the assembler.
pub type Document = IndexMap<String, DocumentValue>;

/// A schema-less value read from the document store.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// Boolean.
    Boolean(bool),
    /// UTF-8 string.
    String(String),
    /// Store-native unique identifier.
    ObjectId(ObjectId),
    /// Explicit null.
    Null,
    /// Nested document.
    Mapping(Document),
    /// Ordered list.
    Sequence(Vec<DocumentValue>),
    /// Any other store kind; converted through its textual form.
    Opaque(OpaqueValue),
}

impl DocumentValue {
    /// Wraps an arbitrary displayable value as [`DocumentValue::Opaque`].
    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        DocumentValue::Opaque(OpaqueValue::new(value))
    }

    /// Short name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentValue::Int(_) => "int",
            DocumentValue::Long(_) => "long",
            DocumentValue::Float(_) => "float",
            DocumentValue::Double(_) => "double",
            DocumentValue::Boolean(_) => "boolean",
            DocumentValue::String(_) => "string",
            DocumentValue::ObjectId(_) => "objectId",
            DocumentValue::Null => "null",
            DocumentValue::Mapping(_) => "mapping",
            DocumentValue::Sequence(_) => "sequence",
            DocumentValue::Opaque(_) => "opaque",
        }
    }

    /// Returns true for [`DocumentValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    /// The text an identifier of this value takes in a URL path segment.
    ///
    /// Containers and null have no such form.
    pub fn identifier_form(&self) -> Option<String> {
        match self {
            DocumentValue::String(s) => Some(s.clone()),
            DocumentValue::ObjectId(oid) => Some(oid.to_hex()),
            DocumentValue::Int(i) => Some(i.to_string()),
            DocumentValue::Long(l) => Some(l.to_string()),
            DocumentValue::Float(f) => Some(f.to_string()),
            DocumentValue::Double(d) => Some(d.to_string()),
            DocumentValue::Boolean(b) => Some(b.to_string()),
            DocumentValue::Opaque(opaque) => Some(opaque.render()),
            DocumentValue::Null | DocumentValue::Mapping(_) | DocumentValue::Sequence(_) => None,
        }
    }
}

/// Identifier fields, highest precedence first.
pub const IDENTIFIER_KEYS: [&str; 2] = ["_id", "id"];

/// Returns a document's identifier: the first non-null of [`IDENTIFIER_KEYS`].
pub fn identifier_value(document: &Document) -> Option<&DocumentValue> {
    IDENTIFIER_KEYS
        .iter()
        .find_map(|key| document.get(*key).filter(|v| !v.is_null()))
}

/// Returns the path segment form of a document's identifier.
///
/// Embedded `self` links are built from this and document lookups compare
/// against it, so every advertised link resolves.
pub fn identifier_string(document: &Document) -> Option<String> {
    identifier_value(document).and_then(DocumentValue::identifier_form)
}

/// A value the converter cannot represent natively.
///
/// Equality compares rendered text.
#[derive(Clone)]
pub struct OpaqueValue(Arc<dyn fmt::Display + Send + Sync>);

impl OpaqueValue {
    /// Wraps a displayable value.
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }

    /// Renders the value as a string.
    pub fn render(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueValue").field(&self.render()).finish()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl From<i32> for DocumentValue {
    fn from(value: i32) -> Self {
        DocumentValue::Int(value)
    }
}

impl From<i64> for DocumentValue {
    fn from(value: i64) -> Self {
        DocumentValue::Long(value)
    }
}

impl From<f32> for DocumentValue {
    fn from(value: f32) -> Self {
        DocumentValue::Float(value)
    }
}

impl From<f64> for DocumentValue {
    fn from(value: f64) -> Self {
        DocumentValue::Double(value)
    }
}

impl From<bool> for DocumentValue {
    fn from(value: bool) -> Self {
        DocumentValue::Boolean(value)
    }
}

impl From<String> for DocumentValue {
    fn from(value: String) -> Self {
        DocumentValue::String(value)
    }
}

impl From<&str> for DocumentValue {
    fn from(value: &str) -> Self {
        DocumentValue::String(value.to_string())
    }
}

impl From<ObjectId> for DocumentValue {
    fn from(value: ObjectId) -> Self {
        DocumentValue::ObjectId(value)
    }
}

impl From<Document> for DocumentValue {
    fn from(value: Document) -> Self {
        DocumentValue::Mapping(value)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(value: Vec<DocumentValue>) -> Self {
        DocumentValue::Sequence(value)
    }
}

impl From<Bson> for DocumentValue {
    fn from(value: Bson) -> Self {
        match value {
            Bson::Int32(v) => DocumentValue::Int(v),
            Bson::Int64(v) => DocumentValue::Long(v),
            Bson::Double(v) => DocumentValue::Double(v),
            Bson::Boolean(v) => DocumentValue::Boolean(v),
            Bson::String(v) => DocumentValue::String(v),
            Bson::ObjectId(v) => DocumentValue::ObjectId(v),
            Bson::Null | Bson::Undefined => DocumentValue::Null,
            Bson::Document(doc) => DocumentValue::Mapping(document_from_bson(doc)),
            Bson::Array(items) => {
                DocumentValue::Sequence(items.into_iter().map(DocumentValue::from).collect())
            }
            other => DocumentValue::opaque(other),
        }
    }
}

impl From<bson::Document> for DocumentValue {
    fn from(value: bson::Document) -> Self {
        DocumentValue::Mapping(document_from_bson(value))
    }
}

/// Converts a BSON record into a [`Document`], keeping field order.
pub fn document_from_bson(doc: bson::Document) -> Document {
    doc.into_iter()
        .map(|(key, value)| (key, DocumentValue::from(value)))
        .collect()
}

impl From<serde_json::Value> for DocumentValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => DocumentValue::Null,
            Value::Bool(v) => DocumentValue::Boolean(v),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i)
                        .map(DocumentValue::Int)
                        .unwrap_or(DocumentValue::Long(i))
                } else if n.is_u64() {
                    DocumentValue::opaque(n)
                } else {
                    match n.as_f64() {
                        Some(f) => DocumentValue::Double(f),
                        None => DocumentValue::opaque(n),
                    }
                }
            }
            Value::String(s) => DocumentValue::String(s),
            Value::Array(items) => {
                DocumentValue::Sequence(items.into_iter().map(DocumentValue::from).collect())
            }
            Value::Object(map) => {
                if let Some(oid) = extended_json_object_id(&map) {
                    return DocumentValue::ObjectId(oid);
                }
                DocumentValue::Mapping(
                    map.into_iter()
                        .map(|(key, value)| (key, DocumentValue::from(value)))
                        .collect(),
                )
            }
        }
    }
}

/// Converts a JSON object into a [`Document`].
///
/// Returns `None` if `value` is not an object.
pub fn document_from_json(value: serde_json::Value) -> Option<Document> {
    match DocumentValue::from(value) {
        DocumentValue::Mapping(doc) => Some(doc),
        _ => None,
    }
}

/// Recognises `{"$oid": "<24 hex chars>"}`.
fn extended_json_object_id(map: &serde_json::Map<String, serde_json::Value>) -> Option<ObjectId> {
    if map.len() != 1 {
        return None;
    }
    map.get("$oid")
        .and_then(|v| v.as_str())
        .and_then(|hex| ObjectId::parse_str(hex).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_integers_keep_smallest_kind() {
        assert_eq!(DocumentValue::from(json!(7)), DocumentValue::Int(7));
        assert_eq!(
            DocumentValue::from(json!(5_000_000_000i64)),
            DocumentValue::Long(5_000_000_000)
        );
        assert_eq!(DocumentValue::from(json!(1.5)), DocumentValue::Double(1.5));
    }

    #[test]
    fn test_json_u64_beyond_i64_is_opaque() {
        let value = DocumentValue::from(json!(u64::MAX));
        match value {
            DocumentValue::Opaque(o) => assert_eq!(o.render(), u64::MAX.to_string()),
            other => panic!("expected opaque, got {:?}", other),
        }
    }

    #[test]
    fn test_json_extended_object_id() {
        let value = DocumentValue::from(json!({"$oid": "5f43a1b2c3d4e5f601234567"}));
        assert_eq!(value.kind(), "objectId");

        // Not an object id: extra keys or a malformed hex string.
        let value = DocumentValue::from(json!({"$oid": "5f43a1b2c3d4e5f601234567", "x": 1}));
        assert_eq!(value.kind(), "mapping");
        let value = DocumentValue::from(json!({"$oid": "nope"}));
        assert_eq!(value.kind(), "mapping");
    }

    #[test]
    fn test_json_object_to_document() {
        let doc = document_from_json(json!({"b": 1, "a": "x"})).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["b"], DocumentValue::Int(1));
        assert_eq!(doc["a"], DocumentValue::String("x".to_string()));
        assert!(document_from_json(json!([1, 2])).is_none());
    }

    #[test]
    fn test_bson_conversion() {
        let oid = ObjectId::new();
        let doc = bson::doc! {
            "_id": oid,
            "n": 1_i32,
            "big": 2_i64,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "nested": { "ok": true },
            "missing": Bson::Null,
            "when": bson::DateTime::from_millis(0),
        };
        let converted = document_from_bson(doc);

        assert_eq!(converted["_id"], DocumentValue::ObjectId(oid));
        assert_eq!(converted["n"], DocumentValue::Int(1));
        assert_eq!(converted["big"], DocumentValue::Long(2));
        assert_eq!(converted["ratio"], DocumentValue::Double(0.5));
        assert_eq!(converted["tags"].kind(), "sequence");
        assert_eq!(converted["nested"].kind(), "mapping");
        assert!(converted["missing"].is_null());
        assert_eq!(converted["when"].kind(), "opaque");
        let keys: Vec<_> = converted.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["_id", "n", "big", "ratio", "tags", "nested", "missing", "when"]
        );
    }

    #[test]
    fn test_opaque_equality_uses_rendered_text() {
        assert_eq!(OpaqueValue::new(42u64), OpaqueValue::new("42"));
        assert_ne!(OpaqueValue::new(1), OpaqueValue::new(2));
    }

    fn with(entries: Vec<(&str, DocumentValue)>) -> Document {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_identifier_string() {
        let oid = ObjectId::new();
        assert_eq!(
            identifier_string(&with(vec![("_id", DocumentValue::ObjectId(oid))])),
            Some(oid.to_hex())
        );
        assert_eq!(
            identifier_string(&with(vec![("_id", DocumentValue::Double(1.5))])),
            Some("1.5".to_string())
        );
        assert_eq!(
            identifier_string(&with(vec![("_id", DocumentValue::Boolean(true))])),
            Some("true".to_string())
        );
        assert_eq!(
            identifier_string(&with(vec![
                ("_id", DocumentValue::Null),
                ("id", DocumentValue::from("k")),
            ])),
            Some("k".to_string())
        );
        assert_eq!(
            identifier_string(&with(vec![("_id", DocumentValue::Sequence(vec![]))])),
            None
        );
        assert_eq!(identifier_string(&with(vec![("name", DocumentValue::from("x"))])), None);
    }
}
