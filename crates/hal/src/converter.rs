//! Recursive conversion from [`DocumentValue`] to [`HalValue`].
//!
//! The converter is a plain value type: it holds nothing but its depth
//! bound, so one instance can be shared freely across threads. Each call
//! allocates its own warning list.

use tracing::warn;

use crate::error::{HalError, HalResult};
use crate::model::{Document, DocumentValue, OpaqueValue};
use crate::value::{HalObject, HalValue};

/// Default maximum nesting depth of mappings and sequences.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A value that was converted through its textual form.
///
/// Raised once per occurrence; conversion continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedValueWarning {
    /// Field name when the value sat in a mapping, `None` inside a sequence.
    pub key: Option<String>,
    /// The text the value was rendered as.
    pub rendered: String,
}

/// The result of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    /// The converted value.
    pub value: T,
    /// Values that were degraded to strings along the way.
    pub warnings: Vec<UnsupportedValueWarning>,
}

/// Converts document values into hypermedia values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueConverter {
    max_depth: usize,
}

impl Default for ValueConverter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl ValueConverter {
    /// Creates a converter that rejects values nested deeper than `max_depth`
    /// container levels.
    ///
    /// The value handed to [`convert`](Self::convert) or
    /// [`convert_document`](Self::convert_document) is at depth 0; each
    /// mapping or sequence inside a container is one level deeper.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Converts a single value.
    pub fn convert(&self, value: &DocumentValue) -> HalResult<Conversion<HalValue>> {
        let mut walk = Walk::new(self.max_depth);
        let value = walk.value(None, value, 0)?;
        Ok(walk.finish(value))
    }

    /// Converts a properties mapping into an ordered object.
    pub fn convert_document(&self, document: &Document) -> HalResult<Conversion<HalObject>> {
        let mut walk = Walk::new(self.max_depth);
        let object = walk.mapping(document, 0)?;
        Ok(walk.finish(object))
    }
}

/// Per-call conversion state.
struct Walk {
    max_depth: usize,
    warnings: Vec<UnsupportedValueWarning>,
}

impl Walk {
    fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            warnings: Vec::new(),
        }
    }

    fn finish<T>(self, value: T) -> Conversion<T> {
        Conversion {
            value,
            warnings: self.warnings,
        }
    }

    fn value(&mut self, key: Option<&str>, value: &DocumentValue, depth: usize) -> HalResult<HalValue> {
        let converted = match value {
            DocumentValue::Int(i) => HalValue::Int(*i),
            DocumentValue::Long(l) => HalValue::Long(*l),
            DocumentValue::Float(f) => HalValue::Float(*f),
            DocumentValue::Double(d) => HalValue::Double(*d),
            DocumentValue::Boolean(b) => HalValue::Bool(*b),
            DocumentValue::String(s) => HalValue::String(s.clone()),
            DocumentValue::ObjectId(oid) => HalValue::String(oid.to_hex()),
            DocumentValue::Null => HalValue::Null,
            DocumentValue::Mapping(doc) => HalValue::Object(self.mapping(doc, depth)?),
            DocumentValue::Sequence(items) => HalValue::Array(self.sequence(items, depth)?),
            DocumentValue::Opaque(opaque) => self.degrade(key, opaque),
        };
        Ok(converted)
    }

    fn mapping(&mut self, doc: &Document, depth: usize) -> HalResult<HalObject> {
        self.check_depth(depth)?;
        let mut object = HalObject::with_capacity(doc.len());
        for (key, value) in doc {
            let converted = self.value(Some(key.as_str()), value, depth + 1)?;
            object.insert(key.clone(), converted);
        }
        Ok(object)
    }

    fn sequence(&mut self, items: &[DocumentValue], depth: usize) -> HalResult<Vec<HalValue>> {
        self.check_depth(depth)?;
        items
            .iter()
            .map(|item| self.value(None, item, depth + 1))
            .collect()
    }

    fn check_depth(&self, depth: usize) -> HalResult<()> {
        if depth > self.max_depth {
            return Err(HalError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn degrade(&mut self, key: Option<&str>, opaque: &OpaqueValue) -> HalValue {
        let rendered = opaque.render();
        match key {
            Some(key) => warn!(
                field = %key,
                value = %rendered,
                "Converted field of unknown type using its string form"
            ),
            None => warn!(
                value = %rendered,
                "Converted array element of unknown type using its string form"
            ),
        }
        self.warnings.push(UnsupportedValueWarning {
            key: key.map(String::from),
            rendered: rendered.clone(),
        });
        HalValue::String(rendered)
    }
}
