//! Single document and collection assembly.
//!
//! # Layout
//!
//! A single document is its converted properties followed by `_links`:
//!
//! ```json
//! { "a": 1, "_links": { "self": { "href": "http://h/db/coll/x" } } }
//! ```
//!
//! A collection adds `_embedded` after `_links`, holding every item under
//! `rh:collection` with its own `self` link:
//!
//! ```json
//! {
//!   "_links": { "self": { "href": "http://h/db/coll" } },
//!   "_embedded": {
//!     "rh:collection": [
//!       { "_id": "x", "n": 1, "_links": { "self": { "href": "http://h/db/coll/x" } } }
//!     ]
//!   }
//! }
//! ```
//!
//! When a `_links` or `_embedded` fragment is emitted, it replaces any
//! property of the same name and goes last. Otherwise a property with that
//! name is kept in place.

use serde::ser::{Serialize, Serializer};
use tracing::debug;

use crate::converter::{UnsupportedValueWarning, ValueConverter};
use crate::error::{HalError, HalResult};
use crate::links::{LinkSet, build_links};
use crate::model::{Document, identifier_value};
use crate::reference::{normalize, resolve};
use crate::value::{HalObject, HalValue};

/// Reserved key for the links fragment.
pub const LINKS_KEY: &str = "_links";
/// Reserved key for the embedded fragment.
pub const EMBEDDED_KEY: &str = "_embedded";
/// Relation under which collection items are embedded.
pub const COLLECTION_RELATION: &str = "rh:collection";

/// An assembled HAL document.
///
/// Serializes as its top-level object; the warnings are not part of the
/// wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct HalDocument {
    root: HalObject,
    warnings: Vec<UnsupportedValueWarning>,
}

impl HalDocument {
    /// The top-level object.
    pub fn as_object(&self) -> &HalObject {
        &self.root
    }

    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&HalValue> {
        self.root.get(key)
    }

    /// The `_links` fragment, if any.
    pub fn links(&self) -> Option<&HalValue> {
        self.root.get(LINKS_KEY)
    }

    /// The embedded collection items, if any.
    pub fn embedded_items(&self) -> Option<&[HalValue]> {
        self.root
            .get(EMBEDDED_KEY)
            .and_then(|embedded| embedded.get(COLLECTION_RELATION))
            .and_then(HalValue::as_array)
    }

    /// Values degraded to strings while building this document.
    pub fn warnings(&self) -> &[UnsupportedValueWarning] {
        &self.warnings
    }

    /// Converts into a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        HalValue::Object(self.root.clone()).to_json()
    }

    /// Consumes the document, returning the top-level object.
    pub fn into_object(self) -> HalObject {
        self.root
    }
}

impl Serialize for HalDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

/// Builds HAL documents from stored records.
///
/// Holds only its converter; cheap to copy and safe to share.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalAssembler {
    converter: ValueConverter,
}

impl HalAssembler {
    /// Creates an assembler using `converter` for all values.
    pub fn new(converter: ValueConverter) -> Self {
        Self { converter }
    }

    /// Creates an assembler whose converter rejects nesting beyond `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(ValueConverter::new(max_depth))
    }

    /// Returns the converter.
    pub fn converter(&self) -> &ValueConverter {
        &self.converter
    }

    /// Builds a single document representation.
    ///
    /// Properties come first, in their original order, then `_links` when
    /// `links` is non-empty.
    pub fn build_document(
        &self,
        base_url: &str,
        properties: &Document,
        links: &LinkSet,
    ) -> HalResult<HalDocument> {
        debug!(
            base_url = %base_url,
            properties = properties.len(),
            links = links.len(),
            "Building HAL document"
        );

        let conversion = self.converter.convert_document(properties)?;
        let mut root = conversion.value;
        append_reserved(&mut root, LINKS_KEY, build_links(links));

        Ok(HalDocument {
            root,
            warnings: conversion.warnings,
        })
    }

    /// Builds a collection representation.
    ///
    /// Each item in `embedded_items` gets a `self` link resolved against
    /// `base_url` from its identifier (`_id` first, then `id`). Any failing
    /// item fails the whole call.
    pub fn build_collection(
        &self,
        base_url: &str,
        properties: &Document,
        links: &LinkSet,
        embedded_items: &[Document],
    ) -> HalResult<HalDocument> {
        let mut document = self.build_document(base_url, properties, links)?;

        if embedded_items.is_empty() {
            return Ok(document);
        }

        if normalize(base_url).is_empty() {
            return Err(HalError::invalid_reference(
                base_url,
                "base URL is empty; cannot build embedded self links",
            ));
        }

        let mut items = Vec::with_capacity(embedded_items.len());
        for (index, item) in embedded_items.iter().enumerate() {
            let id = identifier(item, index)?;
            let conversion = self.converter.convert_document(item)?;
            let mut object = conversion.value;
            document.warnings.extend(conversion.warnings);

            let self_link = resolve(base_url, &id)?;
            append_reserved(
                &mut object,
                LINKS_KEY,
                build_links(&LinkSet::self_link(self_link)),
            );

            items.push(HalValue::Object(object));
        }

        debug!(
            base_url = %base_url,
            items = items.len(),
            "Embedded collection items"
        );

        let mut embedded = HalObject::with_capacity(1);
        embedded.insert(COLLECTION_RELATION.to_string(), HalValue::Array(items));
        append_reserved(&mut document.root, EMBEDDED_KEY, Some(HalValue::Object(embedded)));

        Ok(document)
    }
}

/// Moves `key` to the end of `object` with the new value. `None` leaves `object` as is.
fn append_reserved(object: &mut HalObject, key: &str, value: Option<HalValue>) {
    if let Some(value) = value {
        object.shift_remove(key);
        object.insert(key.to_string(), value);
    }
}

/// Extracts the string form of an item's identifier.
fn identifier(item: &Document, index: usize) -> HalResult<String> {
    let value = identifier_value(item).ok_or(HalError::MissingIdentifier { index })?;
    value
        .identifier_form()
        .ok_or_else(|| HalError::invalid_reference(value.kind(), "identifier has no string form"))
}
