//! # resthal-hal - HAL+JSON document generator
//!
//! Turns schema-less records read from a document store into
//! [HAL](https://datatracker.ietf.org/doc/html/draft-kelly-json-hal) documents.
//!
//! ## Components
//!
//! - [`model`] - The input shape: [`DocumentValue`] and [`Document`]
//! - [`converter`] - Recursive value conversion with a depth bound
//! - [`reference`] - Base URL normalization and child reference resolution
//! - [`links`] - The `_links` fragment
//! - [`assembler`] - Single document and collection assembly
//!
//! ## Example
//!
//! ```rust
//! use resthal_hal::{Document, DocumentValue, HalAssembler, LinkSet};
//!
//! let mut item = Document::new();
//! item.insert("_id".to_string(), DocumentValue::from("x"));
//! item.insert("n".to_string(), DocumentValue::Int(1));
//!
//! let links = LinkSet::new().with_uri("self", "http://localhost/db/coll").unwrap();
//! let hal = HalAssembler::default()
//!     .build_collection("http://localhost/db/coll", &Document::new(), &links, &[item])
//!     .unwrap();
//!
//! assert_eq!(
//!     hal.to_json()["_embedded"]["rh:collection"][0]["_links"]["self"]["href"],
//!     "http://localhost/db/coll/x"
//! );
//! ```
//!
//! ## Value kinds
//!
//! | Document kind | JSON |
//! |---------------|------|
//! | `Int`, `Long` | integer |
//! | `Float`, `Double` | number, single or double precision formatting |
//! | `Boolean` | boolean |
//! | `String` | string |
//! | `ObjectId` | 24 character hex string |
//! | `Null` | null |
//! | `Mapping` | object, field order kept |
//! | `Sequence` | array |
//! | `Opaque` | string form, plus one warning |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod assembler;
pub mod converter;
pub mod error;
pub mod links;
pub mod model;
pub mod reference;
pub mod value;

pub use assembler::{COLLECTION_RELATION, EMBEDDED_KEY, HalAssembler, HalDocument, LINKS_KEY};
pub use converter::{
    Conversion, DEFAULT_MAX_DEPTH, UnsupportedValueWarning, ValueConverter,
};
pub use error::{HalError, HalResult};
pub use links::{LinkSet, SELF_RELATION, build_links};
pub use model::{
    Document, DocumentValue, IDENTIFIER_KEYS, OpaqueValue, document_from_bson, document_from_json,
    identifier_string, identifier_value,
};
pub use reference::{Reference, normalize, resolve};
pub use value::{HalObject, HalValue};

/// Media type of HAL documents.
pub const HAL_JSON_MEDIA_TYPE: &str = "application/hal+json";

/// Media type for the same shape served as plain JSON.
pub const JSON_MEDIA_TYPE: &str = "application/json";
