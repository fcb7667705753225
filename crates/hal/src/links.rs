//! The `_links` fragment.

use indexmap::IndexMap;

use crate::error::HalResult;
use crate::reference::Reference;
use crate::value::{HalObject, HalValue};

/// Relation name of a resource's own link.
pub const SELF_RELATION: &str = "self";

/// An ordered set of relation name to URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: IndexMap<String, Reference>,
}

impl LinkSet {
    /// Creates an empty link set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a link set holding only a `self` link.
    pub fn self_link(reference: Reference) -> Self {
        Self::new().with(SELF_RELATION, reference)
    }

    /// Inserts a relation, replacing any previous link with the same name.
    pub fn insert(&mut self, relation: impl Into<String>, reference: Reference) {
        self.links.insert(relation.into(), reference);
    }

    /// Builder form of [`LinkSet::insert`].
    pub fn with(mut self, relation: impl Into<String>, reference: Reference) -> Self {
        self.insert(relation, reference);
        self
    }

    /// Validates `uri` and inserts it under `relation`.
    pub fn with_uri(self, relation: impl Into<String>, uri: impl Into<String>) -> HalResult<Self> {
        Ok(self.with(relation, Reference::parse(uri)?))
    }

    /// Returns the link for a relation.
    pub fn get(&self, relation: &str) -> Option<&Reference> {
        self.links.get(relation)
    }

    /// Number of relations.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns true if there are no relations.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates relations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Reference)> {
        self.links.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Reference)> for LinkSet {
    fn from_iter<I: IntoIterator<Item = (String, Reference)>>(iter: I) -> Self {
        Self {
            links: iter.into_iter().collect(),
        }
    }
}

/// Builds the `_links` fragment: `{ relation: { "href": uri } }`.
///
/// Returns `None` for an empty set so callers can omit the key.
pub fn build_links(links: &LinkSet) -> Option<HalValue> {
    if links.is_empty() {
        return None;
    }

    let fragment: HalObject = links
        .iter()
        .map(|(relation, reference)| (relation.to_string(), href(reference)))
        .collect();

    Some(HalValue::Object(fragment))
}

fn href(reference: &Reference) -> HalValue {
    let mut link = HalObject::with_capacity(1);
    link.insert("href".to_string(), HalValue::from(reference.as_str()));
    HalValue::Object(link)
}
