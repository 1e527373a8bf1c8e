//! Sport tag parsing and primary-tag resolution.
//!
//! Tags arrive as a single `;`-separated string such as
//! `"cricket;rugby_union"`. Pieces are trimmed and lowercased; nothing else is
//! normalised, so misspelt or unknown sports are kept as ordinary members.
//!
//! # Examples
//! ```
//! use pitchside_core::{PriorityOrder, parse_tags, primary_of};
//!
//! let tags = parse_tags(" cricket ; Rugby_Union ");
//! let priority = PriorityOrder::new(["rugby_union", "cricket"]);
//! assert_eq!(primary_of(&tags, &priority), Some("rugby_union"));
//! ```

use std::collections::BTreeSet;

/// Separator between sports in the raw tag column.
pub const TAG_SEPARATOR: char = ';';

/// A set of normalised, lowercase sport identifiers.
///
/// Iteration order is lexical, which keeps rendering deterministic; downstream
/// logic relies on membership only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse a raw `;`-separated tag string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.split(TAG_SEPARATOR).collect()
    }

    /// Return `true` when `tag` is a member.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate over the members in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when no tag survived parsing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the members joined by `;`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(";")
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().filter_map(normalise_tag).collect())
    }
}

/// Parse a raw tag string into a [`TagSet`].
#[must_use]
pub fn parse_tags(raw: &str) -> TagSet {
    TagSet::parse(raw)
}

/// Ordered list of tags, highest priority first.
///
/// Duplicates keep their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityOrder(Vec<String>);

impl PriorityOrder {
    /// Build a priority order from tags, normalising each one.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter().collect()
    }

    /// Iterate over the tags, highest priority first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Return `true` when the order is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PriorityOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ordered: Vec<String> = Vec::new();
        for tag in iter.into_iter().filter_map(normalise_tag) {
            if !ordered.contains(&tag) {
                ordered.push(tag);
            }
        }
        Self(ordered)
    }
}

/// Return the highest-priority tag present in `tags`.
///
/// `None` tells the caller to fall back to its default display treatment.
#[must_use]
pub fn primary_of<'a>(tags: &TagSet, priority: &'a PriorityOrder) -> Option<&'a str> {
    priority.iter().find(|candidate| tags.contains(candidate))
}

/// Trim and lowercase a tag, discarding empty pieces.
pub(crate) fn normalise_tag(raw: impl AsRef<str>) -> Option<String> {
    let trimmed = raw.as_ref().trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
