//! Assembling content units into a publication.
//!
//! A [`Publication`] only orders units and derives navigation; writing
//! the actual package is left to whoever consumes it.

use std::collections::HashSet;

use crate::model::{Content, ContentSource};

/// A table of contents entry (hierarchical)
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    pub title: String,
    pub href: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<TocEntry>,
    /// Play order for sorting (1-based, reading order)
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub play_order: Option<usize>,
}

impl Ord for TocEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.play_order.cmp(&other.play_order)
    }
}

impl PartialOrd for TocEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl TocEntry {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            children: Vec::new(),
            play_order: None,
        }
    }

    pub fn with_child(mut self, child: TocEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Number assigned entries in pre-order starting at `next`; returns
    /// the next unused number.
    fn number_from(&mut self, mut next: usize) -> usize {
        self.play_order = Some(next);
        next += 1;
        for child in &mut self.children {
            next = child.number_from(next);
        }
        next
    }
}

/// Content units collected for one output.
///
/// Units are kept in insertion order; [`reading_order`](Self::reading_order)
/// sorts them by position, with insertion order breaking ties.
#[derive(Debug, Clone)]
pub struct Publication<C = Content> {
    contents: Vec<C>,
}

impl<C> Default for Publication<C> {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
        }
    }
}

impl<C: ContentSource> Publication<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content unit.
    ///
    /// Identifiers are not checked for uniqueness beyond a warning, since
    /// the second unit's output file would overwrite the first.
    pub fn add(&mut self, content: C) -> &mut Self {
        if self.get(content.identifier()).is_some() {
            log::warn!(
                "duplicate content identifier {:?} in publication",
                content.identifier()
            );
        }
        self.contents.push(content);
        self
    }

    /// Units in insertion order.
    pub fn contents(&self) -> &[C] {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// First unit with the given identifier.
    pub fn get(&self, identifier: &str) -> Option<&C> {
        self.contents.iter().find(|c| c.identifier() == identifier)
    }

    /// Units sorted by position.
    pub fn reading_order(&self) -> Vec<&C> {
        let mut ordered: Vec<&C> = self.contents.iter().collect();
        ordered.sort_by_key(|c| c.position());
        ordered
    }

    /// Identifiers used by more than one unit.
    pub fn duplicate_identifiers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for content in &self.contents {
            let id = content.identifier();
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }

    /// Whole-publication table of contents in reading order, numbered
    /// depth-first from 1.
    pub fn toc(&self) -> Vec<TocEntry> {
        let mut toc: Vec<TocEntry> = self
            .reading_order()
            .into_iter()
            .map(ContentSource::toc_entry)
            .collect();

        let mut next = 1;
        for entry in &mut toc {
            next = entry.number_from(next);
        }
        toc
    }
}

impl<C: ContentSource> Extend<C> for Publication<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        for content in iter {
            self.add(content);
        }
    }
}

impl<C: ContentSource> FromIterator<C> for Publication<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut publication = Self::new();
        publication.extend(iter);
        publication
    }
}
