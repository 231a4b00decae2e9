//! Section outline of a content unit.
//!
//! An outline is an ordered list of [`Section`]s, each of which may nest
//! further sections. Sibling order is the order of insertion, and the
//! structure is a plain tree: sections own their children and nothing
//! points back up.

use std::collections::HashSet;

// ============================================================================
// Public Types
// ============================================================================

/// A named, anchorable section inside a content unit.
///
/// When serialized, sections use the authoring shape
/// `{ "sectionTitle": ..., "id": ..., "content": [...] }`; `title` and
/// `children` are accepted as aliases when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Heading shown in navigation.
    #[cfg_attr(feature = "serde", serde(rename = "sectionTitle", alias = "title"))]
    pub title: String,
    /// In-page anchor fragment. Opaque: never validated or escaped.
    pub id: String,
    /// Nested subsections, in reading order.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "content",
            alias = "children",
            default,
            skip_serializing_if = "Vec::is_empty"
        )
    )]
    pub children: Vec<Section>,
}

impl Section {
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Section) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: Section) {
        self.children.push(child);
    }

    /// True if this section has no subsections.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order walk over this section and its descendants.
    ///
    /// Yields `(depth, section)` with this section at depth 0.
    pub fn walk(&self) -> OutlineIter<'_> {
        OutlineIter {
            stack: vec![(0, self)],
        }
    }

    /// Decode an outline from JSON.
    ///
    /// ```
    /// use folio::Section;
    ///
    /// let outline = Section::outline_from_json(
    ///     r#"[{"sectionTitle": "Intro", "id": "ch1_intro",
    ///          "content": [{"sectionTitle": "Scope", "id": "ch1_scope"}]}]"#,
    /// ).unwrap();
    /// assert_eq!(outline[0].children[0].id, "ch1_scope");
    /// ```
    #[cfg(feature = "serde")]
    pub fn outline_from_json(json: &str) -> crate::Result<Vec<Section>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Depth-first iterator over an outline. See [`iter_outline`].
pub struct OutlineIter<'a> {
    stack: Vec<(usize, &'a Section)>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = (usize, &'a Section);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, section) = self.stack.pop()?;
        // Reverse so the first child is popped first.
        for child in section.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, section))
    }
}

// ============================================================================
// Outline functions
// ============================================================================

/// Walk every section of an outline in reading order.
///
/// Top-level sections are at depth 0.
pub fn iter_outline(sections: &[Section]) -> OutlineIter<'_> {
    OutlineIter {
        stack: sections.iter().rev().map(|s| (0, s)).collect(),
    }
}

/// Find the first section (in reading order) with the given id.
pub fn find_section<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    iter_outline(sections)
        .map(|(_, section)| section)
        .find(|section| section.id == id)
}

/// Total number of sections at every depth.
pub fn count_sections(sections: &[Section]) -> usize {
    iter_outline(sections).count()
}

/// Ids that occur more than once, each reported once, in the order the
/// first repeat is met.
pub fn duplicate_section_ids(sections: &[Section]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for (_, section) in iter_outline(sections) {
        let id = section.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id);
        }
    }

    duplicates
}

// ============================================================================
// Tests
// ============================================================================
