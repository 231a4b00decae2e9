//! Content units: one chapter-sized piece of an ebook.
//!
//! A [`ContentBuilder`] is filled in through chained setters and then
//! finalized into an immutable [`Content`]. Renderers should be written
//! against [`ContentSource`] so they do not care how content is stored.

use std::fmt;

use super::section::{self, Section};
use crate::book::TocEntry;
use crate::error::Result;
use crate::extract::HtmlExtractor;
use crate::util::{add_trailing_slash, strip_leading_slash, time_now_secs, time_seeded_range};

/// Ordering key of a content unit among its siblings.
pub type Position = i64;

// ============================================================================
// Derived values
// ============================================================================

/// Build the link to a content unit, optionally pointing at a fragment.
///
/// An empty fragment is treated exactly like a missing one.
///
/// ```
/// use folio::anchor_path;
///
/// assert_eq!(anchor_path("doc42", None), "doc42.html");
/// assert_eq!(anchor_path("doc42", Some("")), "doc42.html");
/// assert_eq!(anchor_path("doc42", Some("ch1_intro")), "doc42.html#ch1_intro");
/// ```
pub fn anchor_path(identifier: &str, fragment: Option<&str>) -> String {
    match fragment {
        Some(id) if !id.is_empty() => format!("{identifier}.html#{id}"),
        _ => format!("{identifier}.html"),
    }
}

/// Generate a default identifier for a content unit.
///
/// Half the current Unix time (rounded) followed by a five-digit
/// pseudo-random number, e.g. `"88123456742137"`. Units created in the
/// same second can collide; callers who need a guarantee set their own.
pub fn generate_identifier() -> String {
    let half_secs = time_now_secs().div_ceil(2);
    format!("{half_secs}{}", time_seeded_range(11111, 99999))
}

// ============================================================================
// ContentSource
// ============================================================================

/// Read-only view of a content unit, as consumed by renderers.
pub trait ContentSource {
    /// Raw HTML body.
    fn body(&self) -> &str;
    fn title(&self) -> &str;
    fn position(&self) -> Position;
    /// Base name for this unit's output file and anchors.
    fn identifier(&self) -> &str;
    /// Section outline; empty for flat content.
    fn sections(&self) -> &[Section];
    /// Base path for linked resources, always ending in `/` when present.
    fn static_resource_path(&self) -> Option<&str>;

    /// Link to this unit, or to a section inside it.
    fn anchor_path(&self, fragment: Option<&str>) -> String {
        anchor_path(self.identifier(), fragment)
    }

    /// Resolve a resource reference found in the body against the static
    /// resource path. A leading `/` on `path` is dropped first.
    fn resource_href(&self, path: &str) -> String {
        let relative = strip_leading_slash(path);
        match self.static_resource_path() {
            Some(base) => format!("{base}{relative}"),
            None => relative.to_string(),
        }
    }

    /// Navigation entry for this unit, with one child per section.
    fn toc_entry(&self) -> TocEntry {
        self.sections().iter().fold(
            TocEntry::new(self.title(), self.anchor_path(None)),
            |entry, s| entry.with_child(section_toc_entry(self, s)),
        )
    }
}

fn section_toc_entry<C: ContentSource + ?Sized>(content: &C, section: &Section) -> TocEntry {
    let href = content.anchor_path(Some(section.id.as_str()));
    section
        .children
        .iter()
        .fold(TocEntry::new(&section.title, href), |entry, child| {
            entry.with_child(section_toc_entry(content, child))
        })
}

// ============================================================================
// Content
// ============================================================================

/// A finished content unit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Content {
    identifier: String,
    title: String,
    position: Position,
    body: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "deserialize_resource_path",
            skip_serializing_if = "Option::is_none"
        )
    )]
    static_resource_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    sections: Vec<Section>,
}

/// Decoded paths get the same trailing `/` normalization as the builder.
#[cfg(feature = "serde")]
fn deserialize_resource_path<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let path: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(path.map(|p| add_trailing_slash(&p)))
}

impl Content {
    /// Start building a content unit with a generated identifier.
    pub fn builder() -> ContentBuilder {
        ContentBuilder::new()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn static_resource_path(&self) -> Option<&str> {
        self.static_resource_path.as_deref()
    }

    /// See [`anchor_path`].
    pub fn anchor_path(&self, fragment: Option<&str>) -> String {
        anchor_path(&self.identifier, fragment)
    }

    pub fn resource_href(&self, path: &str) -> String {
        ContentSource::resource_href(self, path)
    }

    pub fn toc_entry(&self) -> TocEntry {
        ContentSource::toc_entry(self)
    }

    pub fn find_section(&self, id: &str) -> Option<&Section> {
        section::find_section(&self.sections, id)
    }

    /// Number of sections at every depth.
    pub fn section_count(&self) -> usize {
        section::count_sections(&self.sections)
    }

    /// Reopen this unit for editing. The extractor slot starts empty.
    pub fn into_builder(self) -> ContentBuilder {
        ContentBuilder {
            content: self,
            extractor: None,
        }
    }
}

impl ContentSource for Content {
    fn body(&self) -> &str {
        Content::body(self)
    }

    fn title(&self) -> &str {
        Content::title(self)
    }

    fn position(&self) -> Position {
        Content::position(self)
    }

    fn identifier(&self) -> &str {
        Content::identifier(self)
    }

    fn sections(&self) -> &[Section] {
        Content::sections(self)
    }

    fn static_resource_path(&self) -> Option<&str> {
        Content::static_resource_path(self)
    }
}

// ============================================================================
// ContentBuilder
// ============================================================================

/// Mutable staging area for a [`Content`].
///
/// Every setter replaces the previous value and returns the builder, so
/// calls can be chained:
///
/// ```
/// use folio::{ContentBuilder, Section};
///
/// let mut builder = ContentBuilder::new();
/// builder
///     .set_title("Chapter 1")
///     .set_position(1)
///     .set_sections(vec![Section::new("Intro", "ch1_intro")])
///     .set_identifier("doc42");
/// let content = builder.build();
///
/// assert_eq!(content.anchor_path(None), "doc42.html");
/// assert_eq!(content.anchor_path(Some("ch1_intro")), "doc42.html#ch1_intro");
/// ```
pub struct ContentBuilder {
    content: Content,
    extractor: Option<Box<dyn HtmlExtractor>>,
}

impl Default for ContentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBuilder")
            .field("content", &self.content)
            .field("has_extractor", &self.extractor.is_some())
            .finish()
    }
}

impl ContentBuilder {
    /// New builder with a generated identifier and no extractor.
    pub fn new() -> Self {
        let identifier = generate_identifier();
        log::trace!("generated content identifier {identifier}");
        Self {
            content: Content {
                identifier,
                title: String::new(),
                position: 0,
                body: String::new(),
                static_resource_path: None,
                sections: Vec::new(),
            },
            extractor: None,
        }
    }

    /// New builder that uses `extractor` for [`extract_html`](Self::extract_html).
    pub fn with_extractor(extractor: impl HtmlExtractor + 'static) -> Self {
        let mut builder = Self::new();
        builder.extractor = Some(Box::new(extractor));
        builder
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.content.body = body.into();
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.content.title = title.into();
        self
    }

    pub fn set_position(&mut self, position: Position) -> &mut Self {
        self.content.position = position;
        self
    }

    pub fn set_sections(&mut self, sections: Vec<Section>) -> &mut Self {
        self.content.sections = sections;
        self
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.content.identifier = identifier.into();
        self
    }

    /// Store the base path for linked resources so that it ends in
    /// exactly one `/`. A leading `/` is kept.
    pub fn set_static_resource_path(&mut self, path: impl AsRef<str>) -> &mut Self {
        self.content.static_resource_path = Some(add_trailing_slash(path.as_ref()));
        self
    }

    /// Swap the extractor. `None` removes it.
    pub fn set_extractor(&mut self, extractor: Option<Box<dyn HtmlExtractor>>) -> &mut Self {
        self.extractor = extractor;
        self
    }

    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    /// Populate body (and possibly sections) from raw markup.
    ///
    /// With an extractor configured its output replaces the body, and
    /// the outline too when it reports one. Without an extractor the
    /// markup becomes the body verbatim.
    pub fn extract_html(&mut self, markup: &str) -> Result<&mut Self> {
        let Some(extractor) = self.extractor.as_ref() else {
            self.content.body = markup.to_string();
            return Ok(self);
        };

        log::trace!(
            "extracting {} bytes of markup for {}",
            markup.len(),
            self.content.identifier
        );
        let extraction = extractor.extract(markup)?;
        self.content.body = extraction.body;
        if let Some(sections) = extraction.sections {
            self.content.sections = sections;
        }
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.set_body(body);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.set_position(position);
        self
    }

    pub fn sections(mut self, sections: Vec<Section>) -> Self {
        self.set_sections(sections);
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.set_identifier(identifier);
        self
    }

    pub fn static_resource_path(mut self, path: impl AsRef<str>) -> Self {
        self.set_static_resource_path(path);
        self
    }

    /// The unit as it currently stands.
    pub fn peek(&self) -> &Content {
        &self.content
    }

    /// Finalize into an immutable [`Content`]. Never fails.
    pub fn build(self) -> Content {
        let content = self.content;
        for id in section::duplicate_section_ids(&content.sections) {
            log::warn!(
                "content {} repeats section id {id:?}; anchors to it are ambiguous",
                content.identifier
            );
        }
        log::debug!(
            "built content {} ({:?}, {} sections)",
            content.identifier,
            content.title,
            content.section_count()
        );
        content
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extraction;
    use crate::Error;
    use proptest::prelude::*;

    #[test]
    fn test_example_scenario() {
        let mut builder = ContentBuilder::new();
        builder
            .set_title("Chapter 1")
            .set_position(1)
            .set_sections(vec![Section::new("Intro", "ch1_intro")])
            .set_identifier("doc42");
        let content = builder.build();

        assert_eq!(content.title(), "Chapter 1");
        assert_eq!(content.position(), 1);
        assert_eq!(content.anchor_path(None), "doc42.html");
        assert_eq!(content.anchor_path(Some("ch1_intro")), "doc42.html#ch1_intro");
    }

    #[test]
    fn test_empty_fragment_is_absent() {
        let content = ContentBuilder::new().identifier("x").build();
        assert_eq!(content.anchor_path(Some("")), content.anchor_path(None));
    }

    #[test]
    fn test_static_resource_path_normalized() {
        let mut builder = ContentBuilder::new();
        builder.set_static_resource_path("images");
        assert_eq!(builder.peek().static_resource_path(), Some("images/"));
        builder.set_static_resource_path("images/");
        assert_eq!(builder.peek().static_resource_path(), Some("images/"));
        builder.set_static_resource_path("/assets");
        assert_eq!(builder.peek().static_resource_path(), Some("/assets/"));
        builder.set_static_resource_path("images//");
        assert_eq!(builder.peek().static_resource_path(), Some("images/"));
        builder.set_static_resource_path("/");
        assert_eq!(builder.peek().static_resource_path(), Some("/"));
    }

    #[test]
    fn test_defaults_are_blank() {
        let content = ContentBuilder::new().build();
        assert_eq!(content.body(), "");
        assert_eq!(content.title(), "");
        assert_eq!(content.position(), 0);
        assert!(content.sections().is_empty());
        assert!(content.static_resource_path().is_none());
        assert!(!content.identifier().is_empty());
    }

    #[test]
    fn test_setters_replace() {
        let content = ContentBuilder::new()
            .title("First")
            .title("Second")
            .sections(vec![Section::new("A", "a"), Section::new("B", "b")])
            .sections(vec![Section::new("C", "c")])
            .build();
        assert_eq!(content.title(), "Second");
        assert_eq!(content.sections().len(), 1);
        assert_eq!(content.sections()[0].id, "c");
    }

    #[test]
    fn test_body_stored_verbatim() {
        let raw = "<p>Tom &amp; Jerry <b>unclosed";
        let content = ContentBuilder::new().body(raw).build();
        assert_eq!(content.body(), raw);
    }

    #[test]
    fn test_generated_identifier_format() {
        let id = generate_identifier();
        assert!(id.len() > 5);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        let suffix: u32 = id[id.len() - 5..].parse().unwrap();
        assert!((11111..=99999).contains(&suffix));
    }

    #[test]
    fn test_resource_href() {
        let with_base = ContentBuilder::new().static_resource_path("static").build();
        assert_eq!(with_base.resource_href("/img/a.png"), "static/img/a.png");
        assert_eq!(with_base.resource_href("img/a.png"), "static/img/a.png");

        let without = ContentBuilder::new().build();
        assert_eq!(without.resource_href("/img/a.png"), "img/a.png");
    }

    #[test]
    fn test_toc_entry_mirrors_outline() {
        let content = ContentBuilder::new()
            .identifier("ch1")
            .title("Chapter 1")
            .sections(vec![
                Section::new("Intro", "intro").with_child(Section::new("Scope", "scope")),
                Section::new("Outro", "outro"),
            ])
            .build();

        let toc = content.toc_entry();
        assert_eq!(toc.title, "Chapter 1");
        assert_eq!(toc.href, "ch1.html");
        assert_eq!(toc.children[0].href, "ch1.html#intro");
        assert_eq!(toc.children[0].children[0].href, "ch1.html#scope");
        assert_eq!(toc.children[0].children[0].title, "Scope");
        let hrefs: Vec<&str> = toc.children.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(hrefs, vec!["ch1.html#intro", "ch1.html#outro"]);
    }

    #[test]
    fn test_extract_without_extractor_keeps_markup() {
        let mut builder = ContentBuilder::new();
        assert!(!builder.has_extractor());
        builder.extract_html("<h1>Raw</h1>").unwrap();
        assert_eq!(builder.peek().body(), "<h1>Raw</h1>");
    }

    #[test]
    fn test_extract_with_extractor() {
        let mut builder = ContentBuilder::with_extractor(|markup: &str| -> Result<Extraction> {
            Ok(Extraction::new(markup.to_uppercase())
                .with_sections(vec![Section::new("Found", "found")]))
        });
        builder
            .set_sections(vec![Section::new("Old", "old")])
            .extract_html("<p>x</p>")
            .unwrap()
            .set_title("After");

        let content = builder.build();
        assert_eq!(content.body(), "<P>X</P>");
        assert_eq!(content.sections()[0].id, "found");
        assert_eq!(content.title(), "After");
    }

    #[test]
    fn test_extract_keeps_outline_when_none_reported() {
        let mut builder =
            ContentBuilder::with_extractor(|m: &str| -> Result<Extraction> { Ok(Extraction::new(m)) });
        builder.set_sections(vec![Section::new("Kept", "kept")]);
        builder.extract_html("<p>y</p>").unwrap();
        assert_eq!(builder.peek().sections()[0].id, "kept");
    }

    #[test]
    fn test_extractor_failure_leaves_builder_untouched() {
        let mut builder = ContentBuilder::with_extractor(|_: &str| -> Result<Extraction> {
            Err(Error::Extraction("broken".into()))
        });
        builder.set_body("before");
        let err = builder.extract_html("<p>z</p>").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert_eq!(builder.peek().body(), "before");
    }

    #[test]
    fn test_set_extractor_swaps_and_clears() {
        let mut builder = ContentBuilder::new();
        builder.set_extractor(Some(Box::new(|_: &str| -> Result<Extraction> {
            Ok(Extraction::new("swapped"))
        })));
        builder.extract_html("ignored").unwrap();
        assert_eq!(builder.peek().body(), "swapped");

        builder.set_extractor(None);
        builder.extract_html("verbatim").unwrap();
        assert_eq!(builder.peek().body(), "verbatim");
    }

    #[test]
    fn test_into_builder_round_trip() {
        let content = ContentBuilder::new().identifier("keep").title("Old").build();
        let content = content.into_builder().title("New").build();
        assert_eq!(content.identifier(), "keep");
        assert_eq!(content.title(), "New");
    }

    proptest! {
        #[test]
        fn prop_anchor_path_without_fragment(identifier in "[A-Za-z0-9_-]{1,24}") {
            let content = ContentBuilder::new().identifier(identifier.clone()).build();
            prop_assert_eq!(content.anchor_path(None), format!("{}.html", identifier));
        }

        #[test]
        fn prop_anchor_path_with_fragment(
            identifier in "[A-Za-z0-9_-]{1,24}",
            fragment in "[^\\s]{1,24}"
        ) {
            let content = ContentBuilder::new().identifier(identifier.clone()).build();
            prop_assert_eq!(
                content.anchor_path(Some(fragment.as_str())),
                format!("{}.html#{}", identifier, fragment)
            );
        }

        #[test]
        fn prop_setter_order_does_not_matter(
            title in ".{0,16}",
            position in any::<i64>(),
            body in ".{0,32}"
        ) {
            let mut a = ContentBuilder::new();
            a.set_identifier("same").set_title(title.clone()).set_position(position).set_body(body.clone());
            let mut b = ContentBuilder::new();
            b.set_body(body.clone()).set_identifier("same").set_position(position).set_title(title.clone());

            let (a, b) = (a.build(), b.build());
            prop_assert_eq!(a.title(), title.as_str());
            prop_assert_eq!(a.position(), position);
            prop_assert_eq!(a.body(), body.as_str());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_static_resource_path_single_trailing_slash(
            path in "/{0,2}[A-Za-z0-9_.-]{0,8}(/[A-Za-z0-9_.-]{1,8}){0,3}/{0,4}"
        ) {
            let mut builder = ContentBuilder::new();
            builder.set_static_resource_path(&path);
            let first = builder.peek().static_resource_path().map(str::to_string);
            let stored = first.clone().unwrap();
            prop_assert!(stored.ends_with('/'));
            prop_assert!(!stored.ends_with("//"));
            prop_assert_eq!(stored.trim_end_matches('/'), path.trim_end_matches('/'));

            builder.set_static_resource_path(&stored);
            prop_assert_eq!(builder.peek().static_resource_path().map(str::to_string), first.clone());
            builder.set_static_resource_path(format!("{}//", path));
            prop_assert_eq!(builder.peek().static_resource_path().map(str::to_string), first);
        }
    }
}
