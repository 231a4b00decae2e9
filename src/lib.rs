//! # folio
//!
//! In-memory model of the content units that make up an ebook.
//!
//! ## Features
//!
//! - Content units with HTML body, title, ordering position, and identifier
//! - Recursive section outlines with stable in-page anchors
//! - Resource path normalization for images and stylesheets
//! - Pluggable HTML extraction through the [`HtmlExtractor`] trait
//! - Publication-wide reading order and table of contents
//!
//! ## Quick Start
//!
//! ```
//! use folio::{ContentBuilder, Publication, Section};
//!
//! let chapter = ContentBuilder::new()
//!     .identifier("doc42")
//!     .title("Chapter 1")
//!     .position(1)
//!     .body("<h1>Chapter 1</h1><h2 id=\"ch1_intro\">Intro</h2>")
//!     .sections(vec![Section::new("Intro", "ch1_intro")])
//!     .static_resource_path("images")
//!     .build();
//!
//! assert_eq!(chapter.anchor_path(None), "doc42.html");
//! assert_eq!(chapter.anchor_path(Some("ch1_intro")), "doc42.html#ch1_intro");
//! assert_eq!(chapter.resource_href("/cover.png"), "images/cover.png");
//!
//! let mut book = Publication::new();
//! book.add(chapter);
//! assert_eq!(book.toc()[0].children[0].href, "doc42.html#ch1_intro");
//! ```

pub mod book;
pub mod error;
pub mod extract;
pub mod model;
pub mod util;

pub use book::{Publication, TocEntry};
pub use error::{Error, Result};
pub use extract::{Extraction, HtmlExtractor};
pub use model::{Content, ContentBuilder, ContentSource, Position, Section, anchor_path};
