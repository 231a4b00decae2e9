//! Pluggable HTML extraction.
//!
//! folio never parses HTML itself. A content builder can hold an
//! [`HtmlExtractor`] that turns raw markup into a body and, optionally,
//! a section outline. Any `Fn(&str) -> Result<Extraction>` closure is an
//! extractor, which keeps small adapters cheap to write.

use crate::error::Result;
use crate::model::Section;

/// What an extractor pulled out of a chunk of markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Body markup to store on the content unit.
    pub body: String,
    /// Outline found in the markup. `None` leaves the existing outline alone.
    pub sections: Option<Vec<Section>>,
}

impl Extraction {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            sections: None,
        }
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = Some(sections);
        self
    }
}

/// Derives body and section data from raw markup.
pub trait HtmlExtractor {
    fn extract(&self, markup: &str) -> Result<Extraction>;
}

impl<F> HtmlExtractor for F
where
    F: Fn(&str) -> Result<Extraction>,
{
    fn extract(&self, markup: &str) -> Result<Extraction> {
        self(markup)
    }
}
