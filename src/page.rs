//! Page buffer and committed page documents.
//!
//! Fragments are "frozen" placements: once pushed they are never moved. A
//! commit turns the buffer into an immutable [`PageDocument`].

use serde::{Deserialize, Serialize};

use crate::fonts::FontWeight;
use crate::svg::PageTemplate;

/// One placed glyph or image, in page coordinates (origin top-left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Text(TextFragment),
    Image(ImageFragment),
}

/// A glyph on the text baseline at (`x`, `y`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub x: f32,
    pub y: f32,
    /// Emitted glyph after substitution (may be an entity reference).
    pub glyph: String,
    /// Weight override, `None` for the page default.
    pub weight: Option<FontWeight>,
    /// Size override in px, `None` for the page default.
    pub size: Option<f32>,
}

/// An image whose top-left corner is at (`x`, `y`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFragment {
    pub x: f32,
    pub y: f32,
    /// Rendered width, known only when the source supplied its size.
    pub width: Option<f32>,
    pub height: f32,
    pub href: String,
    pub alt: String,
}

impl Fragment {
    /// Vertical position used by the overflow invariant.
    pub fn y(&self) -> f32 {
        match self {
            Fragment::Text(t) => t.y,
            Fragment::Image(i) => i.y,
        }
    }
}

/// A finalized page. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    index: usize,
    fragments: Vec<Fragment>,
    svg: String,
}

impl PageDocument {
    /// Zero-based position in the page sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Placements in emission order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Complete SVG markup.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Fragments of the page currently being built.
#[derive(Debug, Default)]
pub struct PageBuffer {
    fragments: Vec<Fragment>,
}

impl PageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Freeze the buffer into page `index` and leave it empty. Returns
    /// `None` without touching anything when the buffer is empty, so no blank
    /// pages are produced.
    pub fn commit(&mut self, index: usize, template: &PageTemplate) -> Option<PageDocument> {
        if self.fragments.is_empty() {
            return None;
        }
        let fragments = std::mem::take(&mut self.fragments);
        let svg = template.render(&fragments);
        Some(PageDocument {
            index,
            fragments,
            svg,
        })
    }
}
