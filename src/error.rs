//! Error and warning types for the layout engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Fatal errors. Any of these ends the current layout run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Options could not be validated. Raised at construction only.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The font metrics provider could not resolve a glyph width. The engine
    /// is left mid-page and must be discarded.
    #[error("Font metric failure: {0}")]
    Metric(#[from] MetricError),

    /// `add_content` was called after `finalize`.
    #[error("Layout already finalized; create a new engine for further content")]
    Finalized,
}

/// Failure reported by a [`GlyphMetrics`](crate::fonts::GlyphMetrics) provider.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot measure {ch:?} in '{family}' at {size}px: {reason}")]
pub struct MetricError {
    pub ch: char,
    pub family: String,
    pub size: f32,
    pub reason: String,
}

/// Non-fatal, per-element problems. The offending element is skipped and
/// layout continues with the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// Image element without a usable `src`.
    ImageWithoutSource { alt: String },
    /// Heading level outside 1..=6.
    InvalidHeadingLevel(u8),
    /// Table with no rows or no cells.
    EmptyTable,
    /// Ordered lists have no layout rule.
    OrderedListUnsupported,
    /// Images nested inside lists have no layout rule.
    ListImageUnsupported { src: String },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::ImageWithoutSource { alt } => {
                write!(f, "image without src (alt={alt:?}) skipped")
            }
            LayoutWarning::InvalidHeadingLevel(level) => {
                write!(f, "heading level {level} is outside 1..=6; heading skipped")
            }
            LayoutWarning::EmptyTable => write!(f, "table without cells skipped"),
            LayoutWarning::OrderedListUnsupported => write!(f, "ordered list skipped"),
            LayoutWarning::ListImageUnsupported { src } => {
                write!(f, "image {src:?} inside a list skipped")
            }
        }
    }
}
