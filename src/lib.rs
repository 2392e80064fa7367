//! # svg-pager – content stream → paginated SVG
//!
//! This crate lays out a stream of semantic document elements into a
//! deterministic sequence of fixed-size SVG pages. The stages are:
//!
//! 1. **Content** – paragraphs, headings, images, tables, lists ([`content`])
//! 2. **Measure** – per-character widths from a metrics provider ([`fonts`])
//! 3. **Flow** – character-level line and page breaking ([`engine`])
//! 4. **Commit** – frozen page buffers rendered into SVG ([`page`], [`svg`])
//!
//! Identical options, content and metric responses always produce
//! byte-identical pages.

pub mod charset;
pub mod content;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod options;
pub mod page;
pub mod svg;

// Re-exports for convenience
pub use content::{Content, ListItem, ListKind};
pub use engine::{CenteredSplit, SvgRender};
pub use error::{LayoutError, LayoutWarning, MetricError, Result};
pub use fonts::{FontManager, FontQuery, FontWeight, GlyphMetrics};
pub use options::{Padding, ResolvedOptions, SvgRenderOptions};
pub use page::{Fragment, ImageFragment, PageDocument, TextFragment};
