//! Content model – the semantic layout units handed to the engine by an
//! external document extractor.
//!
//! The model is pure data. It serialises with an internally tagged `type`
//! field so a chapter can be supplied as JSON:
//!
//! ```json
//! [
//!   { "type": "heading", "level": 1, "text": "Chapter 1" },
//!   { "type": "paragraph", "text": "Down the rabbit hole." },
//!   { "type": "image", "src": "cover.jpg", "alt": "cover" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

/// One layout unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Paragraph {
        text: String,
    },
    /// `level` is 1..=6; anything else is skipped with a warning.
    Heading {
        level: u8,
        text: String,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
        /// Intrinsic width. Used together with `height` to scale and center.
        #[serde(default)]
        width: Option<f32>,
        #[serde(default)]
        height: Option<f32>,
        #[serde(default)]
        caption: Option<String>,
    },
    CenterParagraph {
        text: String,
    },
    /// Ordered rows of ordered cells.
    Table {
        rows: Vec<Vec<String>>,
    },
    List {
        #[serde(default)]
        kind: ListKind,
        items: Vec<ListItem>,
    },
}

/// Marker style of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    #[default]
    Unordered,
    Ordered,
}

/// Entry of a [`Content::List`]. Lists nest through [`ListItem::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListItem {
    Paragraph {
        text: String,
    },
    List {
        #[serde(default)]
        kind: ListKind,
        items: Vec<ListItem>,
    },
    Image {
        src: String,
        #[serde(default)]
        alt: String,
    },
}

impl Content {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Content::Paragraph { text: text.into() }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Content::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn center(text: impl Into<String>) -> Self {
        Content::CenterParagraph { text: text.into() }
    }

    /// Image with no intrinsic size and no caption.
    pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Content::Image {
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            caption: None,
        }
    }

    /// Parse a JSON array of content items.
    pub fn list_from_json(json: &str) -> std::result::Result<Vec<Content>, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl ListItem {
    pub fn paragraph(text: impl Into<String>) -> Self {
        ListItem::Paragraph { text: text.into() }
    }

    pub fn nested(items: Vec<ListItem>) -> Self {
        ListItem::List {
            kind: ListKind::Unordered,
            items,
        }
    }
}
