//! Render options – user-facing configuration plus its validated form.
//!
//! Every field of [`SvgRenderOptions`] is optional in JSON; missing fields
//! take the documented default. In Rust, overlay with struct-update syntax:
//!
//! ```
//! use svg_pager::SvgRenderOptions;
//! let opts = SvgRenderOptions {
//!     width: 1000.0,
//!     height: 700.0,
//!     ..SvgRenderOptions::default()
//! };
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Configuration for a layout run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgRenderOptions {
    /// Page width in px (default: 1474).
    pub width: f32,
    /// Page height in px (default: 743).
    pub height: f32,
    /// Font family written on the root element and passed to the metrics
    /// provider (default: "Lucida Console, Courier, monospace").
    pub font_family: String,
    /// Base font size in px (default: 20).
    pub font_size: f32,
    /// Directory image sources are resolved against (default: "./images").
    pub image_root: String,
    /// Line height as a multiple of the font size (default: 1.5).
    pub line_height_ratio: f32,
    /// CSS-style padding shorthand, 1–4 space separated integers
    /// (default: "40").
    pub padding: String,
    /// Page background fill (default: "#f0f0f0").
    pub background_color: String,
    /// Corner radius in px; emitted only when > 0 (default: 0).
    pub border_radius: f32,
    /// Page opacity; emitted only when in [0, 1) (default: 1).
    pub opacity: f32,
    /// Text selection background (default: "#b4d5ea").
    pub selection_bg_color: String,
    /// Text selection fill; empty means unset (default: "").
    pub selection_color: String,
    /// CSS cursor keyword (default: "default").
    pub cursor: String,
    /// Stylesheet imported into every page for web fonts; empty means none.
    pub remote_font_css_url: String,
    /// Id of every page's root element, scoping its style block (default: "svg-page").
    pub id: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            width: 1474.0,
            height: 743.0,
            font_family: "Lucida Console, Courier, monospace".to_string(),
            font_size: 20.0,
            image_root: "./images".to_string(),
            line_height_ratio: 1.5,
            padding: "40".to_string(),
            background_color: "#f0f0f0".to_string(),
            border_radius: 0.0,
            opacity: 1.0,
            selection_bg_color: "#b4d5ea".to_string(),
            selection_color: String::new(),
            cursor: "default".to_string(),
            remote_font_css_url: String::new(),
            id: "svg-page".to_string(),
        }
    }
}

impl SvgRenderOptions {
    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Validate and expand into [`ResolvedOptions`].
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("font_size", self.font_size),
            ("line_height_ratio", self.line_height_ratio),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        let padding = Padding::parse(&self.padding)?;
        if padding.left + padding.right >= self.width || padding.top + padding.bottom >= self.height
        {
            return Err(LayoutError::Config(format!(
                "padding {:?} leaves no content area on a {}x{} page",
                self.padding, self.width, self.height
            )));
        }
        Ok(ResolvedOptions {
            raw: self.clone(),
            padding,
        })
    }
}

/// Padding after CSS shorthand expansion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    /// Expand 1–4 space separated non-negative integers with CSS box-model
    /// semantics:
    /// `a` → all sides, `a b` → vertical/horizontal, `a b c` →
    /// top/horizontal/bottom, `a b c d` → top/right/bottom/left.
    pub fn parse(val: &str) -> Result<Self> {
        let parts = val
            .split_whitespace()
            .map(|p| match p.parse::<i32>() {
                Ok(v) if v < 0 => Err(LayoutError::Config(format!(
                    "padding value {p:?} must not be negative"
                ))),
                Ok(v) => Ok(v as f32),
                Err(_) => Err(LayoutError::Config(format!(
                    "padding value {p:?} is not an integer"
                ))),
            })
            .collect::<Result<Vec<f32>>>()?;
        let [top, right, bottom, left] = match parts.as_slice() {
            [a] => [*a, *a, *a, *a],
            [v, h] => [*v, *h, *v, *h],
            [t, h, b] => [*t, *h, *b, *h],
            [t, r, b, l] => [*t, *r, *b, *l],
            _ => {
                return Err(LayoutError::Config(format!(
                    "padding should be 1-4 space separated values, got {}",
                    parts.len()
                )))
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

/// Validated options with derived geometry. Immutable for the engine's
/// lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    raw: SvgRenderOptions,
    pub padding: Padding,
}

impl ResolvedOptions {
    /// The options as supplied.
    pub fn raw(&self) -> &SvgRenderOptions {
        &self.raw
    }

    pub fn width(&self) -> f32 {
        self.raw.width
    }

    pub fn height(&self) -> f32 {
        self.raw.height
    }

    pub fn font_size(&self) -> f32 {
        self.raw.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.raw.font_family
    }

    pub fn line_height_ratio(&self) -> f32 {
        self.raw.line_height_ratio
    }

    /// `font_size × line_height_ratio`.
    pub fn base_line_height(&self) -> f32 {
        self.raw.font_size * self.raw.line_height_ratio
    }

    /// Page width minus horizontal padding.
    pub fn content_width(&self) -> f32 {
        self.raw.width - self.padding.left - self.padding.right
    }

    /// Right edge of the text area.
    pub fn right_boundary(&self) -> f32 {
        self.raw.width - self.padding.right
    }

    /// Bottom edge of the text area.
    pub fn bottom_boundary(&self) -> f32 {
        self.raw.height - self.padding.bottom
    }

    /// Compose the href of an image. `data:` URIs and absolute URLs pass
    /// through; everything else is joined onto `image_root`. No file system
    /// access happens here.
    pub fn image_href(&self, src: &str) -> String {
        if src.starts_with("data:") || src.contains("://") {
            return src.to_string();
        }
        Path::new(&self.raw.image_root)
            .join(src)
            .to_string_lossy()
            .into_owned()
    }
}
