//! Glyph width measurement.
//!
//! The engine only depends on the [`GlyphMetrics`] contract. [`FontManager`]
//! is the bundled provider: it measures real glyph advances with `ttf-parser`
//! when a face is loaded and falls back to width heuristics otherwise.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// Weight of a run of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Font parameters of one measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontQuery<'a> {
    pub family: &'a str,
    pub size: f32,
    pub weight: Option<FontWeight>,
}

/// Width lookup for a single character.
///
/// Implementations must be deterministic: the same character and query
/// always yield the same width. Each call is a suspension point for the
/// engine; it holds no borrowed layout state across it.
pub trait GlyphMetrics {
    fn measure(&self, ch: char, font: &FontQuery<'_>) -> Result<f32, MetricError>;
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for &M {
    fn measure(&self, ch: char, font: &FontQuery<'_>) -> Result<f32, MetricError> {
        (**self).measure(ch, font)
    }
}

impl<M: GlyphMetrics + ?Sized> GlyphMetrics for Box<M> {
    fn measure(&self, ch: char, font: &FontQuery<'_>) -> Result<f32, MetricError> {
        (**self).measure(ch, font)
    }
}

/// Horizontal advances of one loaded face, read out of its `cmap` and
/// `hmtx` tables once at load time.
struct FontData {
    units_per_em: f32,
    advances: HashMap<char, u16>,
}

impl FontData {
    fn parse(bytes: &[u8]) -> Result<Self, ttf_parser::FaceParsingError> {
        let face = ttf_parser::Face::parse(bytes, 0)?;
        let mut advances = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    let Some(ch) = char::from_u32(cp) else {
                        return;
                    };
                    // Glyph 0 is .notdef.
                    if let Some(gid) = subtable.glyph_index(cp).filter(|g| g.0 != 0) {
                        advances
                            .entry(ch)
                            .or_insert_with(|| face.glyph_hor_advance(gid).unwrap_or(0));
                    }
                });
            }
        }
        Ok(Self {
            units_per_em: face.units_per_em() as f32,
            advances,
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FontKey {
    family: String,
    bold: bool,
}

/// Manages loaded fonts and implements [`GlyphMetrics`].
pub struct FontManager {
    fonts: HashMap<FontKey, FontData>,
    /// Face used for families that were never loaded.
    default_key: FontKey,
}

impl FontManager {
    /// Manager without any face; every family is measured heuristically.
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            default_key: FontKey {
                family: String::new(),
                bold: false,
            },
        }
    }

    /// Load a TTF/OTF font from bytes. The first loaded face becomes the
    /// fallback for unknown families.
    pub fn load_font(&mut self, family: &str, bold: bool, bytes: Vec<u8>) -> Result<(), String> {
        let data = FontData::parse(&bytes).map_err(|e| format!("Failed to parse font: {e}"))?;
        let key = FontKey {
            family: family.to_string(),
            bold,
        };
        log::debug!(
            "loaded font '{}' (bold={}, {} units/em, {} glyphs mapped)",
            family,
            bold,
            data.units_per_em,
            data.advances.len()
        );

        if self.fonts.is_empty() {
            self.default_key = key.clone();
        }
        self.fonts.insert(key, data);
        Ok(())
    }

    /// Number of loaded faces.
    pub fn face_count(&self) -> usize {
        self.fonts.len()
    }

    /// Font data for a family/weight: exact match, then the regular face of
    /// the family, then the default face.
    fn lookup(&self, family: &str, bold: bool) -> Option<&FontData> {
        let key = FontKey {
            family: family.to_string(),
            bold,
        };
        self.fonts
            .get(&key)
            .or_else(|| {
                self.fonts.get(&FontKey {
                    family: family.to_string(),
                    bold: false,
                })
            })
            .or_else(|| self.fonts.get(&self.default_key))
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphMetrics for FontManager {
    fn measure(&self, ch: char, font: &FontQuery<'_>) -> Result<f32, MetricError> {
        let bold = font.weight == Some(FontWeight::Bold);
        let advance = self
            .lookup(font.family, bold)
            .and_then(|data| Some((data.advances.get(&ch)?, data.units_per_em)));
        match advance {
            Some((&units, units_per_em)) => Ok(units as f32 * font.size / units_per_em),
            // No face, or a missing glyph: the renderer substitutes a
            // fallback font, so estimate.
            None => Ok(heuristic_width(ch, font.size, bold)),
        }
    }
}

/// Average advance for proportional Latin text is about half the font size;
/// bold is ~10 % wider. Wide (CJK / full-width) characters take a full em.
fn heuristic_width(ch: char, font_size: f32, bold: bool) -> f32 {
    if ch.is_control() {
        return 0.0;
    }
    if is_wide(ch) {
        return font_size;
    }
    let avg = if bold { 0.55 } else { 0.5 };
    font_size * avg
}

fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
    )
}
