//! Layout engine – lays out a stream of [`Content`] one character at a time
//! and splits the result into fixed-size SVG pages.
//!
//! Handles:
//! - ragged-right text flow with hyphenation at Latin letter pairs
//! - trailing-space trimming and punctuation overhang at the right edge
//! - page breaks for text, images and table rows
//! - centered captions, uniform-grid tables and nested lists
//!
//! All mutable layout state (cursor and pending page) lives in one
//! `LayoutState` owned by the engine. Every routine takes `&mut self`, so a
//! second writer cannot interleave with a layout call in progress, including
//! across the metric queries made for each character.

use crate::charset::{heading_ratio, is_latin_letter, is_punctuation, is_space, substitute};
use crate::content::{Content, ListItem, ListKind};
use crate::cursor::Cursor;
use crate::error::{LayoutError, LayoutWarning, Result};
use crate::fonts::{FontQuery, FontWeight, GlyphMetrics};
use crate::options::{ResolvedOptions, SvgRenderOptions};
use crate::page::{Fragment, ImageFragment, PageBuffer, PageDocument, TextFragment};
use crate::svg::PageTemplate;

/// Image block height in line heights.
const IMAGE_LINES: f32 = 3.0;
/// Cursor advance for an image block in line heights.
const IMAGE_ADVANCE_LINES: f32 = 3.5;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Cursor plus the page under construction.
#[derive(Debug)]
struct LayoutState {
    cursor: Cursor,
    buffer: PageBuffer,
}

/// Font and line parameters of one text run.
#[derive(Debug, Clone, Copy)]
struct RunStyle {
    /// Size override; `None` uses the base size.
    font_size: Option<f32>,
    weight: Option<FontWeight>,
    line_height: f32,
    /// Indent wrapped lines return to.
    wrap_indent: f32,
}

/// Result of splitting a centered paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct CenteredSplit {
    /// Text laid out as an ordinary paragraph before the centered line.
    pub prefix: String,
    /// Final run that fits on one line; this is the centered part.
    pub tail: String,
    pub tail_width: f32,
    /// Offset of the tail from the left content edge, never negative.
    pub indent: f32,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Paginating SVG layout engine for one content stream.
///
/// ```
/// use svg_pager::{Content, FontManager, SvgRender, SvgRenderOptions};
///
/// let mut render = SvgRender::new(SvgRenderOptions::default(), FontManager::default())?;
/// render.add_content(&Content::heading(1, "Chapter 1"))?;
/// render.add_content(&Content::paragraph("Down the rabbit hole."))?;
/// let pages = render.finalize();
/// assert_eq!(pages.len(), 1);
/// assert!(pages[0].svg().starts_with("<svg"));
/// # Ok::<(), svg_pager::LayoutError>(())
/// ```
pub struct SvgRender<M> {
    options: ResolvedOptions,
    metrics: M,
    template: PageTemplate,
    line_height: f32,
    state: LayoutState,
    pages: Vec<PageDocument>,
    warnings: Vec<LayoutWarning>,
    finalized: bool,
}

impl<M: GlyphMetrics> SvgRender<M> {
    /// Validate `options` and place the cursor at the top-left content origin.
    pub fn new(options: SvgRenderOptions, metrics: M) -> Result<Self> {
        let options = options.resolve()?;
        let line_height = options.base_line_height();
        let cursor = Cursor::new(options.padding.left, options.padding.top, line_height);
        let template = PageTemplate::new(options.raw());
        log::debug!(
            "layout engine {}x{} content width {} line height {}",
            options.width(),
            options.height(),
            options.content_width(),
            line_height
        );
        Ok(Self {
            options,
            metrics,
            template,
            line_height,
            state: LayoutState {
                cursor,
                buffer: PageBuffer::new(),
            },
            pages: Vec::new(),
            warnings: Vec::new(),
            finalized: false,
        })
    }

    /// Lay out one element. Every fragment it produces is in the current page
    /// (or an already committed one) when this returns.
    ///
    /// A [`LayoutError::Metric`] leaves the engine mid-page; discard it and
    /// start over with a fresh engine.
    pub fn add_content(&mut self, content: &Content) -> Result<()> {
        if self.finalized {
            return Err(LayoutError::Finalized);
        }
        match content {
            Content::Paragraph { text } => {
                let style = self.body_style(0.0);
                self.state.cursor.new_line(style.line_height, 0.0);
                self.flow_text(text, &style)?;
            }
            Content::Heading { level, text } => match heading_ratio(*level) {
                Some(ratio) => {
                    let font_size = self.options.font_size() * ratio;
                    let style = RunStyle {
                        font_size: Some(font_size),
                        weight: Some(FontWeight::Bold),
                        line_height: font_size * self.options.line_height_ratio(),
                        wrap_indent: 0.0,
                    };
                    self.state.cursor.new_line(style.line_height, 0.0);
                    self.flow_text(text, &style)?;
                }
                None => self.warn(LayoutWarning::InvalidHeadingLevel(*level)),
            },
            Content::Image {
                src,
                alt,
                width,
                height,
                caption,
            } => self.add_image(src, alt, *width, *height, caption.as_deref())?,
            Content::CenterParagraph { text } => self.add_center_paragraph(text)?,
            Content::Table { rows } => self.add_table(rows)?,
            Content::List { kind, items } => match kind {
                ListKind::Unordered => self.add_list(items, 0)?,
                ListKind::Ordered => self.warn(LayoutWarning::OrderedListUnsupported),
            },
        }
        Ok(())
    }

    /// Lay out `contents` in order, then finalize.
    pub fn add_contents(&mut self, contents: &[Content]) -> Result<&[PageDocument]> {
        for content in contents {
            self.add_content(content)?;
        }
        Ok(self.finalize())
    }

    /// Commit the pending page, if any, and return every page. Repeated calls
    /// return the same pages. No content can be added afterwards.
    pub fn finalize(&mut self) -> &[PageDocument] {
        if !self.finalized {
            self.commit_page();
            self.finalized = true;
            log::debug!("layout finalized with {} page(s)", self.pages.len());
        }
        &self.pages
    }

    /// Finalize and take ownership of the pages.
    pub fn into_pages(mut self) -> Vec<PageDocument> {
        self.finalize();
        self.pages
    }

    /// Pages committed so far.
    pub fn pages(&self) -> &[PageDocument] {
        &self.pages
    }

    /// Warnings for elements that were skipped.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<LayoutWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Base line height: font size × line-height ratio.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn content_width(&self) -> f32 {
        self.options.content_width()
    }

    /// Current write position.
    pub fn cursor(&self) -> Cursor {
        self.state.cursor
    }

    /// Fragments waiting in the page under construction.
    pub fn pending_fragments(&self) -> usize {
        self.state.buffer.len()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Split `text` for centered layout: greedy chunks of at most one content
    /// width are measured at the base size; only the last chunk is centered.
    pub fn split_centered(&self, text: &str) -> Result<CenteredSplit> {
        let content_width = self.options.content_width();
        let font_size = self.options.font_size();
        let mut prefix = String::new();
        let mut tail = String::new();
        let mut tail_width = 0.0f32;
        for ch in text.chars() {
            let width = self.measure(ch, font_size, None)?;
            if tail_width + width > content_width {
                prefix.push_str(&tail);
                tail.clear();
                tail_width = 0.0;
            }
            tail.push(ch);
            tail_width += width;
        }
        let indent = ((content_width - tail_width) / 2.0).max(0.0);
        Ok(CenteredSplit {
            prefix,
            tail,
            tail_width,
            indent,
        })
    }

    // -----------------------------------------------------------------------
    // Per-type layout
    // -----------------------------------------------------------------------

    fn add_center_paragraph(&mut self, text: &str) -> Result<()> {
        let split = self.split_centered(text)?;
        let style = self.body_style(0.0);
        if !split.prefix.is_empty() {
            self.state.cursor.new_line(style.line_height, 0.0);
            self.flow_text(&split.prefix, &style)?;
        }
        // The tail keeps its indent if it starts a new page.
        let tail_style = self.body_style(split.indent);
        self.state.cursor.new_line(tail_style.line_height, split.indent);
        self.flow_text(&split.tail, &tail_style)
    }

    fn add_image(
        &mut self,
        src: &str,
        alt: &str,
        width: Option<f32>,
        height: Option<f32>,
        caption: Option<&str>,
    ) -> Result<()> {
        if src.trim().is_empty() {
            self.warn(LayoutWarning::ImageWithoutSource {
                alt: alt.to_string(),
            });
            return Ok(());
        }
        let caption = caption.filter(|c| !c.is_empty());
        let block_height = IMAGE_LINES * self.line_height;
        let advance = IMAGE_ADVANCE_LINES * self.line_height;
        // Caption baseline plus its own line.
        let caption_room = if caption.is_some() {
            2.0 * self.line_height
        } else {
            0.0
        };

        // The image occupies the block ending at the advanced baseline.
        self.state.cursor.new_line(advance, 0.0);
        if self
            .state
            .cursor
            .overflows(caption_room, self.options.bottom_boundary())
        {
            self.start_new_page();
            self.state.cursor.new_line(advance, 0.0);
        }

        let y = self.state.cursor.y - block_height;
        let (x, rendered_width) = match (width, height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => {
                let rendered = w * block_height / h;
                let x = self.options.padding.left + (self.options.content_width() - rendered) / 2.0;
                (x, Some(rendered))
            }
            _ => (self.state.cursor.x, None),
        };
        self.state.buffer.push(Fragment::Image(ImageFragment {
            x,
            y,
            width: rendered_width,
            height: block_height,
            href: self.options.image_href(src),
            alt: alt.to_string(),
        }));

        if let Some(caption) = caption {
            self.add_center_paragraph(caption)?;
        }
        Ok(())
    }

    fn add_table(&mut self, rows: &[Vec<String>]) -> Result<()> {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            self.warn(LayoutWarning::EmptyTable);
            return Ok(());
        }
        let cell_width = self.options.content_width() / columns as f32;
        let font_size = self.options.font_size();
        let style = self.body_style(0.0);
        let bottom = self.options.bottom_boundary();

        for row in rows {
            // Row baseline plus its own line must fit, so cells never break
            // the page mid-row.
            if self.state.cursor.overflows(2.0 * style.line_height, bottom) {
                self.start_new_page();
            }
            self.state.cursor.new_line(style.line_height, 0.0);
            for (column, cell) in row.iter().enumerate() {
                let text_width = self.measure_text(cell, font_size)?;
                let offset = ((cell_width - text_width) / 2.0).max(0.0);
                self.state.cursor.new_line(0.0, column as f32 * cell_width + offset);
                self.flow_text(cell, &style)?;
            }
        }
        Ok(())
    }

    fn add_list(&mut self, items: &[ListItem], depth: usize) -> Result<()> {
        let indent = depth as f32 * self.options.font_size();
        for item in items {
            match item {
                ListItem::Paragraph { text } => {
                    let style = self.body_style(indent);
                    self.state.cursor.new_line(style.line_height, indent);
                    self.flow_text(text, &style)?;
                }
                ListItem::List {
                    kind: ListKind::Unordered,
                    items,
                } => self.add_list(items, depth + 1)?,
                ListItem::List {
                    kind: ListKind::Ordered,
                    ..
                } => self.warn(LayoutWarning::OrderedListUnsupported),
                ListItem::Image { src, .. } => {
                    self.warn(LayoutWarning::ListImageUnsupported { src: src.clone() })
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Text flow
    // -----------------------------------------------------------------------

    /// Place `text` glyph by glyph starting at the cursor.
    fn flow_text(&mut self, text: &str, style: &RunStyle) -> Result<()> {
        let right = self.options.right_boundary();
        let bottom = self.options.bottom_boundary();
        let font_size = style.font_size.unwrap_or(self.options.font_size());
        self.state.cursor.line_height = style.line_height;

        let mut prev: Option<char> = None;
        for ch in text.chars() {
            let before = std::mem::replace(&mut prev, Some(ch));
            if ch == '\n' {
                self.break_line(style);
                continue;
            }

            let width = self.measure(ch, font_size, style.weight)?;

            if self.state.cursor.x + width > right {
                let current = Some(ch);
                if !is_space(before) && is_space(current) {
                    // The space is swallowed by the break.
                    self.break_line(style);
                    continue;
                } else if is_latin_letter(before) && is_latin_letter(current) {
                    self.emit("-".to_string(), style);
                    self.break_line(style);
                } else if is_latin_letter(before) && is_punctuation(current) {
                    // Punctuation never opens a line; let it overhang.
                    self.emit(glyph_for(ch), style);
                    continue;
                } else {
                    self.break_line(style);
                }
            }

            if self.state.cursor.overflows(style.line_height, bottom) {
                self.start_new_page();
                self.break_line(style);
            }

            self.emit(glyph_for(ch), style);
            self.state.cursor.x += width;
        }
        Ok(())
    }

    fn break_line(&mut self, style: &RunStyle) {
        self.state.cursor.new_line(style.line_height, style.wrap_indent);
        log::trace!("line break at y={}", self.state.cursor.y);
    }

    fn emit(&mut self, glyph: String, style: &RunStyle) {
        let cursor = self.state.cursor;
        self.state.buffer.push(Fragment::Text(TextFragment {
            x: cursor.x,
            y: cursor.y,
            glyph,
            weight: style.weight,
            size: style.font_size,
        }));
    }

    // -----------------------------------------------------------------------
    // Pages
    // -----------------------------------------------------------------------

    /// Commit the pending page (if it has anything on it) and move the
    /// cursor to the top of a fresh one.
    fn start_new_page(&mut self) {
        self.commit_page();
        self.state.cursor.reset();
    }

    fn commit_page(&mut self) {
        let index = self.pages.len();
        if let Some(page) = self.state.buffer.commit(index, &self.template) {
            log::debug!(
                "committed page {} with {} fragment(s)",
                index,
                page.fragments().len()
            );
            self.pages.push(page);
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn body_style(&self, wrap_indent: f32) -> RunStyle {
        RunStyle {
            font_size: None,
            weight: None,
            line_height: self.line_height,
            wrap_indent,
        }
    }

    fn measure(&self, ch: char, size: f32, weight: Option<FontWeight>) -> Result<f32> {
        let query = FontQuery {
            family: self.options.font_family(),
            size,
            weight,
        };
        Ok(self.metrics.measure(ch, &query)?)
    }

    fn measure_text(&self, text: &str, size: f32) -> Result<f32> {
        text.chars()
            .try_fold(0.0f32, |acc, ch| Ok(acc + self.measure(ch, size, None)?))
    }

    fn warn(&mut self, warning: LayoutWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}

fn glyph_for(ch: char) -> String {
    match substitute(ch) {
        Some(glyph) => glyph.to_string(),
        None => ch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricError;

    /// Every glyph is half an em wide.
    struct Mono;

    impl GlyphMetrics for Mono {
        fn measure(
            &self,
            _ch: char,
            font: &FontQuery<'_>,
        ) -> std::result::Result<f32, MetricError> {
            Ok(font.size / 2.0)
        }
    }

    /// 140x200 page, 20px padding: content box 100x160, 10px glyphs,
    /// 30px lines.
    fn small_render() -> SvgRender<Mono> {
        let opts = SvgRenderOptions {
            width: 140.0,
            height: 200.0,
            padding: "20".to_string(),
            ..SvgRenderOptions::default()
        };
        SvgRender::new(opts, Mono).unwrap()
    }

    fn texts(render: &mut SvgRender<Mono>) -> Vec<TextFragment> {
        render
            .finalize()
            .iter()
            .flat_map(|p| p.fragments().iter())
            .filter_map(|f| match f {
                Fragment::Text(t) => Some(t.clone()),
                Fragment::Image(_) => None,
            })
            .collect()
    }

    fn glyph_at(t: &TextFragment) -> (&str, f32, f32) {
        (t.glyph.as_str(), t.x, t.y)
    }

    #[test]
    fn construct_places_cursor_at_content_origin() {
        let opts = SvgRenderOptions {
            padding: "10 20 30 40".to_string(),
            ..SvgRenderOptions::default()
        };
        let render = SvgRender::new(opts, Mono).unwrap();
        let c = render.cursor();
        assert_eq!((c.x, c.y), (40.0, 10.0));
        assert_eq!(render.line_height(), 30.0);
    }

    #[test]
    fn five_padding_values_fail_construction() {
        let opts = SvgRenderOptions {
            padding: "1 2 3 4 5".to_string(),
            ..SvgRenderOptions::default()
        };
        assert!(matches!(SvgRender::new(opts, Mono), Err(LayoutError::Config(_))));
    }

    #[test]
    fn hyphen_between_latin_letters_at_the_edge() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("abcdefghijkl")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 13);
        let hyphens: Vec<_> = t.iter().filter(|f| f.glyph == "-").collect();
        assert_eq!(hyphens.len(), 1);
        assert_eq!(glyph_at(hyphens[0]), ("-", 120.0, 50.0));
        assert_eq!(glyph_at(&t[9]), ("j", 110.0, 50.0));
        assert_eq!(glyph_at(&t[10]), ("-", 120.0, 50.0));
        assert_eq!(glyph_at(&t[11]), ("k", 20.0, 80.0));
    }

    #[test]
    fn overflowing_space_is_swallowed() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("abcdefghij klm")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 13);
        assert!(t.iter().all(|f| f.glyph != "\u{00A0}" && f.glyph != "-"));
        assert_eq!(glyph_at(&t[10]), ("k", 20.0, 80.0));
    }

    #[test]
    fn punctuation_overhangs_instead_of_breaking() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("abcdefghij.")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 11);
        assert!(t.iter().all(|f| f.y == 50.0));
        assert_eq!(glyph_at(&t[10]), (".", 120.0, 50.0));
    }

    #[test]
    fn other_characters_break_without_hyphen() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("哈哈哈哈哈哈哈哈哈哈哈")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 11);
        assert!(t.iter().all(|f| f.glyph != "-"));
        assert_eq!(glyph_at(&t[10]), ("哈", 20.0, 80.0));
    }

    #[test]
    fn newline_forces_break_without_glyph() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("ab\ncd")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 4);
        assert_eq!(glyph_at(&t[2]), ("c", 20.0, 80.0));
    }

    #[test]
    fn glyphs_are_substituted() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("a <b")).unwrap();
        let glyphs: Vec<String> = texts(&mut render).into_iter().map(|t| t.glyph).collect();
        assert_eq!(glyphs, vec!["a", "\u{00A0}", "&lt;", "b"]);
    }

    #[test]
    fn control_characters_become_replacement_glyphs() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("a\u{1}b")).unwrap();
        let glyphs: Vec<String> = texts(&mut render).into_iter().map(|t| t.glyph).collect();
        assert_eq!(glyphs, vec!["a", "\u{FFFD}", "b"]);
        assert!(render.pages().iter().all(|p| !p.svg().contains('\u{1}')));
    }

    #[test]
    fn text_overflow_starts_a_new_page() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("a".repeat(45))).unwrap();
        let pages = render.finalize();
        assert_eq!(pages.len(), 2);
        for page in pages {
            assert!(page.fragments().iter().all(|f| f.y() <= 180.0));
        }
        match &pages[1].fragments()[0] {
            Fragment::Text(t) => assert_eq!((t.x, t.y), (20.0, 50.0)),
            other => panic!("Expected text, got {other:?}"),
        }
        assert_eq!(pages[0].index(), 0);
        assert_eq!(pages[1].index(), 1);
    }

    #[test]
    fn heading_scales_size_and_line_height() {
        let mut render = small_render();
        render.add_content(&Content::heading(1, "Hi")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t[0].size, Some(40.0));
        assert_eq!(t[0].weight, Some(FontWeight::Bold));
        assert_eq!(t[0].y, 80.0);
        assert_eq!(t[1].x, 40.0);
    }

    #[test]
    fn heading_sizes_decrease_with_level() {
        let mut sizes = Vec::new();
        for level in 1..=6 {
            let mut render = SvgRender::new(SvgRenderOptions::default(), Mono).unwrap();
            render.add_content(&Content::heading(level, "H")).unwrap();
            let size = match &render.finalize()[0].fragments()[0] {
                Fragment::Text(t) => t.size.unwrap(),
                other => panic!("Expected text, got {other:?}"),
            };
            assert_eq!(size, 20.0 * crate::charset::HEADING_RATIOS[level as usize - 1]);
            sizes.push(size);
        }
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn centered_split_keeps_only_the_last_run() {
        let render = small_render();
        let split = render.split_centered("abcdefghijklmno").unwrap();
        assert_eq!(split.prefix, "abcdefghij");
        assert_eq!(split.tail, "klmno");
        assert_eq!(split.tail_width, 50.0);
        assert_eq!(split.indent, 25.0);

        let exact = render.split_centered("abcdefghij").unwrap();
        assert!(exact.prefix.is_empty());
        assert_eq!(exact.indent, 0.0);
    }

    #[test]
    fn centered_paragraph_layout() {
        let mut render = small_render();
        render.add_content(&Content::center("abcdefghijklmno")).unwrap();
        let t = texts(&mut render);
        assert_eq!(t.len(), 15);
        assert_eq!(glyph_at(&t[0]), ("a", 20.0, 50.0));
        assert_eq!(glyph_at(&t[10]), ("k", 45.0, 80.0));
    }

    #[test]
    fn centered_tail_stays_centered_across_a_page_break() {
        let mut render = small_render();
        for _ in 0..4 {
            render.add_content(&Content::paragraph("a")).unwrap();
        }
        render.add_content(&Content::center("abc")).unwrap();
        let pages = render.finalize();
        assert_eq!(pages.len(), 2);
        let placed: Vec<(&str, f32, f32)> = pages[1]
            .fragments()
            .iter()
            .filter_map(|f| match f {
                Fragment::Text(t) => Some(glyph_at(t)),
                Fragment::Image(_) => None,
            })
            .collect();
        // Tail width 30 in a 100 wide content box: indent 35.
        assert_eq!(placed, vec![("a", 55.0, 50.0), ("b", 65.0, 50.0), ("c", 75.0, 50.0)]);
    }

    #[test]
    fn image_without_size_sits_at_cursor() {
        let mut render = small_render();
        render.add_content(&Content::image("a.png", "alt")).unwrap();
        let pages = render.finalize();
        match &pages[0].fragments()[0] {
            Fragment::Image(img) => {
                assert_eq!((img.x, img.y, img.height), (20.0, 35.0, 90.0));
                assert_eq!(img.width, None);
                assert_eq!(img.href, "./images/a.png");
                assert_eq!(img.alt, "alt");
            }
            other => panic!("Expected image, got {other:?}"),
        }
    }

    #[test]
    fn sized_image_is_scaled_and_centered_with_caption() {
        let opts = SvgRenderOptions {
            width: 140.0,
            height: 260.0,
            padding: "20".to_string(),
            ..SvgRenderOptions::default()
        };
        let mut render = SvgRender::new(opts, Mono).unwrap();
        render
            .add_content(&Content::Image {
                src: "a.png".to_string(),
                alt: String::new(),
                width: Some(50.0),
                height: Some(90.0),
                caption: Some("Fig".to_string()),
            })
            .unwrap();
        let pages = render.finalize();
        let frags = pages[0].fragments();
        match &frags[0] {
            Fragment::Image(img) => {
                assert_eq!(img.width, Some(50.0));
                assert_eq!(img.x, 45.0);
            }
            other => panic!("Expected image, got {other:?}"),
        }
        match &frags[1] {
            Fragment::Text(t) => assert_eq!(glyph_at(t), ("F", 55.0, 155.0)),
            other => panic!("Expected caption text, got {other:?}"),
        }
    }

    #[test]
    fn image_that_does_not_fit_moves_to_next_page() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("a")).unwrap();
        render.add_content(&Content::paragraph("b")).unwrap();
        render.add_content(&Content::image("a.png", "")).unwrap();
        let pages = render.finalize();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fragments().len(), 2);
        assert_eq!(pages[1].fragments()[0].y(), 35.0);
    }

    #[test]
    fn table_uses_uniform_centered_columns() {
        let mut render = small_render();
        let rows = vec![
            vec!["a".to_string(), "bb".to_string()],
            vec!["ccc".to_string(), "d".to_string()],
        ];
        render.add_content(&Content::Table { rows }).unwrap();
        let t = texts(&mut render);
        let placed: Vec<_> = t.iter().map(glyph_at).collect();
        assert_eq!(
            placed,
            vec![
                ("a", 40.0, 50.0),
                ("b", 85.0, 50.0),
                ("b", 95.0, 50.0),
                ("c", 30.0, 80.0),
                ("c", 40.0, 80.0),
                ("c", 50.0, 80.0),
                ("d", 90.0, 80.0),
            ]
        );
    }

    #[test]
    fn table_rows_break_pages_whole() {
        let mut render = small_render();
        let rows = (0..6).map(|i| vec![i.to_string()]).collect();
        render.add_content(&Content::Table { rows }).unwrap();
        let pages = render.finalize();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].fragments().len(), 4);
        assert_eq!(pages[1].fragments()[0].y(), 50.0);
    }

    #[test]
    fn nested_lists_indent_by_font_size() {
        let mut render = small_render();
        let items = vec![
            ListItem::paragraph("a"),
            ListItem::nested(vec![
                ListItem::paragraph("bbbbbbbbbb"),
                ListItem::nested(vec![ListItem::paragraph("c")]),
            ]),
        ];
        render
            .add_content(&Content::List {
                kind: ListKind::Unordered,
                items,
            })
            .unwrap();
        let t = texts(&mut render);
        assert_eq!(glyph_at(&t[0]), ("a", 20.0, 50.0));
        assert_eq!(glyph_at(&t[1]), ("b", 40.0, 80.0));
        // Eight glyphs fit at depth 1; the wrapped line keeps the indent.
        assert_eq!(glyph_at(&t[9]), ("-", 120.0, 80.0));
        assert_eq!(glyph_at(&t[10]), ("b", 40.0, 110.0));
        assert_eq!(glyph_at(t.last().unwrap()), ("c", 60.0, 140.0));
    }

    #[test]
    fn unsupported_elements_are_skipped_with_warnings() {
        let mut render = small_render();
        render.add_content(&Content::heading(7, "x")).unwrap();
        render.add_content(&Content::image(" ", "lost")).unwrap();
        render.add_content(&Content::Table { rows: vec![] }).unwrap();
        render
            .add_content(&Content::List {
                kind: ListKind::Ordered,
                items: vec![ListItem::paragraph("x")],
            })
            .unwrap();
        render
            .add_content(&Content::List {
                kind: ListKind::Unordered,
                items: vec![ListItem::Image {
                    src: "a.png".to_string(),
                    alt: String::new(),
                }],
            })
            .unwrap();
        assert_eq!(render.warnings().len(), 5);
        assert_eq!(render.pending_fragments(), 0);
        assert!(render.finalize().is_empty());
        assert_eq!(render.take_warnings()[0], LayoutWarning::InvalidHeadingLevel(7));
        assert!(render.warnings().is_empty());
    }

    #[test]
    fn finalize_is_idempotent_and_terminal() {
        let mut render = small_render();
        render.add_content(&Content::paragraph("hello")).unwrap();
        let first = render.finalize().to_vec();
        let second = render.finalize().to_vec();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert!(render.is_finalized());
        assert_eq!(
            render.add_content(&Content::paragraph("late")),
            Err(LayoutError::Finalized)
        );
        assert_eq!(render.into_pages().len(), 1);
    }

    #[test]
    fn metric_failure_is_fatal() {
        struct NoX;
        impl GlyphMetrics for NoX {
            fn measure(
                &self,
                ch: char,
                font: &FontQuery<'_>,
            ) -> std::result::Result<f32, MetricError> {
                if ch == 'x' {
                    return Err(MetricError {
                        ch,
                        family: font.family.to_string(),
                        size: font.size,
                        reason: "glyph lookup failed".to_string(),
                    });
                }
                Ok(10.0)
            }
        }
        let mut render = SvgRender::new(SvgRenderOptions::default(), NoX).unwrap();
        let err = render.add_content(&Content::paragraph("box")).unwrap_err();
        assert!(matches!(err, LayoutError::Metric(ref m) if m.ch == 'x'));
    }
}
