//! SVG page template and fragment markup.
//!
//! Every page shares one template: root element, style block and background
//! rectangle, with a single placeholder where the page's fragments go.

use crate::charset::{escape_attr, escape_text};
use crate::options::SvgRenderOptions;
use crate::page::{Fragment, ImageFragment, TextFragment};

const PLACEHOLDER: &str = "##{content}##";

/// Fixed page markup split around the fragment placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplate {
    head: String,
    tail: String,
}

impl PageTemplate {
    pub fn new(opts: &SvgRenderOptions) -> Self {
        let markup = format!(
            concat!(
                r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" version="1.1" "#,
                r#"font-size="{fs}px" viewBox="0 0 {w} {h}" width="{w}px" height="{h}px" "#,
                r#"font-family="{ff}">{style}{rect}{placeholder}</svg>"#
            ),
            id = escape_attr(&opts.id),
            fs = opts.font_size,
            w = opts.width,
            h = opts.height,
            ff = escape_attr(&opts.font_family),
            style = style_block(opts),
            rect = background_rect(opts),
            placeholder = PLACEHOLDER,
        );
        // The placeholder is inserted exactly once above.
        let (head, tail) = markup
            .split_once(PLACEHOLDER)
            .unwrap_or((markup.as_str(), ""));
        Self {
            head: head.to_string(),
            tail: tail.to_string(),
        }
    }

    /// Page markup with `fragments` in the placeholder position.
    pub fn render(&self, fragments: &[Fragment]) -> String {
        let mut out =
            String::with_capacity(self.head.len() + self.tail.len() + fragments.len() * 32);
        out.push_str(&self.head);
        for fragment in fragments {
            write_fragment(&mut out, fragment);
        }
        out.push_str(&self.tail);
        out
    }
}

fn style_block(opts: &SvgRenderOptions) -> String {
    let id = escape_text(&opts.id);
    let mut css = String::new();
    if !opts.remote_font_css_url.is_empty() {
        css.push_str(&format!(
            "@import url(\"{}\");",
            escape_text(&opts.remote_font_css_url)
        ));
    }
    css.push_str(&format!("#{id}{{cursor:{};", escape_text(&opts.cursor)));
    if (0.0..1.0).contains(&opts.opacity) {
        css.push_str(&format!("opacity:{};", opts.opacity));
    }
    if opts.border_radius > 0.0 {
        css.push_str(&format!("border-radius:{}px;", opts.border_radius));
    }
    css.push('}');
    css.push_str(&format!(
        "#{id} text::selection{{background-color:{};",
        escape_text(&opts.selection_bg_color)
    ));
    if !opts.selection_color.is_empty() {
        css.push_str(&format!("fill:{};", escape_text(&opts.selection_color)));
    }
    css.push('}');
    format!("<style>{css}</style>")
}

fn background_rect(opts: &SvgRenderOptions) -> String {
    format!(
        r#"<rect width="{}" height="{}" fill="{}" pointer-events="none"/>"#,
        opts.width,
        opts.height,
        escape_attr(&opts.background_color)
    )
}

fn write_fragment(out: &mut String, fragment: &Fragment) {
    match fragment {
        Fragment::Text(t) => write_text(out, t),
        Fragment::Image(i) => write_image(out, i),
    }
}

fn write_text(out: &mut String, t: &TextFragment) {
    out.push_str(&format!(r#"<text x="{}" y="{}""#, t.x, t.y));
    if t.weight.is_some() || t.size.is_some() {
        out.push_str(r#" style=""#);
        if let Some(weight) = t.weight {
            out.push_str(&format!("font-weight:{};", weight.as_css()));
        }
        if let Some(size) = t.size {
            out.push_str(&format!("font-size:{size}px;"));
        }
        out.push('"');
    }
    out.push('>');
    out.push_str(&t.glyph);
    out.push_str("</text>");
}

fn write_image(out: &mut String, i: &ImageFragment) {
    out.push_str(&format!(r#"<image x="{}" y="{}""#, i.x, i.y));
    if let Some(width) = i.width {
        out.push_str(&format!(r#" width="{width}""#));
    }
    out.push_str(&format!(
        r#" height="{}" href="{}""#,
        i.height,
        escape_attr(&i.href)
    ));
    if !i.alt.is_empty() {
        out.push_str(&format!(r#" alt="{}""#, escape_attr(&i.alt)));
    }
    out.push_str("/>");
}
