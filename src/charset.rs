//! Static character tables used by the text-flow algorithm: break classes,
//! glyph substitution and heading scale ratios.

/// Font size multiplier for heading levels 1..=6, strictly decreasing.
pub const HEADING_RATIOS: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

/// Characters that never open a line. A run of Latin letters followed by one
/// of these is allowed to overhang the right boundary.
const PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '\'', '"', ')', ']', '}', '，', '。', '、', '；', '：', '！',
    '？', '”', '’', '）', '》', '」', '』', '】', '…',
];

/// Glyph substitution applied to every emitted character.
const GLYPH_SUBSTITUTIONS: &[(char, &str)] = &[
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
    // SVG collapses plain spaces between adjacent <text> nodes.
    (' ', "\u{00A0}"),
];

const REPLACEMENT: &str = "\u{FFFD}";

/// Scale ratio for a heading level, `None` outside 1..=6.
pub fn heading_ratio(level: u8) -> Option<f32> {
    match level {
        1..=6 => Some(HEADING_RATIOS[level as usize - 1]),
        _ => None,
    }
}

/// ASCII alphabetic.
pub fn is_latin_letter(ch: Option<char>) -> bool {
    ch.is_some_and(|c| c.is_ascii_alphabetic())
}

pub fn is_space(ch: Option<char>) -> bool {
    ch.is_some_and(char::is_whitespace)
}

pub fn is_punctuation(ch: Option<char>) -> bool {
    ch.is_some_and(|c| PUNCTUATION.contains(&c))
}

/// Substituted glyph for `ch`, if the table has one. C0 controls other than
/// tab, newline and carriage return are not allowed in XML and become U+FFFD.
pub fn substitute(ch: char) -> Option<&'static str> {
    if ch < ' ' && !matches!(ch, '\t' | '\n' | '\r') {
        return Some(REPLACEMENT);
    }
    GLYPH_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == ch)
        .map(|(_, to)| *to)
}

/// Escape a string for use as element text, e.g. inside `<style>`.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' | '\'' | ' ' => out.push(ch),
            c => match substitute(c) {
                Some(s) => out.push_str(s),
                None => out.push(c),
            },
        }
    }
    out
}

/// Escape a string for use inside a double-quoted XML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            ' ' => out.push(' '),
            c => match substitute(c) {
                Some(s) => out.push_str(s),
                None => out.push(c),
            },
        }
    }
    out
}
