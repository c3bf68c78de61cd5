//! Page geometry and line wrapping

use crate::config::RenderConfig;
use unicode_width::UnicodeWidthChar;

/// Millimetres per typographic point
pub const PT_TO_MM: f32 = 0.352_778;

/// Helvetica advance widths for U+0020 through U+007E, in 1/1000 em
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Advance used for narrow glyphs the table does not list
const FALLBACK_ADVANCE: u32 = 556;

/// Advance of `ch` in Helvetica, in 1/1000 em
pub fn glyph_units(ch: char) -> u32 {
    if (' '..='~').contains(&ch) {
        return u32::from(HELVETICA_ASCII[ch as usize - 0x20]);
    }

    match ch {
        '\u{a0}' => 278,
        '\u{2022}' => 350,
        '\u{2018}' | '\u{2019}' | '\u{201a}' => 222,
        '\u{201c}' | '\u{201d}' | '\u{201e}' => 333,
        '\u{2013}' => 556,
        '\u{2014}' | '\u{2026}' | '\u{2030}' | '\u{2122}' => 1000,
        '\u{c6}' | '\u{152}' => 1000,
        '\u{e6}' => 889,
        '\u{153}' => 944,
        '\u{c0}'..='\u{c5}' | '\u{c8}'..='\u{cb}' | '\u{dd}' | '\u{de}' => 667,
        '\u{c7}' | '\u{d0}' | '\u{d1}' | '\u{d9}'..='\u{dc}' => 722,
        '\u{d2}'..='\u{d6}' | '\u{d8}' => 778,
        '\u{cc}'..='\u{cf}' | '\u{ec}'..='\u{ef}' => 278,
        '\u{a9}' | '\u{ae}' => 737,
        _ => match UnicodeWidthChar::width(ch) {
            Some(0) => 0,
            Some(2) => 1000,
            _ => FALLBACK_ADVANCE,
        },
    }
}

/// Advance of `text` in Helvetica, in 1/1000 em
pub fn text_units(text: &str) -> u32 {
    text.chars().map(glyph_units).sum()
}

/// Fixed page geometry shared by every rendered page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size: f32,
    pub line_height_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for PageLayout {
    fn from(config: &RenderConfig) -> Self {
        Self {
            page_width_mm: config.page_width_mm,
            page_height_mm: config.page_height_mm,
            margin_mm: config.margin_mm,
            font_size: config.font_size,
            line_height_mm: config.line_height_mm,
        }
    }
}

impl PageLayout {
    /// Width of the text cell between the side margins
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Height of one em at the configured font size
    fn em_mm(&self) -> f32 {
        self.font_size * PT_TO_MM
    }

    /// Widest row, in 1/1000 em, that fits in the text cell
    pub fn max_line_units(&self) -> u32 {
        ((self.text_width_mm() / self.em_mm() * 1000.0).floor() as u32).max(1)
    }

    /// Printed width of `text` at the configured font size
    pub fn measure_mm(&self, text: &str) -> f32 {
        text_units(text) as f32 / 1000.0 * self.em_mm()
    }

    /// Number of lines that fit between the top and bottom margins
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - 2.0 * self.margin_mm;
        ((usable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Baseline of the first line, measured from the bottom edge
    pub fn first_baseline_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm - (self.line_height_mm + self.em_mm()) / 2.0
    }

    /// Splits `text` into wrapped rows and groups them into pages
    ///
    /// Lines are split on `\n` and trimmed; blank lines are skipped rather
    /// than rendered as vertical space. The result always has at least one
    /// (possibly empty) page.
    pub fn paginate(&self, text: &str) -> Vec<Vec<String>> {
        let max_units = self.max_line_units();
        let rows: Vec<String> = content_lines(text)
            .flat_map(|line| wrap_line(line, max_units))
            .collect();

        if rows.is_empty() {
            return vec![Vec::new()];
        }

        rows.chunks(self.lines_per_page())
            .map(|page| page.to_vec())
            .collect()
    }
}

/// Non-empty trimmed lines of `text`
pub fn content_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Greedily wraps a line on word boundaries to rows of at most `max_units`
///
/// Widths are Helvetica advances in 1/1000 em. Words wider than a whole row
/// are broken between characters.
pub fn wrap_line(line: &str, max_units: u32) -> Vec<String> {
    let max_units = max_units.max(1);
    let space = glyph_units(' ');
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for word in line.split_whitespace() {
        let word_width = text_units(word);

        if word_width > max_units {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                width = 0;
            }
            for ch in word.chars() {
                let ch_width = glyph_units(ch);
                if width + ch_width > max_units && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    width = 0;
                }
                current.push(ch);
                width += ch_width;
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_width
        } else {
            width + space + word_width
        };

        if needed > max_units {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            width = needed;
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}
