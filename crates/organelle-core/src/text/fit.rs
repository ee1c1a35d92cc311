//! Greedy word wrapping and box fitting.
//!
//! [`TextFitter`] offers two searches over the same wrap routine:
//!
//! - [`TextFitter::fit_dimensions`] grows a box of fixed aspect ratio until a
//!   label fits at a fixed font size. Used when sizing glyphs.
//! - [`TextFitter::fit_in_box`] shrinks the font until a label fits a fixed
//!   box. Used by renderers; `None` means the label must be omitted.
//!
//! # Example
//!
//! ```
//! # use organelle_core::text::{FixedWidthMetrics, fit::TextFitter};
//! let metrics = FixedWidthMetrics::default();
//! let fitter = TextFitter::new(&metrics);
//!
//! let size = fitter.fit_dimensions("Glucose-6-phosphate isomerase", 12.0, 2.5);
//! assert!(fitter.wrap("Glucose-6-phosphate isomerase", 12.0, size).is_some());
//! ```

use crate::{geometry::Size, text::TextMetrics};

/// Characters after which a word that overflows a line may be broken.
/// The character stays at the end of its fragment.
pub const SPLIT_CHARACTERS: [char; 7] = [':', '.', '-', ',', ')', '/', '+'];

/// Result of fitting a label into a fixed box.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    font_size: u16,
    lines: Vec<String>,
}

impl FittedText {
    /// Font size at which the label fits.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Wrapped lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Word wrapping and box search over a [`TextMetrics`] service.
#[derive(Clone, Copy)]
pub struct TextFitter<'a> {
    metrics: &'a dyn TextMetrics,
}

impl<'a> TextFitter<'a> {
    pub fn new(metrics: &'a dyn TextMetrics) -> Self {
        Self { metrics }
    }

    /// Width of `text` on a single line.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.text_width(text, font_size)
    }

    /// Height of a single line.
    pub fn line_height(&self, font_size: f32) -> f32 {
        self.metrics.line_height(font_size)
    }

    /// Wraps `text` into lines that fit within `max`.
    ///
    /// Words are accumulated greedily. A word that cannot be appended is split
    /// after any of the [`SPLIT_CHARACTERS`] and its fragments are appended the
    /// same way. Returns `None` as soon as a fragment alone is wider than the
    /// box or the lines no longer fit vertically.
    pub fn wrap(&self, text: &str, font_size: f32, max: Size) -> Option<Vec<String>> {
        let line_height = self.line_height(font_size);
        if line_height > max.height() {
            return None;
        }

        let fits = |candidate: &str| self.text_width(candidate, font_size) <= max.width();

        if fits(text) {
            return Some(vec![text.to_string()]);
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in text.split(' ').filter(|word| !word.is_empty()) {
            let candidate = join(&current, " ", word);
            if fits(&candidate) {
                current = candidate;
                continue;
            }

            for (index, fragment) in split_word(word).into_iter().enumerate() {
                if !fits(fragment) {
                    return None;
                }

                let separator = if index == 0 { " " } else { "" };
                let candidate = join(&current, separator, fragment);
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }

                lines.push(std::mem::replace(&mut current, fragment.to_string()));
                // The line in progress counts towards the height as well
                if (lines.len() + 1) as f32 * line_height > max.height() {
                    return None;
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        Some(lines)
    }

    /// Finds the smallest box with `width = height × ratio` that fits `text`.
    ///
    /// The search starts at two lines of height and grows one line at a time.
    /// The returned dimensions are rounded up to whole pixels.
    pub fn fit_dimensions(&self, text: &str, font_size: f32, ratio: f32) -> Size {
        let line_height = self.line_height(font_size);
        if !(line_height > 0.0 && ratio > 0.0) {
            return Size::default();
        }

        let mut height = 2.0 * line_height;
        loop {
            let width = height * ratio;
            if self
                .wrap(text, font_size, Size::new(width, height))
                .is_some()
            {
                return Size::new(width.ceil(), height.ceil());
            }
            height += line_height;
        }
    }

    /// Finds the largest font size not above `start_font_size` at which `text`
    /// fits inside `size`. Returns `None` when not even size 1 fits.
    pub fn fit_in_box(&self, text: &str, start_font_size: u16, size: Size) -> Option<FittedText> {
        (1..=start_font_size).rev().find_map(|font_size| {
            self.wrap(text, f32::from(font_size), size)
                .map(|lines| FittedText { font_size, lines })
        })
    }
}

fn join(current: &str, separator: &str, next: &str) -> String {
    if current.is_empty() {
        next.to_string()
    } else {
        format!("{current}{separator}{next}")
    }
}

/// Splits a word after every split character, keeping the character.
fn split_word(word: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    for (index, ch) in word.char_indices() {
        if SPLIT_CHARACTERS.contains(&ch) {
            let end = index + ch.len_utf8();
            fragments.push(&word[start..end]);
            start = end;
        }
    }
    if start < word.len() {
        fragments.push(&word[start..]);
    }
    fragments
}
