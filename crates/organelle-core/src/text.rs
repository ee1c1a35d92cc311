//! Text measurement and fitting.
//!
//! Sizing and rendering both need to know how wide a string is at a given font
//! size. That capability is abstracted as [`TextMetrics`] with two
//! implementations:
//!
//! - [`CosmicTextMetrics`] shapes text with `cosmic-text` against the fonts
//!   installed on the system.
//! - [`FixedWidthMetrics`] uses a constant advance per character, which keeps
//!   layouts reproducible across machines and is what the tests use.
//!
//! The fitting algorithms built on top of a [`TextMetrics`] live in
//! [`fit`].

pub mod fit;

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Font measurement service consumed by sizing and text fitting.
pub trait TextMetrics: Send + Sync {
    /// Width in pixels of `text` laid out on a single line.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Height in pixels of one line of text.
    fn line_height(&self, font_size: f32) -> f32 {
        font_size * LINE_SPACING
    }
}

/// Deterministic metrics: every character advances by the same amount.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMetrics {
    char_width_factor: f32,
    line_height_factor: f32,
}

impl FixedWidthMetrics {
    /// Creates metrics where a character is `char_width_factor × font_size`
    /// wide and a line is `line_height_factor × font_size` tall.
    pub fn new(char_width_factor: f32, line_height_factor: f32) -> Self {
        Self {
            char_width_factor,
            line_height_factor,
        }
    }
}

impl Default for FixedWidthMetrics {
    fn default() -> Self {
        Self::new(0.6, LINE_SPACING)
    }
}

impl TextMetrics for FixedWidthMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.char_width_factor
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_factor
    }
}

/// Shared font system; loading system fonts is expensive so it happens once.
static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

/// Metrics backed by real font shaping through `cosmic-text`.
#[derive(Debug, Clone)]
pub struct CosmicTextMetrics {
    font_family: String,
}

impl CosmicTextMetrics {
    pub fn new(font_family: &str) -> Self {
        Self {
            font_family: font_family.to_string(),
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }
}

impl Default for CosmicTextMetrics {
    fn default() -> Self {
        Self::new("Arial")
    }
}

impl TextMetrics for CosmicTextMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let mut font_system = FONT_SYSTEM
            .get_or_init(|| {
                info!("Initializing FontSystem");
                Mutex::new(FontSystem::new())
            })
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(font_size, self.line_height(font_size));
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(&self.font_family));

        // Unlimited size: the text stays on one line unless it contains breaks
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0f32, f32::max);

        if width > 0.0 {
            width
        } else {
            // No shaped glyphs (missing fonts); fall back to an estimate
            text.chars().count() as f32 * font_size * 0.55
        }
    }
}
