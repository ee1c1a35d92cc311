//! Configuration types for Organelle reaction layouts.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Font size and spacing used by sizing and placement.
//! - [`OntologyConfig`] - Root compartment and ontology loading policy.
//! - [`TextConfig`] - Which [`TextMetrics`] implementation measures labels.
//!
//! # Example
//!
//! ```
//! # use organelle::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().font_size(), 12.0);
//! assert_eq!(config.ontology().root().as_string(), "GO:0005576");
//! ```

use std::sync::Arc;

use serde::Deserialize;

use organelle_core::{
    identifier::Id,
    text::{CosmicTextMetrics, FixedWidthMetrics, TextMetrics},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    ontology: OntologyConfig,

    #[serde(default)]
    text: TextConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, ontology: OntologyConfig, text: TextConfig) -> Self {
        Self {
            layout,
            ontology,
            text,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the ontology configuration.
    pub fn ontology(&self) -> &OntologyConfig {
        &self.ontology
    }

    /// Returns the text measurement configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }
}

/// Font size and spacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Label font size in pixels.
    font_size: f32,

    /// Gap between stacked glyphs, and the unit for connector clearance.
    glyph_spacing: f32,

    /// Padding between a compartment border and its content.
    compartment_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            glyph_spacing: 20.0,
            compartment_padding: 20.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(font_size: f32, glyph_spacing: f32, compartment_padding: f32) -> Self {
        Self {
            font_size,
            glyph_spacing,
            compartment_padding,
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn glyph_spacing(&self) -> f32 {
        self.glyph_spacing
    }

    pub fn compartment_padding(&self) -> f32 {
        self.compartment_padding
    }
}

/// Root compartment and ontology loading policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Identifier of the outermost compartment every tree hangs from.
    root: String,

    /// Label of the root when the ontology does not know it.
    root_name: String,

    /// Whether a missing or unparsable ontology fails the run instead of
    /// degrading to an empty graph.
    strict: bool,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            root: "GO:0005576".to_string(),
            root_name: "extracellular region".to_string(),
            strict: false,
        }
    }
}

impl OntologyConfig {
    pub fn new(root: &str, root_name: &str, strict: bool) -> Self {
        Self {
            root: root.to_string(),
            root_name: root_name.to_string(),
            strict,
        }
    }

    pub fn root(&self) -> Id {
        Id::new(&self.root)
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}

/// Available [`TextMetrics`] implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsKind {
    /// Shape text with the system fonts.
    #[default]
    Cosmic,
    /// Constant advance per character; reproducible everywhere.
    Fixed,
}

/// Text measurement configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    metrics: MetricsKind,
    font_family: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            metrics: MetricsKind::default(),
            font_family: "Arial".to_string(),
        }
    }
}

impl TextConfig {
    pub fn new(metrics: MetricsKind, font_family: &str) -> Self {
        Self {
            metrics,
            font_family: font_family.to_string(),
        }
    }

    pub fn metrics(&self) -> MetricsKind {
        self.metrics
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Creates the configured metrics service.
    pub fn build_metrics(&self) -> Arc<dyn TextMetrics> {
        match self.metrics {
            MetricsKind::Cosmic => Arc::new(CosmicTextMetrics::new(&self.font_family)),
            MetricsKind::Fixed => Arc::new(FixedWidthMetrics::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().glyph_spacing(), 20.0);
        assert_eq!(config.layout().compartment_padding(), 20.0);
        assert_eq!(config.ontology().root_name(), "extracellular region");
        assert!(!config.ontology().strict());
        assert_eq!(config.text().metrics(), MetricsKind::Cosmic);
        assert_eq!(config.text().font_family(), "Arial");
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"layout": {"font_size": 10.0}, "text": {"metrics": "fixed"}}"#,
        )
        .unwrap();
        assert_eq!(config.layout().font_size(), 10.0);
        assert_eq!(config.layout().glyph_spacing(), 20.0);
        assert_eq!(config.text().metrics(), MetricsKind::Fixed);
        assert_eq!(config.text().font_family(), "Arial");
        assert_eq!(config.ontology().root(), Id::new("GO:0005576"));
    }
}
