//! Organelle - Geometric layout of a single biochemical reaction.
//!
//! Organelle takes one reaction with its participants and produces a 2-D
//! layout: a reaction node with its backbone, one glyph per participant role
//! arranged around it, connectors with role markers, and a tree of nested
//! cellular compartments drawn as labelled boxes around their content.
//!
//! # Pipeline
//!
//! ```text
//! ReactionInput
//!     ↓ ingest        one glyph per physical entity
//!     ↓ compartment   minimal tree from the touched compartments to the root
//!     ↓ dedup         one glyph per drawn role
//!     ↓ sizing        label wrapping, family padding, attachment slots
//!     ↓ classify      deterministic role lists
//!     ↓ layout        placement, connectors, compartment boxes
//! Layout
//! ```

pub mod classify;
pub mod compartment;
pub mod config;
pub mod dedup;
pub mod glyph;
pub mod layout;
pub mod sizing;

mod error;
mod ingest;

pub use organelle_core::{geometry, identifier, semantic, text};
pub use organelle_ontology as ontology;

pub use error::OrganelleError;
pub use layout::Layout;

use std::{path::Path, sync::Arc};

use indexmap::IndexSet;
use log::{debug, info, trace, warn};

use organelle_core::{
    identifier::Id,
    semantic::ReactionInput,
    text::{TextMetrics, fit::TextFitter},
};
use organelle_ontology::OntologyGraph;

use compartment::{CompartmentTree, CompartmentTreeBuilder, NodeIndex};
use config::{AppConfig, OntologyConfig};
use glyph::{Glyph, GlyphIdGenerator, GlyphRef};
use layout::BoxStyle;
use sizing::GeometrySizer;

/// Builder for laying out reactions against a shared ontology.
///
/// The ontology is loaded once and shared read-only; every call to
/// [`build`](Self::build) produces an independent [`Layout`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use organelle::{LayoutBuilder, config::AppConfig, ontology::OntologyGraph};
///
/// let ontology = Arc::new(OntologyGraph::load_or_empty("go-basic.obo"));
/// let builder = LayoutBuilder::new(AppConfig::default(), ontology);
///
/// let input = serde_json::from_str(r#"{"reaction": {"id": "R-1", "name": "r"}}"#)
///     .expect("Failed to parse reaction");
/// let layout = builder.build(&input).expect("Failed to lay out reaction");
/// println!("{}", layout.bounds().width());
/// ```
pub struct LayoutBuilder {
    config: AppConfig,
    ontology: Arc<OntologyGraph>,
    metrics: Arc<dyn TextMetrics>,
}

impl LayoutBuilder {
    /// Creates a builder measuring text with the metrics named in `config`.
    pub fn new(config: AppConfig, ontology: Arc<OntologyGraph>) -> Self {
        let metrics = config.text().build_metrics();
        Self {
            config,
            ontology,
            metrics,
        }
    }

    /// Replaces the text metrics service.
    pub fn with_metrics(mut self, metrics: Arc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ontology(&self) -> &OntologyGraph {
        &self.ontology
    }

    /// Lays out one reaction.
    ///
    /// # Errors
    ///
    /// Returns [`OrganelleError::Layout`] for unusable layout settings and
    /// [`OrganelleError::Structure`] for malformed participants or a
    /// violated tree invariant.
    pub fn build(&self, input: &ReactionInput) -> Result<Layout, OrganelleError> {
        self.check_settings()?;
        let settings = self.config.layout();
        info!(
            reaction_id = input.reaction.id.as_str(),
            participants = input.participants.len();
            "Building reaction layout"
        );

        let mut ids = GlyphIdGenerator::new();
        let mut reaction = ingest::reaction_glyph(&input.reaction, &mut ids);
        let mut entities = ingest::entity_glyphs(&input.participants, &mut ids)?;

        let touched: IndexSet<_> = input
            .reaction
            .compartments
            .iter()
            .chain(input.participants.iter().flat_map(|p| &p.compartments))
            .copied()
            .collect();
        let ontology_config = self.config.ontology();
        let mut tree = CompartmentTreeBuilder::new(
            &self.ontology,
            ontology_config.root(),
            ontology_config.root_name(),
        )
        .build(&touched)?;
        debug!(touched = touched.len(), nodes = tree.len(); "Compartment tree built");

        let node = home_node(&tree, reaction.compartment());
        reaction.set_compartment(tree.node(node).id());
        tree.register_glyph(node, GlyphRef::Reaction);
        for entity in &mut entities {
            let node = home_node(&tree, entity.compartment());
            entity.set_compartment(tree.node(node).id());
            tree.register_glyph(node, GlyphRef::Entity(entity.id()));
        }

        let mut entities = dedup::deduplicate(entities, &mut ids, &mut tree);
        debug!(glyphs = entities.len(); "Participants deduplicated");

        let sizer = GeometrySizer::new(self.metrics.as_ref(), settings.font_size());
        for entity in &mut entities {
            sizer.size_entity(entity);
        }

        let participants = classify::classify(&entities);
        trace!(participants:?; "Participants classified");

        layout::place_participants(
            &mut reaction,
            &mut entities,
            &participants,
            settings.glyph_spacing(),
        );

        let fitter = TextFitter::new(self.metrics.as_ref());
        let style = BoxStyle {
            fitter: &fitter,
            font_size: settings.font_size(),
            padding: settings.compartment_padding(),
            spacing: settings.glyph_spacing(),
        };
        layout::fit_compartments(&mut tree, &reaction, &entities, &style);

        let mut layout = Layout::new(reaction, entities, tree, participants);
        layout.normalize();

        let bounds = layout.bounds();
        info!(
            width = bounds.width(),
            height = bounds.height(),
            glyphs = layout.entities().len();
            "Reaction layout built"
        );
        Ok(layout)
    }

    fn check_settings(&self) -> Result<(), OrganelleError> {
        let settings = self.config.layout();
        if settings.font_size().is_nan() || settings.font_size() <= 0.0 {
            return Err(OrganelleError::Layout(format!(
                "font size must be positive, got {}",
                settings.font_size()
            )));
        }
        if settings.glyph_spacing() < 0.0 || settings.compartment_padding() < 0.0 {
            return Err(OrganelleError::Layout(
                "glyph spacing and compartment padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Node a glyph lives in: its compartment, or the root when the compartment
/// is missing or unknown.
fn home_node(tree: &CompartmentTree, id: Option<Id>) -> NodeIndex {
    id.and_then(|id| tree.find(id))
        .unwrap_or_else(|| tree.root())
}

/// Loads the ontology and optional cross-references under the policy of
/// `config`.
///
/// In strict mode any failure is returned; otherwise a missing or broken
/// ontology degrades to an empty graph and broken cross-references are
/// skipped.
///
/// # Errors
///
/// Returns [`OrganelleError::Ontology`] in strict mode when a source cannot
/// be read or parsed.
pub fn load_ontology(
    config: &OntologyConfig,
    path: impl AsRef<Path>,
    cross_references: Option<&Path>,
) -> Result<OntologyGraph, OrganelleError> {
    let mut graph = if config.strict() {
        OntologyGraph::load(path)?
    } else {
        OntologyGraph::load_or_empty(path)
    };

    if let Some(cross_references) = cross_references {
        match graph.load_cross_references(cross_references) {
            Ok(count) => debug!(edges = count; "Cross-references applied"),
            Err(err) if !config.strict() => {
                warn!(err:%; "Failed to load cross-references, continuing without them");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(graph)
}
