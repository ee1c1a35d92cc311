//! CLI logic for the Organelle reaction layout tool.
//!
//! Reads a reaction description, lays it out against a compartment ontology
//! and writes the resulting geometry as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io, path::Path, sync::Arc};

use log::info;

use organelle::{LayoutBuilder, OrganelleError, load_ontology, semantic::ReactionInput};

/// Run the Organelle CLI application
///
/// # Errors
///
/// Returns `OrganelleError` for:
/// - File I/O errors, including malformed reaction JSON
/// - Configuration loading errors
/// - Reaction documents that are not valid JSON for [`ReactionInput`]
/// - Ontology errors in strict mode
/// - Layout errors
pub fn run(args: &Args) -> Result<(), OrganelleError> {
    info!(
        input_path = args.input,
        ontology_path = args.ontology,
        output_path = args.output;
        "Processing reaction"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let ontology = load_ontology(
        app_config.ontology(),
        &args.ontology,
        args.cross_references.as_deref().map(Path::new),
    )?;
    info!(terms = ontology.len(); "Ontology ready");

    let source = fs::read_to_string(&args.input)?;
    let input: ReactionInput = serde_json::from_str(&source)
        .map_err(|err| OrganelleError::Input(format!("{}: {err}", args.input)))?;

    let builder = LayoutBuilder::new(app_config, Arc::new(ontology));
    let layout = builder.build(&input)?;

    let json = serde_json::to_string_pretty(&layout).map_err(io::Error::from)?;
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}
