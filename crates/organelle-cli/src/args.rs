//! Command-line argument definitions for the Organelle CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the reaction, the ontology sources, the
//! output path, the configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the Organelle reaction layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the reaction description (JSON)
    #[arg(help = "Path to the input reaction file")]
    pub input: String,

    /// Path to the compartment ontology (OBO)
    #[arg(long)]
    pub ontology: String,

    /// Path to a cross-reference table adding `surrounded_by` edges
    #[arg(long)]
    pub cross_references: Option<String>,

    /// Path to the output layout file (JSON)
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
