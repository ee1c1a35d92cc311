//! Organelle Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Organelle
//! workspace. It includes:
//!
//! - **Identifiers**: String-interned ontology identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes, bounds and glyph boxes ([`geometry`] module)
//! - **Semantic**: Reaction and participant descriptors ([`semantic`] module)
//! - **Text**: Text measurement and fitting ([`text`] module)

pub mod geometry;
pub mod identifier;
pub mod semantic;
pub mod text;
