//! Reaction and participant descriptors.
//!
//! These are the records handed over by the data-retrieval side: one
//! [`ReactionDescriptor`] per reaction and one [`ParticipantDescriptor`] per
//! (physical entity, role) pair. Everything here is plain data; the layout
//! crate turns it into glyphs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// Functional part a participant plays in a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Input,
    Output,
    Catalyst,
    PositiveRegulator,
    NegativeRegulator,
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Catalyst => "catalyst",
            Self::PositiveRegulator => "positive_regulator",
            Self::NegativeRegulator => "negative_regulator",
        };
        f.write_str(name)
    }
}

/// Visual family of a participant glyph.
///
/// The family decides padding, aspect ratio and whether the glyph carries
/// attachment decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFamily {
    ProcessNode,
    EncapsulatedNode,
    Complex,
    ComplexDrug,
    EntitySet,
    EntitySetDrug,
    Protein,
    ProteinDrug,
    Rna,
    RnaDrug,
    Chemical,
    ChemicalDrug,
    Gene,
    Entity,
}

/// Shape of the reaction node itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    #[default]
    Transition,
    Association,
    Dissociation,
    Omitted,
    Uncertain,
}

/// Reference to the physical entity behind a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Stable identifier of the entity, shared by all of its roles.
    pub id: String,
    /// Display name used as the glyph label.
    pub name: String,
}

/// A decoration such as a modified residue, drawn on the glyph border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    pub id: String,
    pub label: String,
}

/// One (entity, role) record of a reaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParticipantDescriptor {
    pub entity: EntityRef,
    pub role: RoleType,
    #[serde(default = "default_stoichiometry")]
    pub stoichiometry: u32,
    /// Compartments of the entity; the first one is its primary location.
    #[serde(default)]
    pub compartments: Vec<Id>,
    pub shape: ShapeFamily,
    /// Whether the entity is a small, commonly reused molecule such as water.
    #[serde(default)]
    pub trivial: Option<bool>,
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

fn default_stoichiometry() -> u32 {
    1
}

impl ParticipantDescriptor {
    /// Creates a descriptor with stoichiometry 1 and no compartments.
    pub fn new(entity_id: &str, name: &str, role: RoleType, shape: ShapeFamily) -> Self {
        Self {
            entity: EntityRef {
                id: entity_id.to_string(),
                name: name.to_string(),
            },
            role,
            stoichiometry: default_stoichiometry(),
            compartments: Vec::new(),
            shape,
            trivial: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_stoichiometry(mut self, stoichiometry: u32) -> Self {
        self.stoichiometry = stoichiometry;
        self
    }

    pub fn with_compartment(mut self, compartment: &str) -> Self {
        self.compartments.push(Id::new(compartment));
        self
    }

    pub fn with_trivial(mut self, trivial: bool) -> Self {
        self.trivial = Some(trivial);
        self
    }

    pub fn with_attachment(mut self, id: &str, label: &str) -> Self {
        self.attachments.push(AttachmentDescriptor {
            id: id.to_string(),
            label: label.to_string(),
        });
        self
    }

    /// Returns the primary compartment, if any.
    pub fn primary_compartment(&self) -> Option<Id> {
        self.compartments.first().copied()
    }
}

/// The reaction being laid out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReactionDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ReactionKind,
    #[serde(default)]
    pub disease: bool,
    /// Compartments of the reaction; the first one is its primary location.
    #[serde(default)]
    pub compartments: Vec<Id>,
}

impl ReactionDescriptor {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ReactionKind::default(),
            disease: false,
            compartments: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ReactionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_disease(mut self, disease: bool) -> Self {
        self.disease = disease;
        self
    }

    pub fn with_compartment(mut self, compartment: &str) -> Self {
        self.compartments.push(Id::new(compartment));
        self
    }

    /// Returns the primary compartment, if any.
    pub fn primary_compartment(&self) -> Option<Id> {
        self.compartments.first().copied()
    }
}

/// A reaction together with all of its participant records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReactionInput {
    pub reaction: ReactionDescriptor,
    #[serde(default)]
    pub participants: Vec<ParticipantDescriptor>,
}
