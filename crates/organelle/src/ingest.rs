//! Turns reaction and participant descriptors into unplaced glyphs.

use indexmap::IndexMap;
use log::{debug, trace};

use organelle_core::semantic::{ParticipantDescriptor, ReactionDescriptor};

use crate::{
    error::OrganelleError,
    glyph::{AttachmentGlyph, EntityGlyph, GlyphIdGenerator, ReactionGlyph},
    sizing::family_geometry,
};

/// Creates the reaction node, located in the reaction's primary compartment.
pub(crate) fn reaction_glyph(
    descriptor: &ReactionDescriptor,
    ids: &mut GlyphIdGenerator,
) -> ReactionGlyph {
    ReactionGlyph::new(ids.next_id(), &descriptor.id, &descriptor.name, descriptor.kind)
        .with_disease(descriptor.disease)
        .with_compartment(descriptor.primary_compartment())
}

/// Merges participant records into one glyph per physical entity.
///
/// The first record of an entity decides its name, shape and compartment;
/// later records only contribute roles and attachments. Repeated roles sum
/// their stoichiometry.
///
/// # Errors
///
/// Returns [`OrganelleError::Structure`] for a record with zero
/// stoichiometry, or when repeated records of one role sum past `u32::MAX`.
pub(crate) fn entity_glyphs(
    participants: &[ParticipantDescriptor],
    ids: &mut GlyphIdGenerator,
) -> Result<Vec<EntityGlyph>, OrganelleError> {
    let mut glyphs: IndexMap<&str, EntityGlyph> = IndexMap::new();

    for participant in participants {
        if participant.stoichiometry == 0 {
            return Err(OrganelleError::Structure(format!(
                "participant {} has zero stoichiometry as {}",
                participant.entity.id, participant.role,
            )));
        }

        let glyph = glyphs
            .entry(participant.entity.id.as_str())
            .or_insert_with(|| {
                EntityGlyph::new(
                    ids.next_id(),
                    &participant.entity.id,
                    &participant.entity.name,
                    participant.shape,
                )
                .with_trivial(participant.trivial)
                .with_compartment(participant.primary_compartment())
            });
        let total = match glyph.role(participant.role) {
            Some(role) => role.stoichiometry().checked_add(participant.stoichiometry),
            None => Some(participant.stoichiometry),
        };
        if total.is_none() {
            return Err(OrganelleError::Structure(format!(
                "participant {} overflows the stoichiometry of {}",
                participant.entity.id, participant.role,
            )));
        }
        glyph.add_role(participant.role, participant.stoichiometry);

        if participant.attachments.is_empty() {
            continue;
        }
        if !family_geometry(glyph.shape()).carries_attachments() {
            debug!(
                entity_id = participant.entity.id.as_str(),
                shape:? = glyph.shape(),
                count = participant.attachments.len();
                "Shape family draws no attachments, dropping them"
            );
            continue;
        }
        for attachment in &participant.attachments {
            glyph.add_attachment(AttachmentGlyph::new(
                ids.next_id(),
                &attachment.id,
                &attachment.label,
            ));
        }
    }

    trace!(entities = glyphs.len(); "Ingested participants");
    Ok(glyphs.into_values().collect())
}

#[cfg(test)]
mod tests {
    use organelle_core::{
        identifier::Id,
        semantic::{RoleType, ShapeFamily},
    };

    use super::*;
    use crate::glyph::Glyph;

    #[test]
    fn test_records_of_one_entity_merge() {
        let participants = vec![
            ParticipantDescriptor::new("e1", "ATP", RoleType::Input, ShapeFamily::Chemical)
                .with_stoichiometry(2)
                .with_compartment("GO:0005829")
                .with_trivial(true),
            ParticipantDescriptor::new("e2", "HK1", RoleType::Catalyst, ShapeFamily::Protein),
            ParticipantDescriptor::new("e1", "ATP", RoleType::Input, ShapeFamily::Chemical),
            ParticipantDescriptor::new("e1", "ATP", RoleType::Catalyst, ShapeFamily::Chemical),
        ];
        let mut ids = GlyphIdGenerator::new();
        let glyphs = entity_glyphs(&participants, &mut ids).unwrap();

        assert_eq!(glyphs.len(), 2);
        let atp = &glyphs[0];
        assert_eq!(atp.entity_id(), "e1");
        assert_eq!(atp.role(RoleType::Input).unwrap().stoichiometry(), 3);
        assert!(atp.is_input_and_catalyst());
        assert_eq!(atp.trivial(), Some(true));
        assert_eq!(atp.compartment(), Some(Id::new("GO:0005829")));
        assert_ne!(glyphs[0].id(), glyphs[1].id());
    }

    #[test]
    fn test_zero_stoichiometry_is_structure_error() {
        let participants = vec![
            ParticipantDescriptor::new("e1", "ATP", RoleType::Input, ShapeFamily::Chemical)
                .with_stoichiometry(0),
        ];
        let err = entity_glyphs(&participants, &mut GlyphIdGenerator::new()).unwrap_err();
        assert!(matches!(err, OrganelleError::Structure(_)));
    }

    #[test]
    fn test_stoichiometry_overflow_is_structure_error() {
        let participants = vec![
            ParticipantDescriptor::new("e1", "glucose", RoleType::Input, ShapeFamily::Chemical)
                .with_stoichiometry(u32::MAX),
            ParticipantDescriptor::new("e1", "glucose", RoleType::Input, ShapeFamily::Chemical)
                .with_stoichiometry(1),
        ];
        let err = entity_glyphs(&participants, &mut GlyphIdGenerator::new()).unwrap_err();
        assert!(matches!(err, OrganelleError::Structure(_)));
        assert!(err.to_string().contains("e1"));
    }

    #[test]
    fn test_attachments_only_on_families_that_carry_them() {
        let participants = vec![
            ParticipantDescriptor::new("e1", "TP53", RoleType::Input, ShapeFamily::Protein)
                .with_attachment("m1", "P")
                .with_attachment("m2", "Ac"),
            ParticipantDescriptor::new("e1", "TP53", RoleType::Catalyst, ShapeFamily::Protein)
                .with_attachment("m1", "P"),
            ParticipantDescriptor::new("e2", "ATP", RoleType::Input, ShapeFamily::Chemical)
                .with_attachment("m3", "P"),
        ];
        let glyphs = entity_glyphs(&participants, &mut GlyphIdGenerator::new()).unwrap();

        let labels: Vec<_> = glyphs[0]
            .attachments()
            .iter()
            .map(AttachmentGlyph::label)
            .collect();
        assert_eq!(labels, vec!["P", "Ac"]);
        assert!(glyphs[1].attachments().is_empty());
    }

    #[test]
    fn test_reaction_glyph_uses_primary_compartment() {
        let descriptor = ReactionDescriptor::new("R-HSA-1", "phosphorylation")
            .with_disease(true)
            .with_compartment("GO:0005829")
            .with_compartment("GO:0005634");
        let reaction = reaction_glyph(&descriptor, &mut GlyphIdGenerator::new());
        assert_eq!(reaction.compartment(), Some(Id::new("GO:0005829")));
        assert!(reaction.is_disease());
        assert_eq!(reaction.name(), "phosphorylation");
    }
}
