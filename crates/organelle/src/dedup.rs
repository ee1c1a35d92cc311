//! Splits multi-role participants into one glyph per drawn role.
//!
//! Input and catalyst roles always stay on the original glyph, so a
//! substrate that is also its own catalyst is drawn once. Every other role is
//! split off into its own duplicate glyph, unless it is the only such role.

use log::debug;

use organelle_core::semantic::RoleType;

use crate::{
    compartment::CompartmentTree,
    glyph::{EntityGlyph, Glyph, GlyphIdGenerator, GlyphRef, Role},
};

fn stays_merged(role: &Role) -> bool {
    matches!(role.role_type(), RoleType::Input | RoleType::Catalyst)
}

/// Roles of `glyph` that move to glyphs of their own.
fn roles_to_split(glyph: &EntityGlyph) -> Vec<Role> {
    let movable: Vec<Role> = glyph
        .roles()
        .iter()
        .filter(|role| !stays_merged(role))
        .copied()
        .collect();
    if movable.len() <= 1 {
        return Vec::new();
    }

    // Without an input or catalyst role the first movable role stays behind
    let keeps_one = !glyph.roles().iter().any(stays_merged);
    movable.into_iter().skip(usize::from(keeps_one)).collect()
}

/// Splits every glyph in `entities`, appending the copies after their
/// originals and registering them in the compartment of the original.
pub fn deduplicate(
    entities: Vec<EntityGlyph>,
    ids: &mut GlyphIdGenerator,
    tree: &mut CompartmentTree,
) -> Vec<EntityGlyph> {
    let mut result = Vec::with_capacity(entities.len());

    for mut glyph in entities {
        let split = roles_to_split(&glyph);
        if split.is_empty() {
            result.push(glyph);
            continue;
        }

        debug!(
            entity_id = glyph.entity_id(),
            copies = split.len();
            "Splitting multi-role participant"
        );
        glyph.retain_roles(|role| !split.contains(role));

        let node = glyph
            .compartment()
            .and_then(|compartment| tree.find(compartment))
            .unwrap_or_else(|| tree.root());

        let copies: Vec<_> = split
            .into_iter()
            .map(|role| {
                let id = ids.next_id();
                glyph.split_off(id, role, || ids.next_id())
            })
            .collect();

        result.push(glyph);
        for copy in copies {
            tree.register_glyph(node, GlyphRef::Entity(copy.id()));
            result.push(copy);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use organelle_core::{identifier::Id, semantic::ShapeFamily};
    use organelle_ontology::{CELLULAR_COMPONENT, OntologyTerm, RelationshipType};

    use super::*;
    use crate::compartment::NodeOrigin;

    fn setup() -> (GlyphIdGenerator, CompartmentTree) {
        let mut tree = CompartmentTree::new(&OntologyTerm::new(
            Id::new("GO:0005576"),
            "extracellular region",
            CELLULAR_COMPONENT,
        ));
        let cytosol = tree.insert(
            &OntologyTerm::new(Id::new("GO:0005829"), "cytosol", CELLULAR_COMPONENT),
            NodeOrigin::Touched,
        );
        tree.set_parent(cytosol, tree.root(), RelationshipType::SurroundedBy)
            .unwrap();
        (GlyphIdGenerator::new(), tree)
    }

    fn entity(ids: &mut GlyphIdGenerator, roles: &[RoleType]) -> EntityGlyph {
        roles.iter().fold(
            EntityGlyph::new(ids.next_id(), "R-HSA-1", "ATP", ShapeFamily::Chemical)
                .with_compartment(Some(Id::new("GO:0005829"))),
            |glyph, &role| glyph.with_role(role, 1),
        )
    }

    fn role_types(glyph: &EntityGlyph) -> Vec<RoleType> {
        glyph.roles().iter().map(Role::role_type).collect()
    }

    #[test]
    fn test_input_and_catalyst_stay_merged() {
        let (mut ids, mut tree) = setup();
        let glyph = entity(&mut ids, &[RoleType::Input, RoleType::Catalyst]);
        let result = deduplicate(vec![glyph], &mut ids, &mut tree);

        assert_eq!(result.len(), 1);
        assert_eq!(role_types(&result[0]), vec![RoleType::Input, RoleType::Catalyst]);
    }

    #[test]
    fn test_output_and_regulator_are_split() {
        let (mut ids, mut tree) = setup();
        let glyph = entity(&mut ids, &[RoleType::Output, RoleType::NegativeRegulator]);
        let result = deduplicate(vec![glyph], &mut ids, &mut tree);

        assert_eq!(result.len(), 2);
        assert_eq!(role_types(&result[0]), vec![RoleType::Output]);
        assert_eq!(role_types(&result[1]), vec![RoleType::NegativeRegulator]);
        assert!(!result[0].is_duplicate());
        assert!(result[1].is_duplicate());
        assert_eq!(result[0].compartment(), result[1].compartment());
        assert_ne!(result[0].id(), result[1].id());

        let cytosol = tree.find(Id::new("GO:0005829")).unwrap();
        assert!(
            tree.node(cytosol)
                .glyphs()
                .any(|glyph| glyph == GlyphRef::Entity(result[1].id()))
        );
    }

    #[test]
    fn test_single_movable_role_is_not_split() {
        let (mut ids, mut tree) = setup();
        let glyph = entity(&mut ids, &[RoleType::Input, RoleType::Output]);
        let result = deduplicate(vec![glyph], &mut ids, &mut tree);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].roles().len(), 2);
    }

    #[test]
    fn test_input_keeps_merged_roles_and_splits_the_rest() {
        let (mut ids, mut tree) = setup();
        let glyph = entity(
            &mut ids,
            &[
                RoleType::Input,
                RoleType::Output,
                RoleType::PositiveRegulator,
            ],
        );
        let result = deduplicate(vec![glyph], &mut ids, &mut tree);

        assert_eq!(result.len(), 3);
        assert_eq!(role_types(&result[0]), vec![RoleType::Input]);
        assert_eq!(role_types(&result[1]), vec![RoleType::Output]);
        assert_eq!(role_types(&result[2]), vec![RoleType::PositiveRegulator]);
    }
}
