//! Groups participant glyphs by role into deterministically ordered lists.
//!
//! The order decides visual stacking, so it must be reproducible: it is a
//! strict total order over glyphs of distinct entities.

use std::cmp::Ordering;

use serde::Serialize;

use organelle_core::semantic::{RoleType, ShapeFamily};

use crate::glyph::{EntityGlyph, Glyph, GlyphId};

/// Shape families in stacking priority; anything else ranks after them.
pub const FAMILY_PRIORITY: [ShapeFamily; 9] = [
    ShapeFamily::ProcessNode,
    ShapeFamily::EncapsulatedNode,
    ShapeFamily::Complex,
    ShapeFamily::EntitySet,
    ShapeFamily::Protein,
    ShapeFamily::Rna,
    ShapeFamily::Chemical,
    ShapeFamily::Gene,
    ShapeFamily::Entity,
];

/// Rank of `shape` in [`FAMILY_PRIORITY`].
pub fn family_rank(shape: ShapeFamily) -> usize {
    FAMILY_PRIORITY
        .iter()
        .position(|&family| family == shape)
        .unwrap_or(FAMILY_PRIORITY.len())
}

/// Compares two glyphs for stacking order.
///
/// Keys, in order: more distinct roles first, non-trivial first (unknown
/// counts as non-trivial), family rank, name, then entity id.
pub fn compare(a: &EntityGlyph, b: &EntityGlyph) -> Ordering {
    b.roles()
        .len()
        .cmp(&a.roles().len())
        .then_with(|| is_trivial(a).cmp(&is_trivial(b)))
        .then_with(|| family_rank(a.shape()).cmp(&family_rank(b.shape())))
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.entity_id().cmp(b.entity_id()))
}

fn is_trivial(glyph: &EntityGlyph) -> bool {
    glyph.trivial().unwrap_or(false)
}

/// Role-ordered participant lists of a reaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Participants {
    inputs: Vec<GlyphId>,
    outputs: Vec<GlyphId>,
    catalysts: Vec<GlyphId>,
    /// Negative regulators followed by positive regulators.
    regulators: Vec<GlyphId>,
}

impl Participants {
    pub fn inputs(&self) -> &[GlyphId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[GlyphId] {
        &self.outputs
    }

    pub fn catalysts(&self) -> &[GlyphId] {
        &self.catalysts
    }

    pub fn regulators(&self) -> &[GlyphId] {
        &self.regulators
    }

    /// The four lists in placement order.
    pub fn lists(&self) -> [&[GlyphId]; 4] {
        [
            &self.inputs,
            &self.outputs,
            &self.catalysts,
            &self.regulators,
        ]
    }
}

/// Sorts `entities` into role lists. A glyph appears in every list one of
/// its roles belongs to.
pub fn classify<'a>(entities: impl IntoIterator<Item = &'a EntityGlyph>) -> Participants {
    let mut sorted: Vec<_> = entities.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b));

    let with_role = |role: RoleType| -> Vec<GlyphId> {
        sorted
            .iter()
            .filter(|glyph| glyph.has_role(role))
            .map(|glyph| glyph.id())
            .collect()
    };

    let mut regulators = with_role(RoleType::NegativeRegulator);
    regulators.extend(with_role(RoleType::PositiveRegulator));

    Participants {
        inputs: with_role(RoleType::Input),
        outputs: with_role(RoleType::Output),
        catalysts: with_role(RoleType::Catalyst),
        regulators,
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn shape() -> impl Strategy<Value = ShapeFamily> {
        prop_oneof![
            Just(ShapeFamily::Complex),
            Just(ShapeFamily::Protein),
            Just(ShapeFamily::ProteinDrug),
            Just(ShapeFamily::Chemical),
            Just(ShapeFamily::Gene),
            Just(ShapeFamily::Entity),
        ]
    }

    fn role() -> impl Strategy<Value = RoleType> {
        prop_oneof![
            Just(RoleType::Input),
            Just(RoleType::Output),
            Just(RoleType::Catalyst),
            Just(RoleType::PositiveRegulator),
            Just(RoleType::NegativeRegulator),
        ]
    }

    fn glyphs() -> impl Strategy<Value = Vec<EntityGlyph>> {
        proptest::collection::vec(
            (
                "[a-c]{1,2}",
                shape(),
                proptest::option::of(any::<bool>()),
                proptest::collection::vec(role(), 1..3),
            ),
            0..12,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (name, shape, trivial, roles))| {
                    let glyph = EntityGlyph::new(
                        GlyphId::new(index as u32),
                        &format!("E-{index}"),
                        &name,
                        shape,
                    )
                    .with_trivial(trivial);
                    roles
                        .into_iter()
                        .fold(glyph, |glyph, role| glyph.with_role(role, 1))
                })
                .collect()
        })
    }

    /// Any permutation of the input gives the same lists.
    fn check_order_is_stable(glyphs: Vec<EntityGlyph>, seed: u64) -> Result<(), TestCaseError> {
        let expected = classify(&glyphs);

        let mut shuffled: Vec<_> = glyphs.iter().collect();
        // Deterministic permutation driven by the seed
        let len = shuffled.len();
        for index in 0..len {
            let other = (seed as usize).wrapping_mul(index + 7) % len;
            shuffled.swap(index, other);
        }
        prop_assert_eq!(classify(shuffled), expected);
        Ok(())
    }

    /// Distinct glyphs never compare equal.
    fn check_compare_is_strict(glyphs: Vec<EntityGlyph>) -> Result<(), TestCaseError> {
        for (i, a) in glyphs.iter().enumerate() {
            for (j, b) in glyphs.iter().enumerate() {
                let ordering = compare(a, b);
                prop_assert_eq!(ordering == Ordering::Equal, i == j);
                prop_assert_eq!(ordering, compare(b, a).reverse());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn order_is_stable(glyphs in glyphs(), seed in any::<u64>()) {
            check_order_is_stable(glyphs, seed)?;
        }

        #[test]
        fn compare_is_strict(glyphs in glyphs()) {
            check_compare_is_strict(glyphs)?;
        }
    }
}
