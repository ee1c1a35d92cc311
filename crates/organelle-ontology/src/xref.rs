//! Secondary source of containment edges.
//!
//! Each non-blank, non-`#` line holds `subject<TAB>relation<TAB>object`, where
//! `relation` is `surrounded_by` or `component_of`. Subjects and objects are
//! keys still to be resolved against the ontology.

use log::warn;

use crate::term::RelationshipType;

/// An unresolved edge read from the cross-reference source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    subject: String,
    relationship: RelationshipType,
    object: String,
}

impl CrossReference {
    pub fn new(subject: &str, relationship: RelationshipType, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            relationship,
            object: object.to_string(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn relationship(&self) -> RelationshipType {
        self.relationship
    }

    pub fn object(&self) -> &str {
        &self.object
    }
}

/// Reads every well-formed line; malformed lines are skipped with a warning.
pub fn parse_cross_references(source: &str) -> Vec<CrossReference> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let parsed = parse_line(line);
            if parsed.is_none() {
                warn!(line = index + 1, content = line; "Skipping malformed cross-reference");
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<CrossReference> {
    let mut fields = line.split('\t').map(str::trim);
    let subject = fields.next().filter(|s| !s.is_empty())?;
    let relationship = match fields.next()? {
        "surrounded_by" => RelationshipType::SurroundedBy,
        "component_of" => RelationshipType::ComponentOf,
        _ => return None,
    };
    let object = fields.next().filter(|s| !s.is_empty())?;
    if fields.next().is_some() {
        return None;
    }
    Some(CrossReference::new(subject, relationship, object))
}
