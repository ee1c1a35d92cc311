//! Interned identifiers for ontology terms and compartments.
//!
//! Ontology accessions such as `GO:0005829` are compared and hashed far more
//! often than they are printed, so they are stored as [`Id`] symbols in a
//! process-wide string interner.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned identifier, cheap to copy, hash and compare.
///
/// # Examples
///
/// ```
/// use organelle_core::identifier::Id;
///
/// let cytosol = Id::new("GO:0005829");
/// assert_eq!(cytosol, "GO:0005829");
/// assert_eq!(cytosol, Id::new("GO:0005829"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the string this identifier stands for.
    pub fn as_string(&self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Id::new(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("GO:0005829");
        let id2 = Id::new("GO:0005829");
        let id3 = Id::new("GO:0005634");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "GO:0005829");
    }

    #[test]
    fn test_display_and_as_string() {
        let id = Id::new("GO:0005576");
        assert_eq!(id.to_string(), "GO:0005576");
        assert_eq!(id.as_string(), "GO:0005576");
    }

    #[test]
    fn test_str_comparison() {
        let id: Id = "cytosol".into();
        assert!(id == "cytosol");
        assert!(id != "nucleus");
    }

    #[test]
    fn test_serde_as_string() {
        let id = Id::new("GO:0005739");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"GO:0005739\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
