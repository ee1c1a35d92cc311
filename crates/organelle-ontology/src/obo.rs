//! Parser for the OBO 1.2 term-frame format.
//!
//! Only what the compartment hierarchy needs is read: `[Term]` stanzas with
//! their `id`, `name`, `namespace`, `is_obsolete`, `is_a` and `relationship`
//! tags. Header lines, other stanza types and unknown tags are skipped.
//! Trailing `! comments` and `{qualifier}` blocks are dropped from every
//! value except `name`, which is free text and may contain `!`.
//!
//! ```text
//! [Term]
//! id: GO:0005829
//! name: cytosol
//! namespace: cellular_component
//! is_a: GO:0110165 ! cellular anatomical structure
//! relationship: part_of GO:0005737 ! cytoplasm
//! ```

use log::trace;
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{delimited, separated_pair},
    error::ModalResult,
    token::{rest, take_while},
};

use crate::error::OboError;

/// One `[Term]` stanza.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrame {
    pub id: String,
    pub name: String,
    pub namespace: String,
    pub obsolete: bool,
    pub is_a: Vec<String>,
    /// `(relationship type, target id)` pairs.
    pub relationships: Vec<(String, String)>,
}

/// Parse a stanza header such as `[Term]`
fn stanza_header<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('[', take_while(1.., |c: char| c != ']'), ']').parse_next(input)
}

/// Parse a `tag: value` pair; the value is the rest of the line
fn tag_value<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let tag = take_while(1.., |c: char| c != ':' && !c.is_whitespace()).parse_next(input)?;
    ':'.parse_next(input)?;
    space0.parse_next(input)?;
    let value = rest.parse_next(input)?;
    Ok((tag, value.trim()))
}

/// Drops a trailing `! comment`
fn strip_comment(value: &str) -> &str {
    value
        .split_once('!')
        .map_or(value, |(head, _)| head)
        .trim_end()
}

/// Parse a whitespace-free token such as an identifier or a relationship name
fn token<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '{').parse_next(input)
}

/// Parse the `<type> <target>` value of a `relationship` tag
fn relationship<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    separated_pair(token, space1, token).parse_next(input)
}

/// Stanza currently being read.
enum Stanza {
    /// Before the first stanza, or inside a non-term stanza.
    Skipped,
    Term { frame: TermFrame, line: usize, span: (usize, usize) },
}

/// Parses an OBO document into its term frames, in source order.
///
/// # Errors
///
/// Returns [`OboError`] for a line that is neither blank, a comment, a stanza
/// header nor a `tag: value` pair, for a malformed `is_a` or `relationship`
/// value, and for a `[Term]` stanza without an `id`.
pub fn parse_obo(source: &str) -> Result<Vec<TermFrame>, OboError> {
    let mut frames = Vec::new();
    let mut stanza = Stanza::Skipped;
    let mut offset = 0;

    for (index, raw_line) in source.split_inclusive('\n').enumerate() {
        let line_number = index + 1;
        let start = offset;
        offset += raw_line.len();
        let line = raw_line.trim();
        let indent = raw_line.len() - raw_line.trim_start().len();
        let span = start + indent..start + raw_line.trim_end().len();

        if line.is_empty() || line.starts_with('!') {
            continue;
        }

        if line.starts_with('[') {
            let mut input = line;
            let kind = stanza_header
                .parse_next(&mut input)
                .map_err(|_| OboError::new(line_number, span.clone(), "malformed stanza header"))?;

            finish_stanza(std::mem::replace(&mut stanza, Stanza::Skipped), &mut frames)?;
            if kind == "Term" {
                stanza = Stanza::Term {
                    frame: TermFrame::default(),
                    line: line_number,
                    span: (span.start, span.end),
                };
            }
            continue;
        }

        let mut input = line;
        let (tag, value) = tag_value
            .parse_next(&mut input)
            .map_err(|_| OboError::new(line_number, span.clone(), "expected `tag: value`"))?;

        let Stanza::Term { frame, .. } = &mut stanza else {
            continue;
        };

        if tag == "name" {
            frame.name = value.to_string();
            continue;
        }

        let value = strip_comment(value);
        match tag {
            "id" => frame.id = value.to_string(),
            "namespace" => frame.namespace = value.to_string(),
            "is_obsolete" => frame.obsolete = value == "true",
            "is_a" => {
                let mut input = value;
                let parent = token.parse_next(&mut input).map_err(|_| {
                    OboError::new(line_number, span.clone(), "`is_a` needs a target id")
                })?;
                frame.is_a.push(parent.to_string());
            }
            "relationship" => {
                let mut input = value;
                let (kind, target) = relationship.parse_next(&mut input).map_err(|_| {
                    OboError::new(
                        line_number,
                        span.clone(),
                        "`relationship` needs a type and a target id",
                    )
                })?;
                frame
                    .relationships
                    .push((kind.to_string(), target.to_string()));
            }
            _ => trace!(tag, line = line_number; "Skipping OBO tag"),
        }
    }

    finish_stanza(stanza, &mut frames)?;
    Ok(frames)
}

fn finish_stanza(stanza: Stanza, frames: &mut Vec<TermFrame>) -> Result<(), OboError> {
    match stanza {
        Stanza::Skipped => Ok(()),
        Stanza::Term { frame, line, span } => {
            if frame.id.is_empty() {
                return Err(OboError::new(line, span.0..span.1, "`[Term]` without an `id`"));
            }
            frames.push(frame);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
format-version: 1.2
ontology: go

[Term]
id: GO:0005829
name: cytosol
namespace: cellular_component
def: \"The part of the cytoplasm that does not contain organelles!\" [GOC:hjd]
is_a: GO:0110165 ! cellular anatomical structure
relationship: part_of GO:0005737 ! cytoplasm

[Term]
id: GO:0000001
name: old term
namespace: cellular_component
is_obsolete: true

[Typedef]
id: part_of
name: part of
";

    #[test]
    fn test_parse_terms() {
        let frames = parse_obo(SAMPLE).unwrap();
        assert_eq!(frames.len(), 2);

        let cytosol = &frames[0];
        assert_eq!(cytosol.id, "GO:0005829");
        assert_eq!(cytosol.name, "cytosol");
        assert_eq!(cytosol.namespace, "cellular_component");
        assert!(!cytosol.obsolete);
        assert_eq!(cytosol.is_a, vec!["GO:0110165"]);
        assert_eq!(
            cytosol.relationships,
            vec![("part_of".to_string(), "GO:0005737".to_string())]
        );

        assert!(frames[1].obsolete);
    }

    #[test]
    fn test_typedef_stanzas_are_skipped() {
        let frames = parse_obo("[Typedef]\nid: part_of\n").unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_qualifiers_are_dropped() {
        let source = "[Term]\nid: GO:1\nis_a: GO:2 {source=\"x\"} ! two\n";
        let frames = parse_obo(source).unwrap();
        assert_eq!(frames[0].is_a, vec!["GO:2"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "[Term]\r\nid: GO:1\r\nname: a\r\n";
        let frames = parse_obo(source).unwrap();
        assert_eq!(frames[0].id, "GO:1");
        assert_eq!(frames[0].name, "a");
    }

    #[test]
    fn test_error_for_line_without_tag() {
        let source = "[Term]\nid: GO:1\nthis is not a tag\n";
        let err = parse_obo(source).unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(&source[err.span()], "this is not a tag");
    }

    #[test]
    fn test_error_span_excludes_indentation() {
        let source = "[Term]\nid: GO:1\n    this is not a tag  \n";
        let err = parse_obo(source).unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(&source[err.span()], "this is not a tag");
    }

    #[test]
    fn test_name_keeps_exclamation_mark() {
        let source = "[Term]\nid: GO:1 ! one\nname: Wnt! signalling complex\nis_a: GO:2 ! two\n";
        let frames = parse_obo(source).unwrap();
        assert_eq!(frames[0].id, "GO:1");
        assert_eq!(frames[0].name, "Wnt! signalling complex");
        assert_eq!(frames[0].is_a, vec!["GO:2"]);
    }

    #[test]
    fn test_error_for_relationship_without_target() {
        let source = "[Term]\nid: GO:1\nrelationship: part_of\n";
        let err = parse_obo(source).unwrap_err();
        assert_eq!(err.line(), 3);
        assert!(err.message().contains("relationship"));
    }

    #[test]
    fn test_error_for_term_without_id() {
        let source = "[Term]\nname: nameless\n\n[Term]\nid: GO:2\n";
        let err = parse_obo(source).unwrap_err();
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn test_error_for_unterminated_header() {
        let err = parse_obo("[Term\nid: GO:1\n").unwrap_err();
        assert_eq!(err.line(), 1);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Any document built from well-formed stanzas parses back to the same ids.
    fn check_generated_terms_roundtrip(ids: Vec<u32>) -> Result<(), TestCaseError> {
        let source: String = ids
            .iter()
            .map(|id| format!("[Term]\nid: GO:{id:07}\nname: term {id}\nis_a: GO:0000000\n\n"))
            .collect();
        let frames = parse_obo(&source).map_err(|err| TestCaseError::fail(err.to_string()))?;

        prop_assert_eq!(frames.len(), ids.len());
        for (frame, id) in frames.iter().zip(&ids) {
            prop_assert_eq!(&frame.id, &format!("GO:{id:07}"));
            prop_assert_eq!(&frame.is_a, &vec!["GO:0000000".to_string()]);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn generated_terms_roundtrip(ids in proptest::collection::vec(0u32..9_999_999, 0..20)) {
            check_generated_terms_roundtrip(ids)?;
        }
    }
}
