//! Brace tokenizer
//!
//! Splits a value into literal runs and `{ NAME }` references. A segment opens
//! on a `{` not preceded by `{` and closes after a `}` not followed by `}`, so
//! every raw segment has the shape `{`* text `}`* with brace-free text. Brace
//! parity then decides what the segment is:
//!
//! | `{` count | `}` count | meaning                          |
//! |-----------|-----------|----------------------------------|
//! | even      | even      | literal (doubled braces escape)  |
//! | odd       | odd       | reference, one brace pair eaten  |
//! | otherwise |           | unbalanced, rejected             |

use crate::domain::{Reference, Segment};
use crate::error::BraceErrorKind;

/// Tokenize `value`, which belongs to the entry named `key`.
///
/// A reference to `key` itself is rejected here; longer cycles are left to
/// the resolver's pass ceiling.
pub fn tokenize<'a>(key: &str, value: &'a str) -> Result<Vec<Segment<'a>>, BraceErrorKind> {
    let parts = split_raw(value);
    let last = parts.len().saturating_sub(1);
    let mut segments = Vec::with_capacity(parts.len());

    for (i, &(offset, part)) in parts.iter().enumerate() {
        let opening = part.matches('{').count();
        let closing = part.matches('}').count();
        let even_opening = opening % 2 == 0;
        let even_closing = closing % 2 == 0;

        match (even_opening, even_closing) {
            (true, true) => segments.push(Segment::Literal(part)),
            (false, true) => {
                return Err(if opening > closing {
                    if i == last && part == "{" {
                        BraceErrorKind::ExcessOpeningAtEnd
                    } else {
                        BraceErrorKind::MissingClosing
                    }
                } else {
                    BraceErrorKind::ExcessClosing
                });
            }
            (true, false) => {
                return Err(if opening > closing {
                    BraceErrorKind::ExcessOpening
                } else if i == 0 && part == "}" {
                    BraceErrorKind::ExcessClosingAtStart
                } else {
                    BraceErrorKind::MissingOpening
                });
            }
            (false, false) => {
                let start = opening;
                let end = part.len() - closing;
                let name = part[start..end].trim();
                if name.is_empty() {
                    return Err(BraceErrorKind::EmptyName);
                }
                if name == key {
                    return Err(BraceErrorKind::SelfReference(key.to_string()));
                }
                segments.push(Segment::Reference(Reference {
                    name,
                    span: offset + start..offset + end,
                    leading: &part[..start - 1],
                    trailing: &part[end + 1..],
                }));
            }
        }
    }

    Ok(segments)
}

/// Cut `value` into raw segments, each paired with its byte offset.
fn split_raw(value: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut previous: Option<char> = None;

    for (idx, current) in value.char_indices() {
        let opens = previous != Some('{') && current == '{';
        let closes = previous == Some('}') && current != '}';
        if (opens || closes) && idx > start {
            parts.push((start, &value[start..idx]));
            start = idx;
        }
        previous = Some(current);
    }

    if start < value.len() {
        parts.push((start, &value[start..]));
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Reference(r) => Some(r.name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_literal() {
        let segments = tokenize("K", "hello world").expect("tokenize");
        assert_eq!(segments, vec![Segment::Literal("hello world")]);
    }

    #[test]
    fn empty_value_has_no_segments() {
        assert!(tokenize("K", "").expect("tokenize").is_empty());
    }

    #[test]
    fn finds_reference_with_surrounding_text() {
        let segments = tokenize("B", "pre{ A }post").expect("tokenize");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Literal("pre"));
        let Segment::Reference(reference) = &segments[1] else {
            panic!("expected reference, got {:?}", segments[1]);
        };
        assert_eq!(reference.name, "A");
        assert_eq!(reference.span, 4..7);
        assert_eq!(&"pre{ A }post"[reference.span.clone()], " A ");
        assert_eq!(reference.leading, "");
        assert_eq!(reference.trailing, "");
        assert_eq!(segments[2], Segment::Literal("post"));
    }

    #[test]
    fn finds_multiple_references() {
        let segments = tokenize("X", "{A}:{ B }/{C}").expect("tokenize");
        assert_eq!(references(&segments), vec!["A", "B", "C"]);
    }

    #[test]
    fn adjacent_references_split() {
        let segments = tokenize("X", "{A}{B}").expect("tokenize");
        assert_eq!(references(&segments), vec!["A", "B"]);
    }

    #[test]
    fn doubled_braces_are_literal() {
        let segments = tokenize("X", "{{literal}}").expect("tokenize");
        assert_eq!(segments, vec![Segment::Literal("{{literal}}")]);
        let segments = tokenize("X", "a {{ b").expect("tokenize");
        assert!(references(&segments).is_empty());
    }

    #[test]
    fn triple_braces_keep_escaped_pair_around_reference() {
        let segments = tokenize("X", "{{{ A }}}").expect("tokenize");
        let Segment::Reference(reference) = &segments[0] else {
            panic!("expected reference");
        };
        assert_eq!(reference.name, "A");
        assert_eq!(reference.leading, "{{");
        assert_eq!(reference.trailing, "}}");
    }

    #[test]
    fn offsets_account_for_multibyte_text() {
        let value = "héllo { A }";
        let segments = tokenize("X", value).expect("tokenize");
        let Segment::Reference(reference) = &segments[1] else {
            panic!("expected reference");
        };
        assert_eq!(value[reference.span.clone()].trim(), "A");
    }

    #[test]
    fn lone_trailing_opening_brace() {
        assert_eq!(tokenize("X", "abc{"), Err(BraceErrorKind::ExcessOpeningAtEnd));
    }

    #[test]
    fn unterminated_reference() {
        assert_eq!(tokenize("X", "{abc"), Err(BraceErrorKind::MissingClosing));
        assert_eq!(tokenize("X", "a{b c"), Err(BraceErrorKind::MissingClosing));
    }

    #[test]
    fn extra_closing_after_reference() {
        assert_eq!(tokenize("X", "{abc}}"), Err(BraceErrorKind::ExcessClosing));
    }

    #[test]
    fn extra_opening_before_close() {
        assert_eq!(tokenize("X", "{{abc}"), Err(BraceErrorKind::ExcessOpening));
    }

    #[test]
    fn lone_leading_closing_brace() {
        assert_eq!(tokenize("X", "}abc"), Err(BraceErrorKind::ExcessClosingAtStart));
    }

    #[test]
    fn closing_without_opening() {
        assert_eq!(tokenize("X", "abc}"), Err(BraceErrorKind::MissingOpening));
    }

    #[test]
    fn empty_reference_name() {
        assert_eq!(tokenize("X", "{   }"), Err(BraceErrorKind::EmptyName));
        assert_eq!(tokenize("X", "a{}b"), Err(BraceErrorKind::EmptyName));
    }

    #[test]
    fn direct_self_reference() {
        assert_eq!(
            tokenize("HOME_DIR", "{ HOME_DIR }/bin"),
            Err(BraceErrorKind::SelfReference("HOME_DIR".into()))
        );
    }
}
