//! Line parser: raw lines to entries

use crate::domain::Entry;
use crate::error::{Error, Result, SyntaxErrorKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

const EXPORT: &str = "export";
const OVERLOAD: &str = "overload";

/// Read every line of `reader` and turn it into an ordered entry list.
///
/// Values are stored verbatim; references and escapes are left for the
/// resolver. The first malformed line aborts the parse.
pub fn parse_lines<R: BufRead>(reader: R, file: &str) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let raw = line.map_err(|e| Error::io(file, e))?;
        let current = raw.trim();

        if current.is_empty() || current.starts_with('#') {
            continue;
        }

        let Some((key_spec, value)) = current.split_once('=') else {
            return Err(Error::syntax(file, line_no, SyntaxErrorKind::MissingSeparator));
        };

        let mut entry = Entry::new(line_no, "", value.trim());
        let mut key = key_spec.trim();

        if let Some(rest) = strip_directive(key, EXPORT) {
            entry.export = true;
            key = rest;
        }
        if let Some(rest) = strip_directive(key, OVERLOAD) {
            entry.overload = true;
            key = rest;
        }

        if key.is_empty() {
            return Err(Error::syntax(file, line_no, SyntaxErrorKind::EmptyKey));
        }
        if !KEY_PATTERN.is_match(key) {
            return Err(Error::syntax(file, line_no, SyntaxErrorKind::InvalidKey(key.to_string())));
        }
        if entries.iter().any(|existing| existing.key == key) {
            return Err(Error::syntax(
                file,
                line_no,
                SyntaxErrorKind::DuplicateKey(key.to_string()),
            ));
        }

        entry.key = key.to_string();
        entries.push(entry);
    }

    Ok(entries)
}

/// Strip a case-insensitive directive word from the front of a key spec.
///
/// The directive must be followed by whitespace or end the key spec, so keys
/// such as `EXPORTER` or `OVERLOAD_LIMIT` are left alone.
fn strip_directive<'a>(key: &'a str, directive: &str) -> Option<&'a str> {
    let head = key.get(..directive.len())?;
    if !head.eq_ignore_ascii_case(directive) {
        return None;
    }
    let rest = &key[directive.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(ch) if ch.is_whitespace() => Some(rest.trim_start()),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(source: &str) -> Result<Vec<Entry>> {
        parse_lines(source.as_bytes(), "test.envfile")
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let entries = parse("\n   \n# comment\n   # indented comment\n").expect("parse");
        assert!(entries.is_empty());
    }

    #[test]
    fn splits_on_first_equals_and_trims() {
        let entries = parse("  URL =  http://host/?a=b  \n").expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "URL");
        assert_eq!(entries[0].value, "http://host/?a=b");
        assert_eq!(entries[0].line, 1);
        assert!(!entries[0].export);
        assert!(!entries[0].overload);
    }

    #[test]
    fn records_source_line_numbers() {
        let entries = parse("# header\n\nA = 1\n\nB = 2\n").expect("parse");
        let lines: Vec<usize> = entries.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn directives_are_case_insensitive_and_combine() {
        let entries =
            parse("export A = 1\nOVERLOAD B = 2\nExport Overload C = 3\n").expect("parse");
        assert!(entries[0].export && !entries[0].overload);
        assert!(!entries[1].export && entries[1].overload);
        assert!(entries[2].export && entries[2].overload);
        assert_eq!(entries[2].key, "C");
    }

    #[test]
    fn directive_words_inside_keys_are_not_directives() {
        let entries = parse("EXPORTER = 1\noverload_limit = 2\n").expect("parse");
        assert_eq!(entries[0].key, "EXPORTER");
        assert!(!entries[0].export);
        assert_eq!(entries[1].key, "overload_limit");
        assert!(!entries[1].overload);
    }

    #[test]
    fn export_prefix_without_space_is_part_of_key() {
        let entries = parse("exportFOO = 1\nOverloadBAR = 2\n").expect("parse");
        assert_eq!(entries[0].key, "exportFOO");
        assert!(!entries[0].export);
        assert_eq!(entries[1].key, "OverloadBAR");
        assert!(!entries[1].overload);
    }

    #[test]
    fn missing_separator_is_syntax_error() {
        let err = parse("A = 1\nJUST_A_KEY\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("can't split line"));
    }

    #[test]
    fn empty_key_is_rejected() {
        for source in ["= value", "export = value", "export overload = value"] {
            let err = parse(source).unwrap_err();
            assert!(err.to_string().contains("key name is empty"), "{source}: {err}");
        }
    }

    #[test]
    fn invalid_key_is_rejected() {
        let err = parse("MY-KEY = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.to_string().contains("invalid key name 'MY-KEY'"));
    }

    #[test]
    fn duplicate_key_is_rejected_regardless_of_directives() {
        let err = parse("A = 1\nexport overload A = {{x}}\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("duplicate key 'A'"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let entries = parse("EMPTY =\n").expect("parse");
        assert_eq!(entries[0].value, "");
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let entries = parse("A = 1\r\nB = 2\r\n").expect("parse");
        assert_eq!(entries[1].value, "2");
    }

    #[test]
    fn invalid_utf8_line_is_io_error() {
        let err = parse_lines(&b"A = 1\nB = \xff\n"[..], "test.envfile").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.file(), "test.envfile");
    }
}
