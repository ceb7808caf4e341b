//! Parsing of printf-style format literals into conversion specifications.

use thiserror::Error;

/// Conversion flag characters, in the order the reference grammar lists them.
const FORMAT_FLAGS: &[u8] = b"#0- +";
/// Length modifiers. Accepted and ignored, as Python itself does.
const FORMAT_LENGTH: &[u8] = b"hlL";

/// The value kind a conversion directive expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Int,
    Float,
    Str,
}

impl ExpectedKind {
    /// Classify a conversion character. Unknown characters have no kind.
    fn from_conversion(ch: u8) -> Option<ExpectedKind> {
        match ch {
            b'd' | b'i' | b'o' | b'u' | b'x' | b'X' => Some(ExpectedKind::Int),
            b'e' | b'E' | b'f' | b'F' | b'g' | b'G' => Some(ExpectedKind::Float),
            b'c' | b'r' | b's' => Some(ExpectedKind::Str),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExpectedKind::Int => "int",
            ExpectedKind::Float => "float",
            ExpectedKind::Str => "str",
        }
    }
}

/// Slot key → expected kind, in first-occurrence order. Slot keys are the
/// 1-based positional index rendered as text, or the mapping key text.
/// Re-declaring a key overwrites its kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSpec {
    slots: Vec<(String, ExpectedKind)>,
}

impl FormatSpec {
    fn insert(&mut self, key: String, kind: ExpectedKind) {
        match self.slots.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = kind,
            None => self.slots.push((key, kind)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<ExpectedKind> {
        self.slots
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, kind)| *kind)
    }

    /// Expected kind of the 1-based positional slot.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<ExpectedKind> {
        self.get(&index.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ExpectedKind)> {
        self.slots.iter().map(|(k, kind)| (k.as_str(), *kind))
    }
}

/// A defect found while parsing the literal itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatIssue {
    #[error("Too few mapping keys")]
    TooFewMappingKeys,
    #[error("There are no format specifier character")]
    NoSpecifierCharacter,
    #[error("Can't use '*' in formats when using a mapping")]
    StarWithMapping,
}

/// Everything the matcher needs from one literal, produced in a single pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFormat {
    pub spec: FormatSpec,
    /// One argument per conversion section, plus one per `*` width/precision.
    pub expected_arguments: usize,
    /// Declared mapping keys in first-occurrence order; empty in positional
    /// mode.
    pub mapping_keys: Vec<String>,
    pub issues: Vec<FormatIssue>,
}

impl ParsedFormat {
    /// True when the literal addresses arguments by name rather than
    /// position.
    #[must_use]
    pub fn uses_mapping(&self) -> bool {
        !self.mapping_keys.is_empty()
    }
}

/// Parse the cooked value of a format literal.
///
/// `%%` escapes denote a literal percent and are removed before splitting on
/// `%`. Trailing empty sections are dropped, matching the split semantics the
/// reference implementation relied on (`"x%"` contributes no section).
#[must_use]
pub fn parse_format_literal(text: &str) -> ParsedFormat {
    let cleaned = text.replace("%%", "");

    let mut fragments: Vec<&str> = cleaned.split('%').collect();
    while fragments.len() > 1 && fragments.last().is_some_and(|s| s.is_empty()) {
        fragments.pop();
    }
    // The leading fragment precedes the first `%` and is not a section.
    let sections = &fragments[1..];

    let mut out = ParsedFormat {
        expected_arguments: sections.len(),
        ..ParsedFormat::default()
    };

    // Mapping mode iff the first conversion section opens a mapping key.
    let mapping = sections.first().is_some_and(|s| s.starts_with('('));

    for (index, section) in sections.iter().copied().enumerate() {
        let bytes = section.as_bytes();
        let len = bytes.len();
        let mut cursor = 0usize;

        // Mapping key.
        let slot_key = if mapping {
            match section.find(')') {
                Some(close) if bytes.first() == Some(&b'(') => {
                    let key = section[1..close].to_string();
                    if !out.mapping_keys.contains(&key) {
                        out.mapping_keys.push(key.clone());
                    }
                    cursor = close + 1;
                    key
                }
                _ => {
                    out.issues.push(FormatIssue::TooFewMappingKeys);
                    break;
                }
            }
        } else {
            (index + 1).to_string()
        };

        // Conversion flags.
        while cursor < len && FORMAT_FLAGS.contains(&bytes[cursor]) {
            cursor += 1;
        }

        // Minimum field width.
        cursor = scan_width(bytes, cursor, &mut out);

        // Precision.
        if cursor < len && bytes[cursor] == b'.' {
            cursor += 1;
            cursor = scan_width(bytes, cursor, &mut out);
        }

        // Length modifier.
        if cursor < len && FORMAT_LENGTH.contains(&bytes[cursor]) {
            cursor += 1;
        }

        // Conversion character.
        if cursor < len {
            if let Some(kind) = ExpectedKind::from_conversion(bytes[cursor]) {
                out.spec.insert(slot_key, kind);
                continue;
            }
        }
        out.issues.push(FormatIssue::NoSpecifierCharacter);
    }

    out
}

/// Consume a width or precision: either a digit run or a `*` wildcard, which
/// takes its value from one extra argument and is incompatible with mapping
/// keys.
fn scan_width(bytes: &[u8], mut cursor: usize, out: &mut ParsedFormat) -> usize {
    if cursor >= bytes.len() {
        return cursor;
    }
    if bytes[cursor] == b'*' {
        out.expected_arguments += 1;
        cursor += 1;
        if !out.mapping_keys.is_empty() {
            out.issues.push(FormatIssue::StarWithMapping);
        }
    } else {
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_without_conversions_is_empty_positional() {
        let parsed = parse_format_literal("hello");
        assert_eq!(parsed.expected_arguments, 0);
        assert!(parsed.spec.is_empty());
        assert!(!parsed.uses_mapping());
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn escaped_percents_are_not_conversions() {
        let parsed = parse_format_literal("100%% sure");
        assert_eq!(parsed.expected_arguments, 0);
        assert!(parsed.issues.is_empty());

        // "%%d" cooks down to a literal "%d".
        let parsed = parse_format_literal("%%d");
        assert_eq!(parsed.expected_arguments, 0);
        assert!(parsed.spec.is_empty());
    }

    #[test]
    fn positional_slots_are_indexed_from_one() {
        let parsed = parse_format_literal("%d and %s");
        assert_eq!(parsed.expected_arguments, 2);
        assert_eq!(parsed.spec.get("1"), Some(ExpectedKind::Int));
        assert_eq!(parsed.spec.get("2"), Some(ExpectedKind::Str));
        assert!(!parsed.uses_mapping());

        let slots: Vec<_> = parsed.spec.iter().collect();
        assert_eq!(
            slots,
            vec![("1", ExpectedKind::Int), ("2", ExpectedKind::Str)]
        );
    }

    #[test]
    fn full_directive_grammar_is_consumed() {
        // flags, width, precision, length modifier, conversion.
        let parsed = parse_format_literal("%#0- +12.34Lf");
        assert!(parsed.issues.is_empty());
        assert_eq!(parsed.expected_arguments, 1);
        assert_eq!(parsed.spec.get("1"), Some(ExpectedKind::Float));
        assert_eq!(parsed.spec.get("1").unwrap().as_str(), "float");
    }

    #[test]
    fn mapping_keys_are_recorded_in_order() {
        let parsed = parse_format_literal("%(second)s %(first)d");
        assert!(parsed.uses_mapping());
        assert_eq!(parsed.mapping_keys, vec!["second", "first"]);
        assert_eq!(parsed.spec.get("second"), Some(ExpectedKind::Str));
        assert_eq!(parsed.spec.get("first"), Some(ExpectedKind::Int));
    }

    #[test]
    fn unterminated_mapping_key_aborts_the_parse() {
        let parsed = parse_format_literal("%(broken");
        assert_eq!(parsed.issues, vec![FormatIssue::TooFewMappingKeys]);
    }

    #[test]
    fn positional_section_in_mapping_mode_aborts() {
        let parsed = parse_format_literal("%(a)s %d");
        assert_eq!(parsed.issues, vec![FormatIssue::TooFewMappingKeys]);
    }

    #[test]
    fn missing_specifier_is_reported_per_section() {
        let parsed = parse_format_literal("%z");
        assert_eq!(parsed.issues, vec![FormatIssue::NoSpecifierCharacter]);

        // Not fatal to the literal: sibling sections still contribute.
        let parsed = parse_format_literal("%z %d");
        assert_eq!(parsed.issues, vec![FormatIssue::NoSpecifierCharacter]);
        assert_eq!(parsed.expected_arguments, 2);
        assert_eq!(parsed.spec.get("2"), Some(ExpectedKind::Int));
    }

    #[test]
    fn wildcard_width_consumes_an_extra_argument() {
        let parsed = parse_format_literal("%*d");
        assert!(parsed.issues.is_empty());
        assert_eq!(parsed.expected_arguments, 2);

        let parsed = parse_format_literal("%*.*f");
        assert_eq!(parsed.expected_arguments, 3);
    }

    #[test]
    fn wildcard_width_rejected_in_mapping_mode() {
        let parsed = parse_format_literal("%(x)*d");
        assert_eq!(parsed.issues, vec![FormatIssue::StarWithMapping]);
    }

    #[test]
    fn trailing_percent_contributes_no_section() {
        let parsed = parse_format_literal("x%");
        assert_eq!(parsed.expected_arguments, 0);
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn redeclared_slot_overwrites_its_kind() {
        let parsed = parse_format_literal("%(k)d %(k)s");
        assert_eq!(parsed.mapping_keys, vec!["k"]);
        assert_eq!(parsed.spec.get("k"), Some(ExpectedKind::Str));
        assert_eq!(parsed.spec.len(), 1);
    }

    #[test]
    fn truncated_directive_has_no_specifier() {
        assert_eq!(
            parse_format_literal("%5.").issues,
            vec![FormatIssue::NoSpecifierCharacter]
        );
        assert_eq!(
            parse_format_literal("% ").issues,
            vec![FormatIssue::NoSpecifierCharacter]
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parsing_is_pure(text in ".{0,64}") {
                let first = parse_format_literal(&text);
                let second = parse_format_literal(&text);
                prop_assert_eq!(first, second);
            }

            #[test]
            fn percent_free_literals_expect_nothing(text in "[^%]{0,64}") {
                let parsed = parse_format_literal(&text);
                prop_assert_eq!(parsed.expected_arguments, 0);
                prop_assert!(parsed.spec.is_empty());
                prop_assert!(parsed.issues.is_empty());
            }
        }
    }
}
