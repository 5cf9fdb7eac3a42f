//! Root server identifiers and the `letters` selection expression.
//!
//! RSSAC002 reports are published by thirteen operators, each named by a
//! single letter `a` through `m`. API clients select a subset of them with a
//! compact expression: single letters, comma lists, and ascending ranges,
//! e.g. `a`, `a,c,m`, or `b-f,j`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Longest accepted `letters` expression, in bytes, checked before any
/// normalization. Generous: the full alphabet as a comma list is 25.
const MAX_EXPRESSION_LEN: usize = 50;

/// One of the thirteen root server identifiers.
///
/// The alphabet is closed and ordered; `Ord` follows letter order so sets of
/// identifiers iterate `a` first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Rsi {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
}

impl Rsi {
    /// Every identifier, in letter order.
    pub const ALL: [Rsi; 13] = [
        Rsi::A,
        Rsi::B,
        Rsi::C,
        Rsi::D,
        Rsi::E,
        Rsi::F,
        Rsi::G,
        Rsi::H,
        Rsi::I,
        Rsi::J,
        Rsi::K,
        Rsi::L,
        Rsi::M,
    ];

    /// Map a lowercase letter to its identifier, or `None` for anything
    /// outside the alphabet.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(Rsi::A),
            'b' => Some(Rsi::B),
            'c' => Some(Rsi::C),
            'd' => Some(Rsi::D),
            'e' => Some(Rsi::E),
            'f' => Some(Rsi::F),
            'g' => Some(Rsi::G),
            'h' => Some(Rsi::H),
            'i' => Some(Rsi::I),
            'j' => Some(Rsi::J),
            'k' => Some(Rsi::K),
            'l' => Some(Rsi::L),
            'm' => Some(Rsi::M),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Rsi::A => 'a',
            Rsi::B => 'b',
            Rsi::C => 'c',
            Rsi::D => 'd',
            Rsi::E => 'e',
            Rsi::F => 'f',
            Rsi::G => 'g',
            Rsi::H => 'h',
            Rsi::I => 'i',
            Rsi::J => 'j',
            Rsi::K => 'k',
            Rsi::L => 'l',
            Rsi::M => 'm',
        }
    }
}

impl fmt::Display for Rsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse a `letters` selection expression into a sorted, deduplicated set of
/// identifiers.
///
/// The expression is a comma-separated list of tokens. A token is either a
/// single letter (`c`) or an ascending range (`c-g`). Surrounding whitespace
/// is trimmed and uppercase input is accepted; empty tokens from repeated
/// commas are ignored.
///
/// A range contributes only the letters strictly between its bounds: `a-d`
/// selects `b` and `c`. The bounds themselves are selected only where they
/// also appear as standalone tokens, so `a-d,a,d` selects `a` through `d`.
///
/// # Errors
///
/// Returns [`Error::InvalidLetters`] when the expression is empty or longer
/// than 50 bytes, contains a character outside the alphabet and `,`/`-`,
/// starts or ends with a separator, contains a malformed token, or names a
/// range whose end does not compare strictly greater than its start.
pub fn parse_rsi_expression(expression: &str) -> Result<BTreeSet<Rsi>, Error> {
    if expression.is_empty() || expression.len() > MAX_EXPRESSION_LEN {
        return Err(Error::InvalidLetters);
    }
    let expression = expression.trim().to_lowercase();
    if expression.is_empty() {
        return Err(Error::InvalidLetters);
    }
    if expression
        .chars()
        .any(|c| Rsi::from_char(c).is_none() && c != ',' && c != '-')
    {
        return Err(Error::InvalidLetters);
    }
    if expression.starts_with(&[',', '-'][..]) || expression.ends_with(&[',', '-'][..]) {
        return Err(Error::InvalidLetters);
    }

    let mut rsis = BTreeSet::new();
    for token in expression.split(',') {
        let token: Vec<char> = token.chars().collect();
        match *token.as_slice() {
            // Repeated separators are tolerated; an empty token selects
            // nothing.
            [] => {}
            [letter] => {
                rsis.insert(Rsi::from_char(letter).ok_or(Error::InvalidLetters)?);
            }
            [start, '-', end] => {
                let start = Rsi::from_char(start).ok_or(Error::InvalidLetters)?;
                let end = Rsi::from_char(end).ok_or(Error::InvalidLetters)?;
                if end <= start {
                    return Err(Error::InvalidLetters);
                }
                // TODO(XXX): decide whether ranges should select their own
                // bounds; today `a-d` selects only b and c, and the bounds
                // must be listed standalone to be included.
                rsis.extend(Rsi::ALL.iter().copied().filter(|r| *r > start && *r < end));
            }
            _ => return Err(Error::InvalidLetters),
        }
    }
    Ok(rsis)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(letters: &[Rsi]) -> BTreeSet<Rsi> {
        letters.iter().copied().collect()
    }

    #[test]
    fn single_letter() {
        assert_eq!(parse_rsi_expression("a").unwrap(), set(&[Rsi::A]));
    }

    #[test]
    fn comma_list() {
        assert_eq!(parse_rsi_expression("a,c").unwrap(), set(&[Rsi::A, Rsi::C]));
    }

    #[test]
    fn range_selects_interior_only() {
        assert_eq!(parse_rsi_expression("a-d").unwrap(), set(&[Rsi::B, Rsi::C]));
    }

    #[test]
    fn range_bounds_selected_when_listed_standalone() {
        assert_eq!(
            parse_rsi_expression("a-d,a,d").unwrap(),
            set(&[Rsi::A, Rsi::B, Rsi::C, Rsi::D])
        );
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(
            parse_rsi_expression(" B-F ").unwrap(),
            set(&[Rsi::C, Rsi::D, Rsi::E])
        );
    }

    #[test]
    fn repeated_commas_are_separators() {
        assert_eq!(
            parse_rsi_expression("a,,m").unwrap(),
            set(&[Rsi::A, Rsi::M])
        );
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(
            parse_rsi_expression("a,a,b-d,c").unwrap(),
            set(&[Rsi::A, Rsi::C])
        );
    }

    #[test]
    fn rejects_empty_and_boundary_separators() {
        for expression in ["", " ", ",a", "a,", "-a", "a-", "a,-"] {
            assert!(parse_rsi_expression(expression).is_err(), "{expression:?}");
        }
    }

    #[test]
    fn rejects_descending_and_equal_ranges() {
        assert!(parse_rsi_expression("d-a").is_err());
        assert!(parse_rsi_expression("a-a").is_err());
    }

    #[test]
    fn rejects_foreign_characters() {
        for expression in ["n", "a,z", "a b", "a;b", "a,1"] {
            assert!(parse_rsi_expression(expression).is_err(), "{expression:?}");
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        for expression in ["ab", "a-b-c", "a,-b", "a--b", "a,-,b"] {
            assert!(parse_rsi_expression(expression).is_err(), "{expression:?}");
        }
    }

    #[test]
    fn length_cap_is_fifty_bytes_before_trimming() {
        let ok = format!(" {}a", "a,".repeat(24));
        assert_eq!(ok.len(), 50);
        assert_eq!(parse_rsi_expression(&ok).unwrap(), set(&[Rsi::A]));

        let too_long = format!("{}a", "a,".repeat(25));
        assert_eq!(too_long.len(), 51);
        assert!(parse_rsi_expression(&too_long).is_err());
    }

    #[test]
    fn reparsing_canonical_form_is_idempotent() {
        let first = parse_rsi_expression("b-f,a,m,b").unwrap();
        let canonical: String = first
            .iter()
            .map(|rsi| rsi.as_char().to_string())
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(parse_rsi_expression(&canonical).unwrap(), first);
    }

    #[test]
    fn result_is_sorted_subset_of_alphabet() {
        let parsed = parse_rsi_expression("m,a,k-m,c").unwrap();
        let letters: Vec<char> = parsed.iter().map(|rsi| rsi.as_char()).collect();
        assert_eq!(letters, vec!['a', 'c', 'l', 'm']);
    }

    #[test]
    fn adjacent_range_has_empty_interior() {
        assert_eq!(parse_rsi_expression("a-b,m").unwrap(), set(&[Rsi::M]));
    }
}
