//! Utility functions for quoting Newick names.
//!
//! Names are taken verbatim by the parser, so escaping only has to protect
//! characters that the automaton treats structurally.

use std::borrow::Cow;

/// Characters that end or restructure an unquoted name.
const SPECIAL_CHARACTERS: &[char] = &['(', ')', ',', ':', ';', '{', '}', '\'', '"'];

/// Whether `b` opens a quoted name.
#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Checks if a name can be written without quotes:
/// no whitespace and no [structural characters](SPECIAL_CHARACTERS).
///
/// # Examples
/// ```
/// # use multihit::parser::utils::is_plain;
/// assert!(is_plain("Pukeko"));
/// assert!(is_plain("Australasian_Swamphen"));
/// assert!(!is_plain("Australasian Swamphen"));
/// assert!(!is_plain("Baillon's_Crake"));
/// assert!(!is_plain("Node{1}"));
/// ```
pub fn is_plain(name: &str) -> bool {
    !name
        .chars()
        .any(|c| c.is_whitespace() || SPECIAL_CHARACTERS.contains(&c))
}

/// Quotes a name for writing, if necessary.
///
/// Names with whitespace or structural characters are wrapped in single
/// quotes, doubling internal single quotes. Plain names are borrowed as-is.
///
/// # Examples
/// ```
/// # use multihit::parser::utils::quote_name;
/// assert_eq!(quote_name("Pukeko"), "Pukeko");
/// assert_eq!(quote_name("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(quote_name("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(quote_name("Pu(ke)ko"), "'Pu(ke)ko'");
/// ```
pub fn quote_name(name: &str) -> Cow<'_, str> {
    if is_plain(name) {
        return Cow::Borrowed(name);
    }
    Cow::Owned(format!("'{}'", name.replace('\'', "''")))
}
