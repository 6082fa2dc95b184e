//! Byte classes recognised by the scanner. Pure, total predicates.

use crate::config::DELIMITERS;

/// ASCII `a`-`z` or `A`-`Z`.
#[inline]
pub fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII `0`-`9`.
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// One of `' '`, `'-'`, `':'`.
#[inline]
pub fn is_delimiter(c: u8) -> bool {
    DELIMITERS.contains(&c)
}

/// Anything the scanner is willing to look at.
#[inline]
pub fn is_valid(c: u8) -> bool {
    is_letter(c) || is_digit(c) || is_delimiter(c)
}
