//! Value parsing for TCSS properties.
//!
//! Layout keywords (`display`, `layout`, `overflow-*`) are parsed into
//! typed values. Every other property keeps its raw text as an opaque
//! token: colors, `$variables`, `text-align`, `border` and so on are the
//! renderer's business.

use crate::types::{Display, Layout, Overflow};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    combinator::{map, recognize, verify},
    sequence::pair,
};

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers may not start with a digit, so `-lg` and `_x` are identifiers
/// while `4col` is not.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    verify(
        recognize(pair(
            take_while1(|c: char| c.is_ascii_alphabetic() || c == '-' || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
        )),
        |s: &str| s != "-",
    )(input)
}

pub fn parse_display(input: &str) -> IResult<&str, Display> {
    alt((
        map(tag("block"), |_| Display::Block),
        map(tag("none"), |_| Display::None),
    ))(input)
}

pub fn parse_layout(input: &str) -> IResult<&str, Layout> {
    alt((
        map(tag("vertical"), |_| Layout::Vertical),
        map(tag("horizontal"), |_| Layout::Horizontal),
    ))(input)
}

pub fn parse_overflow(input: &str) -> IResult<&str, Overflow> {
    alt((
        map(tag("hidden"), |_| Overflow::Hidden),
        map(tag("auto"), |_| Overflow::Auto),
        map(tag("scroll"), |_| Overflow::Scroll),
    ))(input)
}

/// Consumes an opaque value up to (not including) `;`, `}` or `!important`.
///
/// The returned token is trimmed; an empty value is an error.
pub fn parse_token(input: &str) -> IResult<&str, String> {
    let end = input
        .char_indices()
        .find(|&(i, c)| c == ';' || c == '}' || input[i..].starts_with("!important"))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    let token = input[..end].trim();
    if token.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeUntil,
        )));
    }
    Ok((&input[end..], token.to_string()))
}
