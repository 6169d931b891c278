//! TCSS parsing and stylesheet data structures.
//!
//! This module turns TCSS source text into [`StyleRule`]s:
//!
//! - [`parse_stylesheet`]: Main entry point for parsing TCSS source
//! - [`StyleSheet`]: Rules in source order
//! - [`StyleRule`]: One complex selector with its declarations
//! - [`Declaration`]: A property-value pair like `width: 2fr`
//! - Selector types: [`Selector`], [`CompoundSelector`], [`ComplexSelector`]
//!
//! ## Submodules
//!
//! - [`selectors`]: Selector parsing (type, class, ID, combinators)
//! - [`stylesheet`]: Core data structures for rules and declarations
//! - [`units`]: Numeric value and unit parsing
//! - [`values`]: Keyword and opaque token parsing
//!
//! ## Example
//!
//! ```rust
//! use tcss::parser::{parse_stylesheet, Selector};
//!
//! let stylesheet = parse_stylesheet(".metrics { width: 2fr; }").unwrap();
//! let rule = &stylesheet.rules[0];
//!
//! assert_eq!(
//!     rule.selector.parts[0].compound.selectors[0],
//!     Selector::Class("metrics".to_string())
//! );
//! ```

pub mod selectors;
pub mod stylesheet;
pub mod units;
pub mod values;

pub use crate::parser::selectors::{parse_selector, parse_selector_list};
pub use crate::parser::stylesheet::{
    Combinator, ComplexSelector, CompoundSelector, Declaration, Property, Selector,
    SelectorPart, Specificity, StyleRule, StyleSheet, Value,
};

use crate::TcssError;
use crate::parser::values::parse_ident;

use nom::{
    IResult,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::{map, opt},
    sequence::{delimited, preceded, tuple},
};

/// Parses a full TCSS stylesheet.
///
/// A rule with a selector list (`Header, Footer { ... }`) becomes one
/// [`StyleRule`] per selector, in list order.
pub fn parse_stylesheet(source: &str) -> Result<StyleSheet, TcssError> {
    let source = strip_comments(source);
    let mut input = source.as_str();
    let mut rules = Vec::new();

    loop {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }

        let (rest, (selector_text, body)) = parse_rule_block(input).map_err(|_| {
            TcssError::InvalidSyntax(format!("Unexpected tokens in stylesheet: {}", snippet(input)))
        })?;

        let declarations = parse_declaration_block(body)?;
        for selector in parse_selector_list(selector_text)? {
            rules.push(StyleRule::new(selector, declarations.clone()));
        }
        input = rest;
    }

    log::debug!("parsed stylesheet: {} rules", rules.len());
    Ok(StyleSheet { rules })
}

/// Splits one `selector { body }` block.
fn parse_rule_block(input: &str) -> IResult<&str, (&str, &str)> {
    tuple((
        take_until("{"),
        delimited(char('{'), take_until("}"), char('}')),
    ))(input)
}

/// Parses the inside of a declaration block (`width: 1fr; height: 3;`).
pub fn parse_declaration_block(body: &str) -> Result<Vec<Declaration>, TcssError> {
    let mut input = body;
    let mut declarations = Vec::new();

    loop {
        input = input.trim_start();
        if input.is_empty() {
            break;
        }
        let (rest, declaration) = parse_declaration(input).map_err(|_| {
            TcssError::InvalidSyntax(format!("Invalid declaration: {}", snippet(input)))
        })?;
        declarations.push(declaration);
        input = rest;
    }

    Ok(declarations)
}

/// Dispatches value parsing based on property name.
pub fn parse_declaration(input: &str) -> IResult<&str, Declaration> {
    let (input, _) = multispace0(input)?;
    let (input, name) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;

    let property = Property::from_name(name);
    let (input, value) = match property {
        Property::Width
        | Property::Height
        | Property::MinWidth
        | Property::MaxWidth
        | Property::MinHeight
        | Property::MaxHeight => match units::parse_range(input) {
            Ok((input, (min, max))) => (input, Value::Range { min, max }),
            Err(_) => map(units::parse_scalar, Value::Scalar)(input)?,
        },
        Property::Margin | Property::Padding => map(units::parse_spacing, Value::Spacing)(input)?,
        Property::Display => map(values::parse_display, Value::Display)(input)?,
        Property::Layout => map(values::parse_layout, Value::Layout)(input)?,
        Property::OverflowX | Property::OverflowY => {
            map(values::parse_overflow, Value::Overflow)(input)?
        }
        Property::Other(_) => map(values::parse_token, Value::Token)(input)?,
    };

    // `!important` is accepted and has no effect on the cascade.
    let (input, _) = opt(preceded(multispace0, tag("!important")))(input)?;

    let (input, _) = multispace0(input)?;
    let input = match opt(char::<&str, nom::error::Error<&str>>(';'))(input)? {
        (input, Some(_)) => input,
        // The final declaration of a block may omit its semicolon.
        (input, None) if input.trim().is_empty() => input,
        (input, None) => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )));
        }
    };
    Ok((input, Declaration::new(property, value)))
}

/// Removes `/* ... */` comments. An unterminated comment runs to the end.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                rest = "";
                break;
            }
        }
        out.push(' ');
    }
    out.push_str(rest);
    out
}

fn snippet(input: &str) -> String {
    input.chars().take(40).collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Display, Scalar, Spacing};

    #[test]
    fn selector_list_expands_to_one_rule_per_selector() {
        let sheet = parse_stylesheet("Header, Footer { height: 1; }").unwrap();
        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.rules[0].declarations, sheet.rules[1].declarations);
    }

    #[test]
    fn declarations_are_typed() {
        let sheet = parse_stylesheet(
            "#help_panel { width: 33%; min-width: 30; margin: 0 1; display: none; color: $text-muted; }",
        )
        .unwrap();
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls[0].value, Value::Scalar(Scalar::percent(33.0)));
        assert_eq!(decls[1].property, Property::MinWidth);
        assert_eq!(decls[2].value, Value::Spacing(Spacing::vertical_horizontal(0, 1)));
        assert_eq!(decls[3].value, Value::Display(Display::None));
        assert_eq!(
            decls[4],
            Declaration::new(
                Property::Other("color".to_string()),
                Value::Token("$text-muted".to_string())
            )
        );
    }

    #[test]
    fn last_semicolon_is_optional() {
        let sheet = parse_stylesheet("Label { width: 1fr; height: auto }").unwrap();
        assert_eq!(sheet.rules[0].declarations.len(), 2);
    }

    #[test]
    fn missing_semicolon_between_declarations_is_an_error() {
        let err = parse_stylesheet("Label { width: 1fr height: 3; }").unwrap_err();
        assert!(matches!(err, TcssError::InvalidSyntax(_)));
    }

    #[test]
    fn negative_margins_are_rejected() {
        for source in [
            "Label { margin: -1; }",
            "Label { margin: 0 -2; }",
            "Label { padding: 1 2 3 -4; }",
        ] {
            let err = parse_stylesheet(source).unwrap_err();
            assert!(matches!(err, TcssError::InvalidSyntax(_)), "{source}");
        }
    }

    #[test]
    fn comments_are_ignored() {
        let sheet = parse_stylesheet(
            "/* frame */ #app_vertical { /* fill */ height: 1fr; }\n/* trailing",
        )
        .unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declarations.len(), 1);
    }

    #[test]
    fn bad_selector_is_reported_as_invalid_selector() {
        let err = parse_stylesheet("Container + Label { width: 1; }").unwrap_err();
        assert!(matches!(err, TcssError::InvalidSelector(_)));
    }

    #[test]
    fn empty_block_is_a_rule_without_declarations() {
        let sheet = parse_stylesheet(".empty {}").unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert!(sheet.rules[0].declarations.is_empty());
    }
}
