use crate::TcssError;
use crate::parser::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorPart, values::parse_ident,
};
use nom::{
    IResult,
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::map,
    multi::many0,
    sequence::{preceded, tuple},
};

/// Parses a simple selector: Type, .Class, #ID or `*`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(char('*'), |_| Selector::Universal),
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., "Label.col.col-lg-4").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between simple selectors: juxtaposition means "same node".
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a combinator between two compounds: `>` (with optional
/// whitespace) or bare whitespace for a descendant.
fn parse_combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        map(tuple((multispace0, char('>'), multispace0)), |_| {
            Combinator::Child
        }),
        map(multispace1, |_| Combinator::Descendant),
    ))(input)
}

/// Parses a complex selector with combinators (e.g., "Container > .col").
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let Ok((after_combinator, combinator)) = parse_combinator(input) else {
            break;
        };
        match parse_compound_selector(after_combinator) {
            Ok((next_input, next)) => {
                parts.push(SelectorPart::new(current, combinator));
                current = next;
                input = next_input;
            }
            // Trailing whitespace or a dangling combinator; leave it for the
            // caller to reject or skip.
            Err(_) => break,
        }
    }

    // The last part always has Combinator::None
    parts.push(SelectorPart::new(current, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

/// Parses one complete selector, rejecting anything left over.
///
/// ```
/// use tcss::parser::parse_selector;
///
/// let selector = parse_selector("#metrics_container > .metrics").unwrap();
/// assert_eq!(selector.parts.len(), 2);
/// assert!(parse_selector("Container +").is_err());
/// ```
pub fn parse_selector(source: &str) -> Result<ComplexSelector, TcssError> {
    let text = source.trim();
    let invalid = || TcssError::InvalidSelector(text.to_string());

    let (remaining, selector) = parse_complex_selector(text).map_err(|_| invalid())?;
    if !remaining.trim().is_empty() {
        return Err(invalid());
    }
    selector.validate()?;
    Ok(selector)
}

/// Parses a comma-separated selector list (e.g., "Header, Footer").
pub fn parse_selector_list(source: &str) -> Result<Vec<ComplexSelector>, TcssError> {
    source.split(',').map(parse_selector).collect()
}
