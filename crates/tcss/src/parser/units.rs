use crate::types::geometry::{Scalar, Spacing, Unit};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, pair, preceded, tuple},
};

/// Parse a floating point or integer number.
fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a whole, non-negative number of cells for spacing values.
fn parse_cells(input: &str) -> IResult<&str, i32> {
    map_res(digit1, |s: &str| s.parse::<i32>())(input)
}

/// Parse the unit suffix (e.g., %, vw, fr).
fn parse_unit_suffix(input: &str) -> IResult<&str, Unit> {
    alt((
        map(tag("vw"), |_| Unit::ViewWidth),
        map(tag("vh"), |_| Unit::ViewHeight),
        map(tag("fr"), |_| Unit::Fraction),
        map(char('%'), |_| Unit::Percent),
    ))(input)
}

/// Parse a single Scalar value (e.g., "10", "50%", "2fr", "auto").
pub fn parse_scalar(input: &str) -> IResult<&str, Scalar> {
    let input = input.trim_start();

    if let Ok((remaining, _)) = tag::<&str, &str, nom::error::Error<&str>>("auto")(input) {
        return Ok((remaining, Scalar::AUTO));
    }

    let (input, value) = parse_number(input)?;
    let (input, unit) = opt(parse_unit_suffix)(input)?;

    Ok((
        input,
        Scalar {
            value,
            unit: unit.unwrap_or(Unit::Cells),
        },
    ))
}

/// Parse a `minmax(min, max)` clamp pair.
pub fn parse_range(input: &str) -> IResult<&str, (Scalar, Scalar)> {
    let input = input.trim_start();
    let (input, _) = tag("minmax")(input)?;
    delimited(
        preceded(multispace0, char('(')),
        tuple((
            preceded(multispace0, parse_scalar),
            preceded(tuple((multispace0, char(','), multispace0)), parse_scalar),
        )),
        preceded(multispace0, char(')')),
    )(input)
}

/// Parse CSS-style spacing (margin/padding) in whole cells.
/// Supports 1 value (all), 2 values (v, h), or 4 values (t, r, b, l).
pub fn parse_spacing(input: &str) -> IResult<&str, Spacing> {
    let input = input.trim_start();
    let (input, first) = parse_cells(input)?;
    let (input, second) = opt(preceded(multispace0, parse_cells))(input)?;

    match second {
        None => Ok((input, Spacing::all(first))),
        Some(h) => {
            let (input, third) = opt(preceded(multispace0, parse_cells))(input)?;
            let (input, fourth) = opt(preceded(multispace0, parse_cells))(input)?;

            match (third, fourth) {
                (Some(b), Some(l)) => Ok((
                    input,
                    Spacing {
                        top: first,
                        right: h,
                        bottom: b,
                        left: l,
                    },
                )),
                (Some(_), None) => Err(nom::Err::Error(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Count,
                ))),
                _ => Ok((input, Spacing::vertical_horizontal(first, h))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_units() {
        assert_eq!(parse_scalar("12").unwrap().1, Scalar::cells(12.0));
        assert_eq!(parse_scalar("33%").unwrap().1, Scalar::percent(33.0));
        assert_eq!(parse_scalar("2fr").unwrap().1, Scalar::fraction(2.0));
        assert_eq!(parse_scalar(" auto").unwrap().1, Scalar::AUTO);
        assert_eq!(parse_scalar("50vw").unwrap().1.unit, Unit::ViewWidth);
    }

    #[test]
    fn range_pair() {
        let (rest, (min, max)) = parse_range("minmax(10, 1fr);").unwrap();
        assert_eq!(rest, ";");
        assert_eq!(min, Scalar::cells(10.0));
        assert_eq!(max, Scalar::fraction(1.0));
    }

    #[test]
    fn spacing_forms() {
        assert_eq!(parse_spacing("1").unwrap().1, Spacing::all(1));
        assert_eq!(
            parse_spacing("0 2").unwrap().1,
            Spacing::vertical_horizontal(0, 2)
        );
        let (_, four) = parse_spacing("1 2 3 4").unwrap();
        assert_eq!((four.top, four.right, four.bottom, four.left), (1, 2, 3, 4));
        assert!(parse_spacing("1 2 3;").is_err());
    }

    #[test]
    fn negative_spacing_is_rejected() {
        assert!(parse_spacing("-1").is_err());
        assert_eq!(parse_spacing("1 -2").unwrap().0, " -2");
    }
}
