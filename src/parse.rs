//! Parser generators for flat dice expressions, along with [`FromStr`] implementations for [`Dice`] and [`Expr`].
//!
//! Input is normalized first (whitespace removed, letters lower-cased), then scanned left to right for terms. At
//! each position a dice term is tried first, then a number. Anything that is neither is skipped one character at a
//! time, so unparseable fragments never make a whole expression fail.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{ops::Range, str::FromStr};

use chumsky::prelude::*;

use crate::{
	dice::{Dice, Keep},
	expr::{Expr, Sign, Term, ValidationError},
};

/// Extra parser state used by all of the parsers in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Term found while scanning, or `None` if one of its numbers didn't fit, along with its byte range in the input
pub type Scanned = (Option<Term>, Range<usize>);

/// Removes all whitespace from an expression and lower-cases it.
///
/// # Examples
/// ```
/// assert_eq!(fortuna::parse::normalize("  3D6 + 2KH1 "), "3d6+2kh1");
/// ```
#[must_use]
pub fn normalize(input: &str) -> String {
	input
		.chars()
		.filter(|c| !c.is_whitespace())
		.flat_map(char::to_lowercase)
		.collect()
}

/// Generates a parser for a run of one or more ASCII digits.
fn digits<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
	any().filter(char::is_ascii_digit).repeated().at_least(1).collect()
}

/// Generates a parser for an optional leading sign, defaulting to positive.
fn sign<'src>() -> impl Parser<'src, &'src str, Sign, Extra<'src>> + Clone {
	choice((just('+').to(Sign::Pos), just('-').to(Sign::Neg)))
		.or_not()
		.map(Option::unwrap_or_default)
}

/// Generates a parser that specifically handles dice terms like "d20", "-2d20kh1", "4d6", etc.
/// The term's value is `None` if its count or sides don't fit in a `u32`.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Option<Term>, Extra<'src>> + Clone {
	sign()
		.then(digits().or_not())
		.then_ignore(just('d'))
		.then(digits())
		.then(choice((just("kh1").to(Keep::High), just("kl1").to(Keep::Low))).or_not())
		.map(|(((sign, count), sides), keep)| {
			let count = match count {
				Some(count) => count.parse::<u32>().ok()?,
				None => 1,
			};
			let sides = sides.parse::<u32>().ok()?;
			Some(Term::Dice(sign, Dice::new(count, sides).with_keep(keep)))
		})
}

/// Generates a parser that specifically handles numbers like "4", "+12", "-3", etc.
/// The term's value is `None` if the number doesn't fit in an `i64`.
pub fn num_part<'src>() -> impl Parser<'src, &'src str, Option<Term>, Extra<'src>> + Clone {
	sign()
		.then(digits())
		.map(|(sign, digits)| format!("{}{digits}", sign.prefix()).parse::<i64>().ok().map(Term::Num))
}

/// Generates a parser that handles a single term of either kind, preferring dice.
pub fn term_part<'src>() -> impl Parser<'src, &'src str, Option<Term>, Extra<'src>> + Clone {
	choice((dice_part(), num_part()))
}

/// Generates a parser that scans an entire normalized expression for terms, skipping anything in between them.
/// This parser accepts any input.
pub fn terms<'src>() -> impl Parser<'src, &'src str, Vec<Scanned>, Extra<'src>> + Clone {
	choice((
		term_part().map_with(|term, e| {
			let span = e.span();
			Some((term, span.start()..span.end()))
		}),
		any().to(None),
	))
	.repeated()
	.collect::<Vec<_>>()
	.map(|found| found.into_iter().flatten().collect())
}

impl FromStr for Expr {
	type Err = ValidationError;

	/// Normalizes and scans the input for terms.
	///
	/// # Errors
	/// If a term has a number too large to fit the position it's in, an error variant naming it is returned.
	///
	/// # Examples
	/// ```
	/// use fortuna::{dice::Dice, expr::{Expr, Sign, Term}};
	///
	/// let expr: Expr = "2d20kh1 + 4 ?!".parse()?;
	/// assert_eq!(expr.normalized(), "2d20kh1+4?!");
	/// assert_eq!(
	/// 	expr.terms().copied().collect::<Vec<_>>(),
	/// 	[
	/// 		Term::Dice(Sign::Pos, Dice::new(2, 20).with_keep(Some(fortuna::dice::Keep::High))),
	/// 		Term::Num(4),
	/// 	]
	/// );
	/// # Ok::<(), fortuna::expr::ValidationError>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = normalize(s);

		// The scanner has a catch-all alternative, so it can't fail to produce output
		let scanned = terms().parse(normalized.as_str()).into_output().unwrap_or_default();

		let terms = scanned
			.into_iter()
			.map(|(term, span)| match term {
				Some(term) => Ok((term, span)),
				None => Err(ValidationError::OutOfRange {
					term: normalized.get(span.clone()).unwrap_or_default().to_string(),
					span,
				}),
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self { normalized, terms })
	}
}

/// Error from parsing a lone set of dice
#[derive(thiserror::Error, Debug, Clone)]
#[error("\"{input}\" is not a dice term")]
pub struct Error {
	/// Normalized input that was rejected
	pub input: String,
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses a single unsigned dice term like "2d20kh1" that must make up the entire input.
	///
	/// # Examples
	/// ```
	/// use fortuna::dice::{Dice, Keep};
	///
	/// assert_eq!("4D6".parse::<Dice>()?, Dice::new(4, 6));
	/// assert_eq!("d20kl1".parse::<Dice>()?, Dice::new(1, 20).with_keep(Some(Keep::Low)));
	/// assert!("4d6+1".parse::<Dice>().is_err());
	/// assert!("-4d6".parse::<Dice>().is_err());
	/// # Ok::<(), fortuna::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let input = normalize(s);
		let parsed = dice_part().then_ignore(end()).parse(input.as_str()).into_output();
		match parsed {
			Some(Some(Term::Dice(Sign::Pos, dice))) if !input.starts_with('+') => Ok(dice),
			_ => Err(Error { input }),
		}
	}
}
