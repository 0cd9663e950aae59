//! Data structures for evaluating flat dice expressions and working with their results.

use alloc::{
	borrow::ToOwned,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::{fmt, ops::Range};

use crate::dice::{Dice, Error as DiceError, Roller, Rolled};

/// Sign written in front of a term
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "There are only two signs")]
pub enum Sign {
	/// `+`, or no sign at all
	#[default]
	Pos,

	/// `-`
	Neg,
}

impl Sign {
	/// Applies the sign to a value, returning `None` if negating it would overflow.
	#[must_use]
	pub const fn apply(self, val: i64) -> Option<i64> {
		match self {
			Self::Pos => Some(val),
			Self::Neg => val.checked_neg(),
		}
	}

	/// Gets the prefix the sign adds to a written-out value. Positive values are written without one.
	#[must_use]
	pub const fn prefix(self) -> &'static str {
		match self {
			Self::Pos => "",
			Self::Neg => "-",
		}
	}
}

/// Single signed unit of a flat dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Term {
	/// Standalone integer, with its sign already applied
	Num(i64),

	/// Group of dice and the sign to apply to their value
	Dice(Sign, Dice),
}

impl Term {
	/// Evaluates the term. Numbers evaluate to themselves, while dice are rolled with the given roller.
	///
	/// # Errors
	/// If the dice can't be rolled or their value can't be calculated, an error variant is returned.
	pub fn eval(&self, roller: &mut impl Roller) -> Result<Evaled, DiceError> {
		Ok(match self {
			Self::Num(x) => Evaled::Num(*x),
			Self::Dice(sign, dice) => {
				let rolled = roller.roll(dice)?;
				let value = rolled.value()?;
				Evaled::Dice {
					sign: *sign,
					rolled,
					value,
				}
			}
		})
	}

	/// Checks whether the term always yields the same value. Numbers always do, dice only when they have a single
	/// side.
	#[must_use]
	pub const fn is_deterministic(&self) -> bool {
		match self {
			Self::Num(..) => true,
			Self::Dice(_, dice) => dice.is_deterministic(),
		}
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Num(x) => write!(f, "{x}"),
			Self::Dice(sign, dice) => write!(f, "{}{dice}", sign.prefix()),
		}
	}
}

/// Result of evaluating a single [`Term`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Evaled {
	/// Standalone integer
	Num(i64),

	/// Rolled dice
	Dice {
		/// Sign of the term the dice came from
		sign: Sign,

		/// The rolls that were made
		rolled: Rolled,

		/// Unsigned value of the rolls (see [`Rolled::value()`])
		value: u64,
	},
}

impl Evaled {
	/// Calculates the signed amount the term contributes to the expression's total, or `None` on overflow.
	#[must_use]
	pub fn calc(&self) -> Option<i64> {
		match self {
			Self::Num(x) => Some(*x),
			Self::Dice { sign, value, .. } => sign.apply(i64::try_from(*value).ok()?),
		}
	}
}

impl Describe for Evaled {
	/// Builds a line explaining how the term arrived at its value.
	///
	/// Dice with a keep rule show the unsigned kept value, while plain dice show their signed subtotal.
	///
	/// # Examples
	/// ```
	/// use fortuna::{
	/// 	dice::{roller::Iter as IterRoller, Dice, Keep},
	/// 	expr::{Describe, Sign, Term},
	/// };
	///
	/// let mut roller = IterRoller::new([4, 2, 17, 9]);
	///
	/// let plain = Term::Dice(Sign::Neg, Dice::new(2, 6)).eval(&mut roller)?;
	/// assert_eq!(plain.describe(None), "2d6: [4, 2] = -6");
	///
	/// let kept = Term::Dice(Sign::Neg, Dice::new(2, 20).with_keep(Some(Keep::High))).eval(&mut roller)?;
	/// assert_eq!(kept.describe(None), "2d20kh1 → [17, 9] → 17");
	/// assert_eq!(kept.calc(), Some(-17));
	/// # Ok::<(), fortuna::dice::Error>(())
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		match self {
			Self::Num(x) => x.to_string(),
			Self::Dice { sign, rolled, value } => match rolled.dice.keep {
				Some(..) => format!("{} → {} → {value}", rolled.dice, rolled.describe(list_limit)),
				None => format!(
					"{}: {} = {}{value}",
					rolled.dice,
					rolled.describe(list_limit),
					if *value == 0 { "" } else { sign.prefix() }
				),
			},
		}
	}
}

/// A parsed flat dice expression: the normalized input along with each term found in it.
///
/// Parse one with [`str::parse()`] (see the [`parse`](crate::parse) module) and evaluate it as many times as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
	/// Input with whitespace removed and letters lower-cased
	pub(crate) normalized: String,

	/// Terms in the order they appear, along with their byte ranges in the normalized input
	pub(crate) terms: Vec<(Term, Range<usize>)>,
}

impl Expr {
	/// Evaluates every term from left to right, rolling dice with the given roller, and sums their contributions.
	///
	/// # Errors
	/// If a group of dice can't be rolled, or the total overflows, an error variant is returned.
	pub fn eval(&self, roller: &mut impl Roller) -> Result<Evaluation, ValidationError> {
		let mut total: i64 = 0;
		let mut terms = Vec::with_capacity(self.terms.len());

		for (term, span) in &self.terms {
			let evaled = term.eval(roller).map_err(|source| ValidationError::Dice {
				term: self.text(span),
				span: span.clone(),
				source,
			})?;

			total = evaled
				.calc()
				.and_then(|contribution| total.checked_add(contribution))
				.ok_or_else(|| ValidationError::Overflow(self.normalized.clone()))?;
			terms.push(evaled);
		}

		let breakdown = terms.iter().map(|term| term.describe(None)).collect();
		tracing::trace!(expression = %self.normalized, total, "evaluated dice expression");

		Ok(Evaluation {
			total,
			breakdown,
			normalized: self.normalized.clone(),
			terms,
		})
	}

	/// Gets the normalized form of the input the expression was parsed from.
	#[must_use]
	#[inline]
	pub fn normalized(&self) -> &str {
		&self.normalized
	}

	/// Iterates over the terms found in the expression, in order.
	pub fn terms(&self) -> impl Iterator<Item = &Term> {
		self.terms.iter().map(|(term, _)| term)
	}

	/// Checks whether the expression always yields the same total (every term does).
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		self.terms().all(Term::is_deterministic)
	}

	/// Copies the text of the normalized input that a span covers.
	fn text(&self, span: &Range<usize>) -> String {
		self.normalized.get(span.clone()).unwrap_or_default().to_owned()
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is the normalized input, including any fragments that were skipped over while parsing.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.normalized)
	}
}

/// Complete result of evaluating an [`Expr`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Evaluation {
	/// Signed sum of every term's contribution
	pub total: i64,

	/// One line per term explaining its contribution, in term order
	pub breakdown: Vec<String>,

	/// Normalized form of the evaluated input
	pub normalized: String,

	/// Evaluated terms, in order
	pub terms: Vec<Evaled>,
}

impl Describe for Evaluation {
	/// Builds the breakdown as a block of lines, one per term. Unlike [`Self::breakdown`], the lists of rolls can be
	/// truncated to `list_limit` entries each.
	fn describe(&self, list_limit: Option<usize>) -> String {
		self.terms
			.iter()
			.map(|term| term.describe(list_limit))
			.collect::<Vec<_>>()
			.join("\n")
	}
}

/// Error that can occur while parsing or evaluating an [`Expr`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ValidationError {
	/// A number in the term is too large for the position it's in
	#[error("\"{term}\" has a number that is too large")]
	OutOfRange {
		/// Text of the offending term
		term: String,

		/// Byte range of the term in the normalized input
		span: Range<usize>,
	},

	/// Dice-related error (likely during rolling)
	#[error("invalid dice \"{term}\": {source}")]
	Dice {
		/// Text of the offending term
		term: String,

		/// Byte range of the term in the normalized input
		span: Range<usize>,

		/// What was wrong with the dice
		#[source]
		source: DiceError,
	},

	/// Integer overflow while summing the terms
	#[error("integer overflow while totalling \"{0}\"")]
	Overflow(String),
}

impl ValidationError {
	/// Gets the byte range in the normalized input of the term that caused the error, if a single term did.
	#[must_use]
	pub fn span(&self) -> Option<Range<usize>> {
		match self {
			Self::OutOfRange { span, .. } | Self::Dice { span, .. } => Some(span.clone()),
			Self::Overflow(..) => None,
		}
	}
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed string with additional information about non-deterministic elements.
	/// Any elements that can have a different result between multiple evaluations or multiple results should list all
	/// of the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Parses and evaluates an expression in one go, rolling dice with the given roller.
///
/// # Errors
/// If a number in the expression is out of range, a group of dice can't be rolled, or the total overflows, an error
/// variant is returned. Fragments that aren't terms are skipped rather than treated as errors.
///
/// # Examples
/// ```
/// use fortuna::{dice::roller::Max as MaxRoller, evaluate_with};
///
/// let evaluation = evaluate_with("  2D6 + 3d1 - 4 ", &mut MaxRoller)?;
/// assert_eq!(evaluation.total, 11);
/// assert_eq!(evaluation.normalized, "2d6+3d1-4");
/// assert_eq!(evaluation.breakdown, ["2d6: [6, 6] = 12", "3d1: [1, 1, 1] = 3", "-4"]);
/// # Ok::<(), fortuna::expr::ValidationError>(())
/// ```
pub fn evaluate_with(expression: &str, roller: &mut impl Roller) -> Result<Evaluation, ValidationError> {
	expression.parse::<Expr>()?.eval(roller)
}

/// Parses and evaluates an expression in one go, rolling dice with a freshly-seeded [`FastRand`] roller.
/// See [`evaluate_with()`] for details.
///
/// # Errors
/// Same as [`evaluate_with()`].
///
/// [`FastRand`]: crate::dice::roller::FastRand
#[cfg(all(feature = "std", feature = "fastrand"))]
pub fn evaluate(expression: &str) -> Result<Evaluation, ValidationError> {
	evaluate_with(expression, &mut crate::dice::roller::FastRand::default())
}
