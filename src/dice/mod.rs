//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For using them as part of a larger expression, see [`Term::Dice`].
//!
//! [`Term::Dice`]: crate::expr::Term::Dice

pub mod keep;
pub mod roller;

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::{keep::Keep, roller::Roller};
use crate::expr::Describe;

/// Largest number of dice a single group is allowed to roll.
pub const MAX_COUNT: u32 = 1000;

/// A group of one or more rollable dice with a specific number of sides, along with an optional [`Keep`] rule that
/// reduces the resulting rolls to a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,

	/// Rule to reduce the rolls with instead of summing them
	pub keep: Option<Keep>,
}

impl Dice {
	/// Creates a new group of dice with a given count and number of sides.
	/// A count of zero is treated the same as an omitted count, which is one die.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self {
			count: if count == 0 { 1 } else { count },
			sides,
			keep: None,
		}
	}

	/// Creates a group matching this one, but reduced with the given keep rule.
	#[must_use]
	pub const fn with_keep(self, keep: Option<Keep>) -> Self {
		Self { keep, ..self }
	}

	/// Checks that the dice can actually be rolled.
	///
	/// # Errors
	/// If the dice have no sides or there are more of them than [`MAX_COUNT`], an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use fortuna::dice::{Dice, Error};
	///
	/// assert!(Dice::new(3, 6).validate().is_ok());
	/// assert!(matches!(Dice::new(3, 0).validate(), Err(Error::NoSides(..))));
	/// assert!(matches!(Dice::new(5000, 6).validate(), Err(Error::TooMany(..))));
	/// ```
	pub fn validate(&self) -> Result<(), Error> {
		if self.sides == 0 {
			Err(Error::NoSides(*self))
		} else if self.count > MAX_COUNT {
			Err(Error::TooMany(*self))
		} else {
			Ok(())
		}
	}

	/// Checks whether rolling the dice always yields the same result.
	#[must_use]
	#[inline]
	pub const fn is_deterministic(&self) -> bool {
		self.sides == 1
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)?;
		if let Some(keep) = self.keep {
			write!(f, "{keep}")?;
		}
		Ok(())
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled {
	/// Each individual die roll that was made, in the order they were rolled
	pub rolls: Vec<u32>,

	/// Dice that were rolled to produce this
	pub dice: Dice,
}

impl Rolled {
	/// Calculates the unsigned value of the rolls: the kept roll if the dice have a [`Keep`] rule, otherwise the sum
	/// of all rolls. A set without any rolls is worth zero.
	///
	/// # Errors
	/// If there is an integer overflow while summing the die rolls, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use fortuna::dice::{Dice, Keep, Rolled};
	///
	/// let dice = Dice::new(4, 6);
	/// assert_eq!(Rolled::from_dice_and_rolls(dice, [3, 6, 1, 2]).value()?, 12);
	///
	/// let dice = dice.with_keep(Some(Keep::High));
	/// assert_eq!(Rolled::from_dice_and_rolls(dice, [3, 6, 1, 2]).value()?, 6);
	/// # Ok::<(), fortuna::dice::Error>(())
	/// ```
	pub fn value(&self) -> Result<u64, Error> {
		if let Some(keep) = self.dice.keep {
			return Ok(keep.select(&self.rolls).map_or(0, u64::from));
		}

		let mut sum: u64 = 0;
		for roll in &self.rolls {
			sum = sum
				.checked_add(u64::from(*roll))
				.ok_or_else(|| Error::Overflow(self.clone()))?;
		}

		Ok(sum)
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: Dice, rolls: impl IntoIterator<Item = u32>) -> Self {
		Self {
			rolls: rolls.into_iter().collect(),
			dice,
		}
	}
}

impl Describe for Rolled {
	/// Builds a bracketed list of all of the individual rolls, like `[6, 2, 5]`.
	///
	/// If `list_limit` is specified and there are more rolls than it, the list will be truncated and appended with
	/// "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use fortuna::{dice::{Dice, Rolled}, expr::Describe};
	///
	/// let rolled = Rolled::from_dice_and_rolls(Dice::new(4, 6), [6, 2, 5, 3]);
	/// assert_eq!(rolled.describe(None), "[6, 2, 5, 3]");
	/// assert_eq!(rolled.describe(Some(2)), "[6, 2, 2 more...]");
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated_rolls = self.rolls.len().saturating_sub(list_limit);

		format!(
			"[{}{}]",
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled {
	/// Formats the dice followed by the full list of rolls, like `3d6[6, 2, 5]`.
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}{}", self.dice, self.describe(None))
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The dice have zero sides, so there is nothing to roll.
	#[error("dice need at least one side")]
	NoSides(Dice),

	/// The dice would roll more than [`MAX_COUNT`] dice at once.
	#[error("can't roll more than {MAX_COUNT} dice at once")]
	TooMany(Dice),

	/// There was an integer overflow when summing roll values.
	/// This normally should not ever happen given the limit on the number of dice.
	#[error("integer overflow while totalling {0}")]
	Overflow(Rolled),
}
