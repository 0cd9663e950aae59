//! Keep rules that reduce a group's rolls to a single chosen value.

use core::fmt;

/// Reduction applied to the rolls of a [`Dice`](super::Dice) group in place of summing them.
///
/// # Examples
/// ```
/// use fortuna::dice::Keep;
///
/// assert_eq!(Keep::High.select(&[3, 6, 1, 2]), Some(6));
/// assert_eq!(Keep::Low.select(&[3, 6, 1, 2]), Some(1));
/// assert_eq!(Keep::High.select(&[]), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "The notation only admits these two rules")]
pub enum Keep {
	/// Keeps only the highest roll. Notation: `kh1`
	High,

	/// Keeps only the lowest roll. Notation: `kl1`
	Low,
}

impl Keep {
	/// Picks the roll this rule keeps, or `None` if there are no rolls to choose from.
	#[must_use]
	pub fn select(self, rolls: &[u32]) -> Option<u32> {
		match self {
			Self::High => rolls.iter().copied().max(),
			Self::Low => rolls.iter().copied().min(),
		}
	}

	/// Gets the suffix that represents the rule in dice notation.
	#[must_use]
	pub const fn suffix(self) -> &'static str {
		match self {
			Self::High => "kh1",
			Self::Low => "kl1",
		}
	}
}

impl fmt::Display for Keep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.suffix())
	}
}
