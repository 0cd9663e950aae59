//! Handlers for the roll, initiative, and end-initiative commands, plus the replies they produce.
//! Requires the `std` feature (enabled by default).
//!
//! Replies render as Markdown, ready to be posted in a chat.

use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{
	dice::Roller,
	evaluate_with,
	expr::{Describe, ValidationError},
	initiative::{EmptySessionError, Entry, InitiativeStore, RoomId},
};

/// Most rolls listed per dice group in a reply before the rest are summarized
pub const LIST_LIMIT: usize = 50;

/// Which command a [`Reply`] answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplyKind {
	/// Plain roll
	Roll,

	/// Initiative roll that was recorded for the room
	Initiative,
}

impl ReplyKind {
	/// Gets the emoji shown in front of the total.
	#[must_use]
	pub const fn emoji(self) -> &'static str {
		match self {
			Self::Roll => "🎲",
			Self::Initiative => "⚔️",
		}
	}
}

/// Result of a roll, ready to show to the room
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Reply {
	/// Command that produced the reply
	pub kind: ReplyKind,

	/// Who the roll is shown as coming from
	pub author: String,

	/// Total of the roll
	pub total: i64,

	/// Normalized expression that was rolled
	pub notation: String,

	/// Breakdown lines, one per term
	pub breakdown: String,
}

impl fmt::Display for Reply {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "**{}**", self.author)?;
		writeln!(f, "# {} {}", self.kind.emoji(), self.total)?;
		writeln!(f, "**Notation:** `{}`", self.notation)?;
		writeln!(f, "**Breakdown:**")?;
		write!(f, "{}", self.breakdown)
	}
}

/// Final initiative order for a room, from first to act to last
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct TurnOrder(pub Vec<Entry>);

impl fmt::Display for TurnOrder {
	/// Formats the order as a title followed by a 1-indexed list, like `**1.** Ryze — **17**`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "## ⚔️ Combat Initiative Order")?;
		for (index, entry) in self.0.iter().enumerate() {
			write!(f, "\n**{}.** {} — **{}**", index.saturating_add(1), entry.name, entry.total)?;
		}
		Ok(())
	}
}

/// Rolls an expression on behalf of someone.
///
/// # Errors
/// If the expression fails validation, [`CommandError::Validation`] is returned.
///
/// # Examples
/// ```
/// use fortuna::{command, dice::roller::Max as MaxRoller};
///
/// let reply = command::roll(&mut MaxRoller, "Ryze", "2d6+1")?;
/// assert_eq!(reply.total, 13);
/// assert_eq!(reply.breakdown, "2d6: [6, 6] = 12\n1");
/// # Ok::<(), command::CommandError>(())
/// ```
pub fn roll(roller: &mut impl Roller, author: &str, expression: &str) -> Result<Reply, CommandError> {
	let evaluation = evaluate_with(expression, roller)?;
	Ok(Reply {
		kind: ReplyKind::Roll,
		author: author.to_owned(),
		total: evaluation.total,
		breakdown: evaluation.describe(Some(LIST_LIMIT)),
		notation: evaluation.normalized,
	})
}

/// Rolls initiative for a participant and records the total in the room's session.
///
/// The participant is `name` when one is given and isn't blank, otherwise `fallback_name` (typically the
/// requester's nickname or display name). Nothing is recorded if the expression fails validation.
///
/// # Errors
/// If the expression fails validation, [`CommandError::Validation`] is returned.
pub fn initiative(
	store: &InitiativeStore,
	roller: &mut impl Roller,
	room: RoomId,
	expression: &str,
	name: Option<&str>,
	fallback_name: &str,
) -> Result<Reply, CommandError> {
	let name = name
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.unwrap_or(fallback_name);

	let evaluation = evaluate_with(expression, roller)?;
	store.record(room, name, evaluation.total);

	Ok(Reply {
		kind: ReplyKind::Initiative,
		author: name.to_owned(),
		total: evaluation.total,
		breakdown: evaluation.describe(Some(LIST_LIMIT)),
		notation: evaluation.normalized,
	})
}

/// Ends the room's initiative session, producing the turn order and clearing the session.
///
/// # Errors
/// If nobody in the room has rolled initiative, [`CommandError::NoRolls`] is returned.
pub fn end_initiative(store: &InitiativeStore, room: RoomId) -> Result<TurnOrder, CommandError> {
	Ok(TurnOrder(store.end(room)?))
}

/// Command issued by someone in a room
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
	/// `/roll <expression>`
	Roll {
		/// Expression to roll
		expression: String,
	},

	/// `/initiative <expression> [name]`
	Initiative {
		/// Expression to roll
		expression: String,

		/// Name to record the roll under, if not the requester's own
		name: Option<String>,
	},

	/// `/endinitiative`
	EndInitiative,
}

impl Command {
	/// Runs the command for a requester in a room.
	///
	/// # Errors
	/// Any error from the underlying handler ([`roll()`], [`initiative()`], or [`end_initiative()`]) is returned.
	pub fn execute(
		&self,
		store: &InitiativeStore,
		roller: &mut impl Roller,
		room: RoomId,
		requester: &str,
	) -> Result<Response, CommandError> {
		Ok(match self {
			Self::Roll { expression } => Response::Reply(roll(roller, requester, expression)?),
			Self::Initiative { expression, name } => Response::Reply(initiative(
				store,
				roller,
				room,
				expression,
				name.as_deref(),
				requester,
			)?),
			Self::EndInitiative => Response::TurnOrder(end_initiative(store, room)?),
		})
	}
}

impl FromStr for Command {
	type Err = UnknownCommand;

	/// Parses a command line. The leading `/` is optional. For `/initiative`, the expression is the first word and
	/// any remaining words are the name.
	///
	/// # Examples
	/// ```
	/// use fortuna::command::Command;
	///
	/// assert_eq!(
	/// 	"/initiative 2d20kh1+4 Ryze the Bold".parse::<Command>()?,
	/// 	Command::Initiative {
	/// 		expression: "2d20kh1+4".to_owned(),
	/// 		name: Some("Ryze the Bold".to_owned()),
	/// 	},
	/// );
	/// assert_eq!(
	/// 	"roll 3d6 + 2".parse::<Command>()?,
	/// 	Command::Roll { expression: "3d6 + 2".to_owned() },
	/// );
	/// # Ok::<(), fortuna::command::UnknownCommand>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let line = s.trim();
		let line = line.strip_prefix('/').unwrap_or(line);
		let (name, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let args = args.trim();

		match name.to_lowercase().as_str() {
			"roll" if !args.is_empty() => Ok(Self::Roll {
				expression: args.to_owned(),
			}),
			"initiative" if !args.is_empty() => {
				let (expression, name) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
				let name = name.trim();
				Ok(Self::Initiative {
					expression: expression.to_owned(),
					name: (!name.is_empty()).then(|| name.to_owned()),
				})
			}
			"endinitiative" if args.is_empty() => Ok(Self::EndInitiative),
			_ => Err(UnknownCommand(line.to_owned())),
		}
	}
}

/// Output of a successfully executed [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Response {
	/// Roll result
	Reply(Reply),

	/// Final initiative order
	TurnOrder(TurnOrder),
}

impl fmt::Display for Response {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Reply(reply) => fmt::Display::fmt(reply, f),
			Self::TurnOrder(order) => fmt::Display::fmt(order, f),
		}
	}
}

/// Error for a line that isn't a known command or is missing its arguments
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown command \"{0}\" (try /roll <expr>, /initiative <expr> [name], or /endinitiative)")]
#[allow(clippy::exhaustive_structs)]
pub struct UnknownCommand(pub String);

/// Error that a command reports back to its requester.
///
/// The message is meant to be shown only to the requester. Neither variant is fatal.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CommandError {
	/// The expression failed validation
	#[error("Error: {0}")]
	Validation(#[from] ValidationError),

	/// Initiative was ended in a room where nobody has rolled
	#[error("No initiative rolls found.")]
	NoRolls(#[from] EmptySessionError),
}

impl CommandError {
	/// Checks whether the message is informational rather than an actual error.
	#[must_use]
	pub const fn is_informational(&self) -> bool {
		matches!(self, Self::NoRolls(..))
	}
}
