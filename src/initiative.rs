//! Per-room initiative tracking. Requires the `std` feature (enabled by default).

use alloc::{string::String, sync::Arc, vec::Vec};
use core::mem;
use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};

/// Identifier of the room (guild, channel, table...) an initiative session belongs to
pub type RoomId = u64;

/// One participant's initiative roll
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Entry {
	/// Name of the participant who rolled
	pub name: String,

	/// Total they rolled
	pub total: i64,
}

/// Ordered initiative rolls for any number of rooms.
///
/// Each room has its own lock, so participants rolling at the same time in one room are serialized without
/// affecting other rooms. Share a store between handlers with an [`Arc`].
///
/// # Examples
/// ```
/// use fortuna::InitiativeStore;
///
/// let store = InitiativeStore::new();
/// store.record(7, "A", 10);
/// store.record(7, "B", 15);
/// store.record(7, "C", 10);
///
/// let order = store.end(7)?;
/// let names = order.iter().map(|entry| entry.name.as_str()).collect::<Vec<_>>();
/// assert_eq!(names, ["B", "A", "C"]);
/// assert!(store.end(7).is_err());
/// # Ok::<(), fortuna::initiative::EmptySessionError>(())
/// ```
#[derive(Debug, Default)]
pub struct InitiativeStore {
	/// Lists of rolls, keyed by room
	rooms: RwLock<HashMap<RoomId, Arc<Mutex<Vec<Entry>>>>>,
}

impl InitiativeStore {
	/// Creates an empty store.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a participant's roll to a room's list, returning how many rolls the room now has.
	pub fn record(&self, room: RoomId, name: impl Into<String>, total: i64) -> usize {
		let entry = Entry {
			name: name.into(),
			total,
		};
		tracing::debug!(room, name = %entry.name, total, "recording initiative roll");

		let list = self.room(room);
		let mut list = list.lock();
		list.push(entry);
		list.len()
	}

	/// Gets a snapshot of a room's rolls in the order they were made.
	#[must_use]
	pub fn pending(&self, room: RoomId) -> Vec<Entry> {
		self.rooms
			.read()
			.get(&room)
			.map(|list| list.lock().clone())
			.unwrap_or_default()
	}

	/// Ends a room's session: takes its rolls, leaving the room empty, and returns them sorted from highest total to
	/// lowest. Rolls with equal totals stay in the order they were made.
	///
	/// # Errors
	/// If the room has no rolls, [`EmptySessionError`] is returned.
	pub fn end(&self, room: RoomId) -> Result<Vec<Entry>, EmptySessionError> {
		let list = self.rooms.read().get(&room).map(Arc::clone).ok_or(EmptySessionError(room))?;
		let mut order = mem::take(&mut *list.lock());
		if order.is_empty() {
			return Err(EmptySessionError(room));
		}

		// Stable, so ties keep their roll order
		order.sort_by(|a, b| b.total.cmp(&a.total));
		tracing::info!(room, participants = order.len(), "ended initiative");
		Ok(order)
	}

	/// Gets the list for a room, creating it if this is the room's first roll.
	fn room(&self, room: RoomId) -> Arc<Mutex<Vec<Entry>>> {
		if let Some(list) = self.rooms.read().get(&room) {
			return Arc::clone(list);
		}
		Arc::clone(self.rooms.write().entry(room).or_default())
	}
}

/// Error for ending a room's initiative when nobody has rolled
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no initiative rolls found for room {0}")]
#[allow(clippy::exhaustive_structs)]
pub struct EmptySessionError(pub RoomId);
