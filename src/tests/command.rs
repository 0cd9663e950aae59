use crate::{
	command::{self, Command, CommandError, Reply, ReplyKind, Response, TurnOrder, UnknownCommand},
	dice::roller::{Iter as IterRoller, Max as MaxRoller},
	initiative::{Entry, InitiativeStore},
};

#[test]
fn roll_reply() {
	let reply = command::roll(&mut MaxRoller, "Ryze", "1d1 + 2").unwrap();
	assert_eq!(reply.kind, ReplyKind::Roll);
	assert_eq!(reply.total, 3);
	assert_eq!(reply.notation, "1d1+2");
	assert_eq!(
		reply.to_string(),
		"**Ryze**\n# 🎲 3\n**Notation:** `1d1+2`\n**Breakdown:**\n1d1: [1] = 1\n2"
	);
}

#[test]
fn long_roll_lists_are_truncated() {
	let reply = command::roll(&mut MaxRoller, "Ryze", "60d1").unwrap();
	let ones = vec!["1"; 50].join(", ");
	assert_eq!(reply.breakdown, format!("60d1: [{ones}, 10 more...] = 60"));
	assert_eq!(reply.total, 60);
}

#[test]
fn invalid_roll() {
	let err = command::roll(&mut MaxRoller, "Ryze", "1d0").unwrap_err();
	assert!(matches!(err, CommandError::Validation(..)));
	assert!(!err.is_informational());
	assert_eq!(err.to_string(), "Error: invalid dice \"1d0\": dice need at least one side");
}

#[test]
fn initiative_records_under_given_name() {
	let store = InitiativeStore::new();
	let reply = command::initiative(
		&store,
		&mut IterRoller::new([7, 15]),
		3,
		"2d20kh1+4",
		Some(" Goblin Boss "),
		"Ryze",
	)
	.unwrap();

	assert_eq!(reply.kind, ReplyKind::Initiative);
	assert_eq!(reply.author, "Goblin Boss");
	assert_eq!(
		reply.to_string(),
		"**Goblin Boss**\n# ⚔️ 19\n**Notation:** `2d20kh1+4`\n**Breakdown:**\n2d20kh1 → [7, 15] → 15\n4"
	);
	assert_eq!(store.pending(3), [Entry { name: "Goblin Boss".to_owned(), total: 19 }]);
}

#[test]
fn initiative_falls_back_to_requester() {
	let store = InitiativeStore::new();
	for name in [None, Some(""), Some("   ")] {
		let reply = command::initiative(&store, &mut MaxRoller, 3, "1d20", name, "Ryze").unwrap();
		assert_eq!(reply.author, "Ryze");
	}
	assert_eq!(store.pending(3).len(), 3);
	assert!(store.pending(3).iter().all(|entry| entry.name == "Ryze" && entry.total == 20));
}

#[test]
fn failed_initiative_records_nothing() {
	let store = InitiativeStore::new();
	let err = command::initiative(&store, &mut MaxRoller, 3, "5000d6", None, "Ryze").unwrap_err();
	assert!(matches!(err, CommandError::Validation(..)));
	assert!(store.pending(3).is_empty());
}

#[test]
fn turn_order() {
	let store = InitiativeStore::new();
	store.record(3, "A", 10);
	store.record(3, "B", 15);
	store.record(3, "C", 10);

	let order = command::end_initiative(&store, 3).unwrap();
	assert_eq!(
		order.to_string(),
		"## ⚔️ Combat Initiative Order\n**1.** B — **15**\n**2.** A — **10**\n**3.** C — **10**"
	);

	let err = command::end_initiative(&store, 3).unwrap_err();
	assert!(matches!(err, CommandError::NoRolls(..)));
	assert!(err.is_informational());
	assert_eq!(err.to_string(), "No initiative rolls found.");
}

#[test]
fn empty_turn_order_is_just_the_title() {
	assert_eq!(TurnOrder(Vec::new()).to_string(), "## ⚔️ Combat Initiative Order");
}

#[test]
fn parse_commands() {
	assert_eq!(
		"/roll 3d6 + 2".parse::<Command>().unwrap(),
		Command::Roll {
			expression: "3d6 + 2".to_owned()
		}
	);
	assert_eq!(
		"  /INITIATIVE d20+3  ".parse::<Command>().unwrap(),
		Command::Initiative {
			expression: "d20+3".to_owned(),
			name: None,
		}
	);
	assert_eq!(
		"initiative 2d20kh1 Ryze the Bold".parse::<Command>().unwrap(),
		Command::Initiative {
			expression: "2d20kh1".to_owned(),
			name: Some("Ryze the Bold".to_owned()),
		}
	);
	assert_eq!("/endinitiative".parse::<Command>().unwrap(), Command::EndInitiative);
}

#[test]
fn unknown_commands() {
	for line in ["/dance", "/roll", "/roll   ", "/initiative", "/endinitiative now", ""] {
		assert!(line.parse::<Command>().is_err(), "{line}");
	}
	assert_eq!("/dance 2d6".parse::<Command>(), Err(UnknownCommand("dance 2d6".to_owned())));
}

#[test]
fn execute_commands() {
	let store = InitiativeStore::new();
	let mut roller = MaxRoller;

	let rolled = Command::Roll {
		expression: "2d6".to_owned(),
	}
	.execute(&store, &mut roller, 9, "Ryze")
	.unwrap();
	assert!(matches!(rolled, Response::Reply(Reply { total: 12, kind: ReplyKind::Roll, .. })));
	assert!(store.pending(9).is_empty());

	"/initiative 1d20+1".parse::<Command>().unwrap().execute(&store, &mut roller, 9, "Ryze").unwrap();
	"/initiative 1d20 Goblin".parse::<Command>().unwrap().execute(&store, &mut roller, 9, "Ryze").unwrap();

	let ended = Command::EndInitiative.execute(&store, &mut roller, 9, "Ryze").unwrap();
	assert_eq!(
		ended,
		Response::TurnOrder(TurnOrder(vec![
			Entry {
				name: "Ryze".to_owned(),
				total: 21
			},
			Entry {
				name: "Goblin".to_owned(),
				total: 20
			},
		]))
	);
	assert!(ended.to_string().starts_with("## ⚔️ Combat Initiative Order\n**1.** Ryze — **21**"));

	let err = Command::EndInitiative.execute(&store, &mut roller, 9, "Ryze").unwrap_err();
	assert!(err.is_informational());
}
