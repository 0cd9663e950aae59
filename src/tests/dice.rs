use crate::dice::{
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller},
	Dice, Error, Keep, Rolled, MAX_COUNT,
};

#[test]
fn single_d20() {
	let dice = Dice::new(1, 20);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 1);
	assert_eq!(rolled.dice, dice);
}

#[test]
fn double_d8() {
	let dice = Dice::new(2, 8);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 2);
}

#[test]
fn hundred_d42s() {
	let dice = Dice::new(100, 42);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 100);
}

#[test]
fn max_dice() {
	let dice = Dice::new(MAX_COUNT, u32::MAX);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), MAX_COUNT as usize);

	let total = MaxRoller.roll(&dice).unwrap().value().unwrap();
	assert_eq!(total, u64::from(MAX_COUNT) * u64::from(u32::MAX));
}

#[test]
fn all_dice_sides_occur() {
	let dice = Dice::new(MAX_COUNT, 20);
	let mut roller = FastRandRoller::default();
	let mut rolls = Vec::new();

	for _ in 1..=20 {
		rolls.append(&mut roller.roll(&dice).unwrap().rolls);
	}

	rolls_in_range(&rolls, 20);
	for side in 1..=20 {
		assert!(rolls.contains(&side));
	}
}

#[test]
fn seeded_rolls_repeat() {
	let dice = Dice::new(10, 100);
	let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice).unwrap();
	let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice).unwrap();
	assert_eq!(first, second);
}

#[test]
fn zero_count_rolls_one_die() {
	let dice = Dice::new(0, 6);
	assert_eq!(dice.count, 1);
	assert_eq!(rolls_successfully_and_in_range(&dice).rolls.len(), 1);

	let built = Dice {
		count: 0,
		sides: 6,
		keep: None,
	};
	assert_eq!(MaxRoller.roll(&built).unwrap().rolls, vec![6]);
}

#[test]
fn no_sides() {
	let result = MaxRoller.roll(&Dice::new(2, 0));
	assert!(matches!(result, Err(Error::NoSides(..))));
}

#[test]
fn too_many_dice() {
	let result = MaxRoller.roll(&Dice::new(MAX_COUNT + 1, 6));
	assert!(matches!(result, Err(Error::TooMany(..))));
}

#[test]
fn keep_high_and_low() {
	let mut roller = IterRoller::new([3, 6, 1, 2, 3, 6, 1, 2]);

	let high = roller.roll(&Dice::new(4, 6).with_keep(Some(Keep::High))).unwrap();
	assert_eq!(high.value().unwrap(), 6);

	let low = roller.roll(&Dice::new(4, 6).with_keep(Some(Keep::Low))).unwrap();
	assert_eq!(low.value().unwrap(), 1);
	assert_eq!(low.rolls, vec![3, 6, 1, 2]);
}

#[test]
fn plain_value_sums() {
	let rolled = Rolled::from_dice_and_rolls(Dice::new(3, 6), [4, 5, 6]);
	assert_eq!(rolled.value().unwrap(), 15);
}

#[test]
fn empty_rolls_are_worth_nothing() {
	let rolled = Rolled::from_dice_and_rolls(Dice::new(1, 6).with_keep(Some(Keep::High)), Vec::new());
	assert_eq!(rolled.value().unwrap(), 0);
}

#[test]
fn dice_display() {
	assert_eq!(Dice::new(2, 20).with_keep(Some(Keep::High)).to_string(), "2d20kh1");
	assert_eq!(Dice::new(1, 20).with_keep(Some(Keep::Low)).to_string(), "1d20kl1");
	assert_eq!(Dice::new(3, 6).to_string(), "3d6");
	assert_eq!(Dice::default().to_string(), "1d20");
}

#[test]
fn rolled_display() {
	let rolled = Rolled::from_dice_and_rolls(Dice::new(3, 6), [6, 2, 5]);
	assert_eq!(rolled.to_string(), "3d6[6, 2, 5]");
}

#[test]
fn dice_equality() {
	assert_eq!(Dice::new(4, 8), Dice::new(4, 8));
	assert_ne!(Dice::new(4, 8), Dice::new(4, 20));
	assert_ne!(Dice::new(4, 8), Dice::new(2, 8));
	assert_ne!(Dice::new(4, 8), Dice::new(4, 8).with_keep(Some(Keep::High)));
}

#[test]
fn deterministic_dice() {
	assert!(Dice::new(5, 1).is_deterministic());
	assert!(!Dice::new(1, 2).is_deterministic());
}

fn rolls_successfully_and_in_range(dice: &Dice) -> Rolled {
	let result = FastRandRoller::default().roll(dice);
	assert!(result.is_ok());

	let rolled = result.unwrap();
	rolls_in_range(&rolled.rolls, rolled.dice.sides);
	rolled
}

fn rolls_in_range(rolls: &[u32], sides: u32) {
	assert!(!rolls.iter().any(|roll| *roll < 1 || *roll > sides));
}
