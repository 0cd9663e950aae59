//! Evaluation benchmarks: rolling parsed expressions and the full parse-and-evaluate path.
//!
//! Run with: `cargo bench --bench evaluate`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use fortuna::{
	dice::{
		roller::{FastRand as FastRandRoller, Max as MaxRoller, Roller},
		Dice,
	},
	evaluate_with,
	expr::{Describe, Expr},
};

const COMPLEX: &str = "2d20kh1 + 4d6 - 1d8kl1 + 12 - d4 + 3d10";

fn bench_roll(c: &mut Criterion) {
	let mut group = c.benchmark_group("roll");
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	group.bench_function("1d20", |b| b.iter(|| roller.roll(black_box(&Dice::new(1, 20)))));
	group.bench_function("1000d6", |b| b.iter(|| roller.roll(black_box(&Dice::new(1000, 6)))));
	group.bench_function("max_1000d6", |b| b.iter(|| MaxRoller.roll(black_box(&Dice::new(1000, 6)))));
	group.finish();
}

fn bench_eval(c: &mut Criterion) {
	let expr: Expr = COMPLEX.parse().unwrap();
	let big: Expr = "1000d6 + 1000d20kh1 - 1000d4".parse().unwrap();
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);

	let mut group = c.benchmark_group("eval");
	group.bench_function("complex", |b| b.iter(|| expr.eval(&mut roller)));
	group.bench_function("big", |b| b.iter(|| big.eval(&mut roller)));
	group.bench_function("describe_big", |b| {
		b.iter_batched(
			|| big.eval(&mut MaxRoller).unwrap(),
			|evaluation| evaluation.describe(Some(50)),
			BatchSize::SmallInput,
		);
	});
	group.finish();
}

fn bench_e2e(c: &mut Criterion) {
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);

	let mut group = c.benchmark_group("e2e");
	group.bench_function("basic", |b| b.iter(|| evaluate_with(black_box("4d8 + 4"), &mut roller)));
	group.bench_function("complex", |b| b.iter(|| evaluate_with(black_box(COMPLEX), &mut roller)));
	group.finish();
}

criterion_group!(benches, bench_roll, bench_eval, bench_e2e);
criterion_main!(benches);
