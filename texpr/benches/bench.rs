use std::cell::RefCell;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use texpr::prelude::*;

fn build_random_tree() -> Erased<'static, SimpleSpace> {
    // Random binary tree whose every node goes through an erased handle. Seeded for
    // determinism.
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);

    fn next_create(budget: usize, rng: &mut impl Rng) -> Erased<'static, SimpleSpace> {
        if budget == 0 || rng.random_bool(0.2) {
            return SimpleSpace::new(rng.random_range(-1000..=1000)).erase();
        }

        match rng.random_range(0..=2) {
            0 => {
                let left = next_create(budget - 1, rng);
                let right = next_create(budget - 1, rng);
                compose(left, right).erase()
            }
            1 => {
                let inner = next_create(budget - 1, rng);
                name("n", inner).erase()
            }
            2 => {
                let left = next_create(budget - 1, rng);
                (left + SimpleSpace::new(rng.random_range(-1000..=1000))).erase()
            }
            _ => unreachable!(),
        }
    }

    next_create(12, &mut rng)
}

fn bench_chains(c: &mut Criterion) {
    let a = SimpleSpace::new(3);

    // Nine compositions: everything embedded.
    let embedded = a + a + a + a + a + a + a + a + a + a;
    c.bench_function("eval_embedded_chain", |b| {
        b.iter(|| black_box(embedded.eval()));
    });

    // Same depth, erased at every step.
    let mut erased = a.erase();
    for _ in 0..9 {
        erased = (erased + a).erase();
    }
    c.bench_function("eval_erased_chain", |b| {
        b.iter(|| black_box(erased.eval()));
    });

    // Long chain crossing several budget boundaries.
    let mut long = a.erase();
    for _ in 0..100 {
        long = (long + a + a + a + a + a + a + a + a + a).erase();
    }
    c.bench_function("eval_long_chain", |b| {
        b.iter(|| black_box(long.eval()));
    });
}

fn bench_variables(c: &mut Criterion) {
    let storage = RefCell::new(SimpleSpace::new(44));
    let a = SimpleSpace::new(500);
    let aliased = name("z", a + Variable::aliased(&storage) + a + a + a);
    let shared = name("z", a + Variable::shared(&*storage.borrow()) + a + a + a);

    c.bench_function("eval_aliased_variable", |b| {
        b.iter(|| black_box(aliased.eval()));
    });
    c.bench_function("eval_shared_variable", |b| {
        b.iter(|| black_box(shared.eval()));
    });
}

fn bench_random_tree(c: &mut Criterion) {
    let tree = build_random_tree();

    c.bench_function("eval_random_tree", |b| {
        b.iter(|| black_box(tree.eval()));
    });
    c.bench_function("render_random_tree", |b| {
        b.iter(|| black_box(tree.render()));
    });
    c.bench_function("stats_random_tree", |b| {
        b.iter(|| black_box(stats(&tree)));
    });
}

criterion_group!(benches, bench_chains, bench_variables, bench_random_tree);
criterion_main!(benches);
