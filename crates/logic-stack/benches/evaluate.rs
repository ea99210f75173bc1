use divan::{black_box, Bencher};
use logic_stack::{Expression, LogicStack, Op};
use rand::Rng;

const POINTS: usize = 1024;

fn random_senses(surfaces: usize) -> Vec<Vec<bool>> {
    let mut rng = rand::thread_rng();
    (0..POINTS)
        .map(|_| (0..=surfaces).map(|_| rng.gen()).collect())
        .collect()
}

#[divan::bench]
fn push_and_reduce(bencher: Bencher) {
    let values: Vec<bool> = {
        let mut rng = rand::thread_rng();
        (0..LogicStack::max_stack_depth()).map(|_| rng.gen()).collect()
    };

    bencher.bench(|| {
        let mut stack = LogicStack::new();
        for &value in black_box(&values) {
            stack.push(value);
        }
        for i in 1..values.len() {
            if i % 2 == 0 {
                stack.apply_and();
            } else {
                stack.apply_or();
            }
            stack.apply_not();
        }
        stack.pop()
    });
}

#[divan::bench]
fn op_dispatch(bencher: Bencher) {
    let program = [
        Op::Push(true),
        Op::Push(false),
        Op::Not,
        Op::Push(true),
        Op::And,
        Op::Or,
        Op::Pop,
    ];

    bencher.bench(|| {
        let mut stack = LogicStack::new();
        let mut result = None;
        for op in black_box(&program) {
            result = op.apply(&mut stack);
        }
        result
    });
}

#[divan::bench(args = ["1 -2 3 -4 5 -6", "1 -2 | ~(3 4) | 5 (-6 | 7)"])]
fn region_contains(bencher: Bencher, region: &str) {
    let expression: Expression = region.parse().unwrap();
    let senses = random_senses(7);

    bencher.bench(|| {
        senses
            .iter()
            .filter(|point| expression.contains(|surface| point[surface as usize]))
            .count()
    });
}

#[divan::bench(args = ["1 -2 3 -4 5 -6", "1 -2 | ~(3 4) | 5 (-6 | 7)"])]
fn region_evaluate_on_stack(bencher: Bencher, region: &str) {
    let expression: Expression = region.parse().unwrap();
    let senses = random_senses(7);

    bencher.bench(|| {
        senses
            .iter()
            .filter(|point| expression.evaluate(|surface| point[surface as usize], &mut ()))
            .count()
    });
}

fn main() {
    divan::main();
}
