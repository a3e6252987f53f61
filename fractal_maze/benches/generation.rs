// Full-pipeline throughput: expansion, turtle, carving, framing.
//
// Run with: cargo bench -p fractal_maze --bench generation

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fractal_maze::carver;
use fractal_maze::config::MazeConfig;
use fractal_maze::difficulty::MazeGenerator;
use fractal_maze::grammar::Grammar;
use fractal_maze::prng::GameRng;
use fractal_maze::turtle;
use fractal_maze::types::Vec2;

fn bench_first_level(c: &mut Criterion) {
    c.bench_function("first_level_default", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut rng = GameRng::new(seed);
            black_box(MazeGenerator::new(MazeConfig::default(), &mut rng).unwrap())
        })
    });
}

fn bench_carve_by_depth(c: &mut Criterion) {
    let config = MazeConfig::default();
    let grammar = Grammar::from_params(&config.grammar).unwrap();
    let commands = grammar.expand(config.grammar.iterations, &mut GameRng::new(7));

    let mut group = c.benchmark_group("carve");
    for max_depth in [5, 9, 13] {
        let segments = turtle::interpret(&commands, Vec2::new(0.0, -4.0), &config.turtle, max_depth)
            .unwrap()
            .segments;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("depth{max_depth}_{}seg", segments.len())),
            &segments,
            |b, segments| {
                let mut rng = GameRng::new(3);
                b.iter(|| {
                    let mut level = segments.clone();
                    black_box(carver::carve(&mut level, &config.carve, 30, &mut rng))
                })
            },
        );
    }
    group.finish();
}

fn bench_descent_run(c: &mut Criterion) {
    c.bench_function("five_fast_descents", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(11);
            let mut generator = MazeGenerator::new(MazeConfig::default(), &mut rng).unwrap();
            for _ in 0..5 {
                generator.advance(10.0);
                generator.regenerate(true, &mut rng).unwrap();
            }
            black_box(generator.level().segments.len())
        })
    });
}

criterion_group!(benches, bench_first_level, bench_carve_by_depth, bench_descent_run);
criterion_main!(benches);
