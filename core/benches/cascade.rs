use chrono::{DateTime, Utc};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minelog_core::*;
use std::hint::black_box;

fn env() -> FixedEnvironment {
    FixedEnvironment::new("bench", DateTime::<Utc>::UNIX_EPOCH)
}

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
        ("dense_40x40", GameConfig::new_unchecked(40, 40, 1200)),
    ] {
        let mut seed = 0u64;
        group.bench_function(name, |b| {
            b.iter(|| {
                seed += 1;
                black_box(RandomGridGenerator::new(seed).generate(black_box(config)))
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    // a single mine in the far corner leaves one big empty region
    let grid = Grid::from_mine_coords((40, 40), &[(39, 39)]).unwrap();

    c.bench_function("cascade_40x40", |b| {
        b.iter_batched(
            || Game::start(grid.clone(), env()).unwrap(),
            |mut game| black_box(game.reveal_cell("A1").unwrap()),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("replay_40x40", |b| {
        let mut game = Game::start(grid.clone(), env()).unwrap();
        game.reveal_cell("A1").unwrap();
        let events = game.into_events();
        b.iter_batched(
            || events.clone(),
            |events| black_box(Game::replay(events, env()).unwrap().version()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, generation, flood_fill);
criterion_main!(benches);
