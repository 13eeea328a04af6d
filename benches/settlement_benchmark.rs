use criterion::{black_box, criterion_group, criterion_main, Criterion};
use potsplit::settlement::engine::SettlementEngine;
use potsplit::simulation::generator::{generate_random_table, TableConfig};

fn bench_settle_10_players(c: &mut Criterion) {
    let config = TableConfig {
        player_count: 10,
        ..Default::default()
    };
    let table = generate_random_table(&config);

    c.bench_function("settle_10_players", |b| {
        b.iter(|| SettlementEngine::settle(black_box(table.players())))
    });
}

fn bench_settle_100_players(c: &mut Criterion) {
    let config = TableConfig {
        player_count: 100,
        ..Default::default()
    };
    let table = generate_random_table(&config);

    c.bench_function("settle_100_players", |b| {
        b.iter(|| SettlementEngine::settle(black_box(table.players())))
    });
}

fn bench_settle_1000_players(c: &mut Criterion) {
    let config = TableConfig {
        player_count: 1000,
        ..Default::default()
    };
    let table = generate_random_table(&config);

    c.bench_function("settle_1000_players", |b| {
        b.iter(|| SettlementEngine::settle(black_box(table.players())))
    });
}

criterion_group!(
    benches,
    bench_settle_10_players,
    bench_settle_100_players,
    bench_settle_1000_players
);
criterion_main!(benches);
