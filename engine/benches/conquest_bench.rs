use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use conquest::ai::random_turn;
use conquest::board::{Map, Owner, Position, Territory, TerritoryId};
use conquest::config::GameConfig;
use conquest::game::Game;
use conquest::protocol::notation::{encode_board, parse_board};
use conquest::rules::{apply_growth, attack, check_outcome, AttackRules};
use conquest::selfplay::{play_game, SelfPlayConfig};

/// A ring of `n` territories alternating player and enemy, each linked to
/// both neighbours.
fn ring(n: usize) -> Map {
    let mut map = Map::new();
    for i in 0..n {
        let owner = if i % 2 == 0 { Owner::Player } else { Owner::Enemy };
        map.add_territory(Territory::new(Position::default(), 50, 3, owner));
    }
    for i in 0..n {
        map.connect_both(TerritoryId(i), TerritoryId((i + 1) % n)).unwrap();
    }
    map
}

fn bench_attack(c: &mut Criterion) {
    let base = Map::standard();
    let rules = AttackRules::default();
    c.bench_function("attack_capture_neutral", |b| {
        b.iter(|| {
            let mut map = base.clone();
            attack(
                &mut map,
                black_box(TerritoryId(0)),
                black_box(TerritoryId(1)),
                10,
                &rules,
            )
        })
    });
}

fn bench_growth(c: &mut Criterion) {
    let mut map = ring(256);
    c.bench_function("growth_ring_256", |b| b.iter(|| apply_growth(black_box(&mut map))));
}

fn bench_outcome(c: &mut Criterion) {
    let map = ring(256);
    c.bench_function("check_outcome_ring_256", |b| {
        b.iter(|| check_outcome(black_box(&map)))
    });
}

fn bench_random_turn(c: &mut Criterion) {
    let base = ring(256);
    let rules = AttackRules::default();
    let mut rng = SmallRng::seed_from_u64(42);
    c.bench_function("random_turn_ring_256", |b| {
        b.iter(|| {
            let mut map = base.clone();
            random_turn(Owner::Enemy, &mut map, &mut rng, &rules)
        })
    });
}

fn bench_game_frames(c: &mut Criterion) {
    c.bench_function("game_1000_frames", |b| {
        b.iter(|| {
            let mut game = Game::with_seed(GameConfig::default(), 7).unwrap();
            for _ in 0..1000 {
                game.update(black_box(Duration::from_millis(100)));
            }
            game.status()
        })
    });
}

fn bench_notation(c: &mut Criterion) {
    let map = ring(64);
    let encoded = encode_board(&map);
    c.bench_function("encode_board_ring_64", |b| b.iter(|| encode_board(black_box(&map))));
    c.bench_function("parse_board_ring_64", |b| {
        b.iter(|| parse_board(black_box(&encoded)).unwrap())
    });
}

fn bench_selfplay_game(c: &mut Criterion) {
    let config = SelfPlayConfig {
        quiet: true,
        max_frames: 2_000,
        ..Default::default()
    };
    let mut group = c.benchmark_group("selfplay");
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("single_game", |b| b.iter(|| play_game(black_box(&config), 0)));
    group.finish();
}

criterion_group!(
    benches,
    bench_attack,
    bench_growth,
    bench_outcome,
    bench_random_turn,
    bench_game_frames,
    bench_notation,
    bench_selfplay_game,
);
criterion_main!(benches);
