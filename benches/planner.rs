//! Benchmarks for board evaluation, candidate filtering and MCTS search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use outpost_planner::core::{BoardState, Cell, Faction, GridPos, Outpost, WorldPos};
use outpost_planner::eval::{Evaluator, TriangleEvaluator};
use outpost_planner::mcts::{MCTSConfig, MCTSPlanner};
use outpost_planner::strategy::CandidateFilter;

const SIZE: i32 = 20;

/// Board with `count` outposts spread over three factions.
fn populated_board(count: u32) -> BoardState {
    let outposts = (0..count).map(|i| {
        let x = (i as i32 * 7) % SIZE;
        let y = (i as i32 * 13 + i as i32 / SIZE) % SIZE;
        Outpost::new(
            i,
            GridPos::new(x, y),
            WorldPos::new(x as f64, 0.0, y as f64),
            Faction::new((i % 3) as u8),
            4.0,
        )
    });
    BoardState::from_snapshot(SIZE, SIZE, outposts, |_| true)
}

fn cells(board: &BoardState) -> Vec<Cell> {
    board
        .available_cells()
        .iter()
        .map(|p| Cell::new(*p, WorldPos::new(p.x as f64, 0.0, p.y as f64)))
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let eval = TriangleEvaluator::default();

    for count in [10, 30, 60] {
        let board = populated_board(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &board, |b, board| {
            b.iter(|| eval.evaluate(black_box(board), Faction::new(0)))
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let board = populated_board(30);
    let candidates = cells(&board);
    let filter = CandidateFilter::default();

    c.bench_function("filter_30_outposts", |b| {
        b.iter(|| filter.filter(black_box(&board), Faction::new(0), &candidates, 15))
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_best_placement");
    group.sample_size(20);

    let board = populated_board(20);
    let candidates = CandidateFilter::default().filter(&board, Faction::new(0), &cells(&board), 15);

    for iterations in [200, 500, 1000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                let config = MCTSConfig::default().with_iterations(iterations);
                let mut planner = MCTSPlanner::new(config);
                b.iter(|| planner.find_best_placement(black_box(&board), Faction::new(0), &candidates))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_filter, bench_search);
criterion_main!(benches);
