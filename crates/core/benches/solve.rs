use criterion::{criterion_group, criterion_main, Criterion};
use nagare_core::{count_solutions, Board, Color, Direction};

fn bench_empty_boards(c: &mut Criterion) {
    let mut group = c.benchmark_group("empty-board");
    for size in [4, 5, 6] {
        let board = Board::new(size, size);
        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter(|| count_solutions(&board));
        });
    }
    group.finish();
}

fn bench_constrained_board(c: &mut Criterion) {
    let board = Board::with_cells(
        6,
        6,
        [
            (2, 2, Color::Black, Direction::Right),
            (5, 5, Color::Black, Direction::Up),
            (3, 4, Color::White, Direction::Left),
        ],
    );
    c.bench_function("constrained-6x6", |b| {
        b.iter(|| count_solutions(&board));
    });
}

criterion_group!(benches, bench_empty_boards, bench_constrained_board);
criterion_main!(benches);
