use nagare_core::{count_solutions, Board, Color, Direction};
use nagare_gen::{meaningful_additions, Generator};

#[test]
fn empty_board_has_meaningful_additions() {
    let additions = meaningful_additions(&Board::new(3, 3));
    assert!(!additions.is_empty());

    // Every reported placement really keeps the board meaningful.
    for placement in additions {
        let mut board = Board::new(3, 3);
        board.set_cell(placement.x, placement.y, placement.color, placement.dir);
        board.properize();
        assert!(!board.is_meaningless(), "{placement:?}");
        assert!(board.is_connected(), "{placement:?}");
    }
}

#[test]
fn occupied_cells_are_not_offered() {
    let board = Board::with_cells(3, 3, [(2, 2, Color::Black, Direction::None)]);
    let additions = meaningful_additions(&board);
    assert!(additions.iter().all(|p| (p.x, p.y) != (2, 2)));
}

#[test]
fn generation_is_deterministic_per_seed() {
    let mut first = Generator::new(7);
    let mut second = Generator::new(7);
    let a = first.generate(4, 4, 1).unwrap();
    let b = second.generate(4, 4, 1).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.count_calls(), second.count_calls());
}

#[test]
fn generated_boards_have_a_unique_solution() {
    for seed in [1, 2, 3] {
        let mut generator = Generator::new(seed);
        let board = generator.generate(4, 4, 1).unwrap();

        assert_eq!(count_solutions(&board), "1", "seed {seed}");
        assert!(board.is_proper());
        assert!(!board.is_meaningless());
        assert!(generator.count_calls() > 0);
    }
}

#[test]
fn deleting_a_cell_never_lowers_the_count() {
    // The generator's delete phase relies on removal preserving or
    // growing the solution set.
    let board = Board::with_cells(
        3,
        3,
        [
            (2, 2, Color::Black, Direction::None),
            (1, 1, Color::Black, Direction::None),
        ],
    );
    let with_both: u64 = count_solutions(&board).parse().unwrap();

    let mut fewer = board.clone();
    fewer.reset_cell(1, 1);
    fewer.properize();
    let with_one: u64 = count_solutions(&fewer).parse().unwrap();

    assert!(with_one >= with_both);
}
