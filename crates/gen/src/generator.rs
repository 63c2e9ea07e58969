use chrono::{DateTime, Duration, Local};
use nagare_core::{count_solutions, Board, Color, Direction};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngExt, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Parameters of one generation run.
#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct GenParams {
    pub width: usize,
    pub height: usize,
    /// Number of Black cells on the initial board.
    #[builder(default)]
    pub init_cells: usize,
    pub seed: u64,
}

/// A generated instance together with its provenance.
#[derive(Deserialize, Serialize, Debug)]
pub struct GeneratedProblem {
    params: GenParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    count_calls: u64,
    board: Board,
}

impl GeneratedProblem {
    #[must_use]
    pub const fn params(&self) -> &GenParams {
        &self.params
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Number of solution-count oracle calls the run needed.
    #[must_use]
    pub const fn count_calls(&self) -> u64 {
        self.count_calls
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A candidate cell placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub color: Color,
    pub dir: Direction,
}

/// Generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The initial-board fallback could not place the requested number of
    /// cells: the board admits no meaningful addition.
    InvalidInit { requested: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidInit { requested } => {
                write!(f, "cannot place {requested} initial cells on this board")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Every placement on a free cell that keeps the board meaningful and
/// connected, enumerated over White/Black times all five directions.
#[must_use]
pub fn meaningful_additions(board: &Board) -> Vec<Placement> {
    let mut probe = board.clone();
    let mut placements = Vec::new();
    for x in 1..=board.width() {
        for y in 1..=board.height() {
            if matches!(probe.color_at(x, y), Color::White | Color::Black) {
                continue;
            }
            for color in [Color::White, Color::Black] {
                for dir in Direction::ALL {
                    probe.set_cell(x, y, color, dir);
                    probe.properize();
                    if !probe.is_meaningless() && probe.is_connected() {
                        placements.push(Placement { x, y, color, dir });
                    }
                    probe.reset_cell(x, y);
                }
            }
        }
    }
    placements
}

/// Randomized generator of uniquely-solvable instances.
///
/// Uses repeated solution counting as an oracle: add meaningful cells
/// while more than one solution remains, then delete every cell whose
/// removal keeps the count, until exactly one solution survives.
pub struct Generator {
    seed: u64,
    rng: StdRng,
    count_calls: u64,
}

impl Generator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            count_calls: 0,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of oracle calls made so far.
    #[must_use]
    pub const fn count_calls(&self) -> u64 {
        self.count_calls
    }

    pub fn reset(&mut self) {
        self.count_calls = 0;
    }

    fn random(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }

    fn count(&mut self, board: &Board) -> String {
        self.count_calls += 1;
        count_solutions(board)
    }

    /// Generate a `width × height` board with a unique solution, starting
    /// from `init_cells` random Black cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInit`] when `init_cells` placements cannot
    /// be sampled on an empty board at all.
    pub fn generate(
        &mut self,
        width: usize,
        height: usize,
        init_cells: usize,
    ) -> Result<Board, Error> {
        loop {
            let mut board = self.initial_board(width, height, init_cells);
            let mut count = self.count(&board);
            while count == "0" {
                tracing::debug!("unsatisfiable initial board, resampling");
                board = self.init_board(width, height, init_cells)?;
                count = self.count(&board);
            }
            tracing::debug!(%count, "initial board");

            for _ in 0..10 {
                count = self.add_cells(&mut board, count);
                count = self.del_cells(&mut board, &count);
                if count == "1" {
                    break;
                }
            }

            if count == "1" {
                return Ok(board);
            }
            tracing::debug!(%count, "count not unique, restarting");
        }
    }

    /// First-shot initial board: up to `init_cells` Black cells with random
    /// directions at random positions, dropping placements that break the
    /// board.
    fn initial_board(&mut self, width: usize, height: usize, init_cells: usize) -> Board {
        let mut board = Board::new(width, height);
        if init_cells > 0 {
            let mut perm: Vec<usize> = (0..width * height).collect();
            perm.shuffle(&mut self.rng);

            let mut placed = 0;
            for &i in &perm {
                let x = i % width + 1;
                let y = i / width + 1;
                let dir = Direction::ALL[self.random(Direction::ALL.len())];

                board.set_cell(x, y, Color::Black, dir);
                board.properize();
                if board.is_meaningless() || !board.is_connected() {
                    board.reset_cell(x, y);
                } else {
                    placed += 1;
                    if placed == init_cells {
                        break;
                    }
                }
            }
        }
        board.properize();
        board
    }

    /// Fallback initial board: sample `init_cells` placements from the
    /// meaningful additions only.
    fn init_board(
        &mut self,
        width: usize,
        height: usize,
        init_cells: usize,
    ) -> Result<Board, Error> {
        let mut board = Board::new(width, height);
        for _ in 0..init_cells {
            let candidates = meaningful_additions(&board);
            if candidates.is_empty() {
                return Err(Error::InvalidInit {
                    requested: init_cells,
                });
            }
            let pick = candidates[self.random(candidates.len())];
            board.set_cell(pick.x, pick.y, pick.color, pick.dir);
        }
        board.properize();
        Ok(board)
    }

    /// Keep adding random meaningful cells while the count stays above one,
    /// backtracking over placements that kill all solutions.
    fn add_cells(&mut self, board: &mut Board, mut count: String) -> String {
        loop {
            tracing::debug!(%count, "add pass");
            if count == "1" {
                return count;
            }

            let mut candidates = meaningful_additions(board);
            let mut advanced = false;
            while !candidates.is_empty() {
                let pick = candidates.swap_remove(self.random(candidates.len()));

                board.set_cell(pick.x, pick.y, pick.color, pick.dir);
                board.properize();
                let next = self.count(board);
                if next != "0" {
                    count = next;
                    advanced = true;
                    break;
                }

                board.reset_cell(pick.x, pick.y);
                board.properize();
            }

            if !advanced {
                return count;
            }
        }
    }

    /// Delete every White/Black cell whose removal keeps the exact count,
    /// sweeping until a fixed point.
    fn del_cells(&mut self, board: &mut Board, target: &str) -> String {
        loop {
            tracing::debug!(count = %target, "delete pass");
            let mut deleted = false;
            for x in 1..=board.width() {
                for y in 1..=board.height() {
                    if !matches!(board.color_at(x, y), Color::White | Color::Black) {
                        continue;
                    }

                    let mut probe = board.clone();
                    probe.reset_cell(x, y);
                    probe.properize();
                    if probe.is_meaningless() {
                        continue;
                    }

                    let count = self.count(&probe);
                    if count == target {
                        board.reset_cell(x, y);
                        board.properize();
                        deleted = true;
                    }
                }
            }
            if !deleted {
                return target.to_owned();
            }
        }
    }
}

/// Generate `n_problems` independent instances in parallel, one derived
/// seed (`params.seed + i`) per instance. Each instance is generated by
/// its own single-threaded [`Generator`].
///
/// # Errors
///
/// Propagates the first [`Error`] any instance hits.
pub fn generate_many(params: &GenParams, n_problems: u64) -> Result<Vec<GeneratedProblem>, Error> {
    (0..n_problems)
        .into_par_iter()
        .map(|i| {
            let seed = params.seed.wrapping_add(i);
            let mut generator = Generator::new(seed);
            let start = Local::now();
            let board = generator.generate(params.width, params.height, params.init_cells)?;
            let end = Local::now();
            Ok(GeneratedProblem {
                params: GenParams {
                    seed,
                    ..params.clone()
                },
                info: "generated".to_owned(),
                start,
                end,
                count_calls: generator.count_calls(),
                board,
            })
        })
        .collect()
}
