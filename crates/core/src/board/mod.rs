//! The Nagareru board: a `W×H` grid of colored, directed cells.
//!
//! Cells are addressed two ways: by 1-based coordinates `(x, y)` with `y`
//! growing downwards, or by the row-major index `pos(x, y) = W·(y−1) +
//! (x−1)`. The board owns the derived state recomputed by [`Board::properize`]:
//! Gray wind cells, the valid-edge list, and the white-cell/white-edge
//! counters the solver's closure guard relies on.

pub mod cnf;
mod display;
pub mod dot;
pub mod types;

pub use types::{Color, Direction};

/// A Nagareru puzzle board.
///
/// Mutations go through [`set_cell`](Self::set_cell) /
/// [`reset_cell`](Self::reset_cell) followed by a
/// [`properize`](Self::properize) call; every constructor leaves the board
/// properized.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    colors: Vec<Color>,
    directions: Vec<Vec<Direction>>,
    edges: Vec<(usize, usize)>,
    num_white_cells: usize,
    num_white_edges: usize,
    last_white_edge: usize,
}

impl Board {
    /// An empty properized `width × height` board.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        let mut board = Self {
            width,
            height,
            colors: vec![Color::None; cells],
            directions: vec![Vec::new(); cells],
            edges: Vec::new(),
            num_white_cells: 0,
            num_white_edges: 0,
            last_white_edge: 0,
        };
        board.properize();
        board
    }

    /// Build a board from `(x, y, color, direction)` placements.
    ///
    /// # Panics
    ///
    /// Panics if a placement is out of range or not White/Black, as with
    /// [`set_cell`](Self::set_cell).
    #[must_use]
    pub fn with_cells<I>(width: usize, height: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, Color, Direction)>,
    {
        let mut board = Self::new(width, height);
        for (x, y, color, dir) in cells {
            board.set_cell(x, y, color, dir);
        }
        board.properize();
        board
    }

    // -- geometry -------------------------------------------------------------

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Row-major index of `(x, y)` (both 1-based).
    #[must_use]
    pub const fn pos(&self, x: usize, y: usize) -> usize {
        self.width * (y - 1) + (x - 1)
    }

    #[must_use]
    pub const fn on_board(&self, x: usize, y: usize) -> bool {
        1 <= x && x <= self.width && 1 <= y && y <= self.height
    }

    /// The neighbor of `(x, y)` one step in `dir`, or `None` when off-board
    /// (also for `Direction::None`, which steps nowhere but is never needed
    /// on-board).
    #[must_use]
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        if dir == Direction::None {
            return None;
        }
        let (dx, dy) = dir.step();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.on_board(nx, ny).then_some((nx, ny))
    }

    /// Compass direction from cell `i` to adjacent cell `j`, `None` if the
    /// indices are not grid neighbors.
    #[must_use]
    pub const fn relative_direction(&self, i: usize, j: usize) -> Direction {
        if i + 1 == j {
            Direction::Right
        } else if j + 1 == i {
            Direction::Left
        } else if i + self.width == j {
            Direction::Down
        } else if j + self.width == i {
            Direction::Up
        } else {
            Direction::None
        }
    }

    // -- cell access ----------------------------------------------------------

    #[must_use]
    pub fn color(&self, i: usize) -> Color {
        self.colors[i]
    }

    #[must_use]
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        self.colors[self.pos(x, y)]
    }

    #[must_use]
    pub fn directions(&self, i: usize) -> &[Direction] {
        &self.directions[i]
    }

    #[must_use]
    pub fn directions_at(&self, x: usize, y: usize) -> &[Direction] {
        &self.directions[self.pos(x, y)]
    }

    fn first_direction_at(&self, x: usize, y: usize) -> Direction {
        self.directions[self.pos(x, y)]
            .first()
            .copied()
            .unwrap_or(Direction::None)
    }

    #[must_use]
    pub const fn num_white_cells(&self) -> usize {
        self.num_white_cells
    }

    #[must_use]
    pub const fn num_white_edges(&self) -> usize {
        self.num_white_edges
    }

    /// Index (into [`edges`](Self::edges)) of the last edge incident to a
    /// White cell; 0 when there is none.
    #[must_use]
    pub const fn last_white_edge(&self) -> usize {
        self.last_white_edge
    }

    /// The valid edges, as `(i, j)` cell-index pairs with `i < j`, in
    /// row-major scan order emitting horizontal before vertical.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    // -- mutation -------------------------------------------------------------

    /// Overwrite a cell with a White or Black placement carrying a single
    /// direction. Call [`properize`](Self::properize) afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of range or `color` is not White/Black.
    pub fn set_cell(&mut self, x: usize, y: usize, color: Color, dir: Direction) {
        assert!(self.on_board(x, y), "cell ({x}, {y}) out of range");
        assert!(
            matches!(color, Color::White | Color::Black),
            "only White and Black cells can be placed"
        );
        let i = self.pos(x, y);
        self.colors[i] = color;
        self.directions[i] = vec![dir];
    }

    /// Clear a cell back to colorless. Call [`properize`](Self::properize)
    /// afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of range.
    pub fn reset_cell(&mut self, x: usize, y: usize) {
        assert!(self.on_board(x, y), "cell ({x}, {y}) out of range");
        let i = self.pos(x, y);
        self.colors[i] = Color::None;
        self.directions[i].clear();
    }

    // -- winds ----------------------------------------------------------------

    /// The winds reaching `(x, y)`: for each compass ray, the nearest Black
    /// cell's wind if it blows back towards `(x, y)`. Order: Up, Down,
    /// Left, Right.
    #[must_use]
    pub fn winds(&self, x: usize, y: usize) -> Vec<Direction> {
        let mut winds = Vec::new();

        // A Black cell below blowing Up.
        for z in (y + 1)..=self.height {
            if self.color_at(x, z) == Color::Black {
                if self.first_direction_at(x, z) == Direction::Up {
                    winds.push(Direction::Up);
                }
                break;
            }
        }

        // Above, blowing Down.
        for z in (1..y).rev() {
            if self.color_at(x, z) == Color::Black {
                if self.first_direction_at(x, z) == Direction::Down {
                    winds.push(Direction::Down);
                }
                break;
            }
        }

        // Right of, blowing Left.
        for z in (x + 1)..=self.width {
            if self.color_at(z, y) == Color::Black {
                if self.first_direction_at(z, y) == Direction::Left {
                    winds.push(Direction::Left);
                }
                break;
            }
        }

        // Left of, blowing Right.
        for z in (1..x).rev() {
            if self.color_at(z, y) == Color::Black {
                if self.first_direction_at(z, y) == Direction::Right {
                    winds.push(Direction::Right);
                }
                break;
            }
        }

        winds
    }

    // -- properization --------------------------------------------------------

    /// Recompute all derived state: Gray wind cells, the valid-edge list,
    /// and the white counters. Idempotent.
    pub fn properize(&mut self) {
        // Gray cells are entirely derived; start from scratch.
        for i in 0..self.colors.len() {
            if self.colors[i] == Color::Gray {
                self.colors[i] = Color::None;
                self.directions[i].clear();
            }
        }

        // Each Black cell paints its wind along the ray it blows, stopping
        // at the next Black cell. White cells stay White but stay
        // transparent to the wind.
        for x in 1..=self.width {
            for y in 1..=self.height {
                if self.color_at(x, y) != Color::Black {
                    continue;
                }
                let wind = self.first_direction_at(x, y);
                if wind == Direction::None {
                    continue;
                }
                let (mut cx, mut cy) = (x, y);
                while let Some((nx, ny)) = self.neighbor(cx, cy, wind) {
                    let i = self.pos(nx, ny);
                    match self.colors[i] {
                        Color::Black => break,
                        Color::White => {}
                        _ => {
                            self.colors[i] = Color::Gray;
                            self.directions[i].push(wind);
                        }
                    }
                    (cx, cy) = (nx, ny);
                }
            }
        }

        // Rebuild the edge list in row-major order, horizontal first.
        self.edges.clear();
        for i in 0..self.width * self.height {
            if self.is_valid_edge(i, i + 1) {
                self.edges.push((i, i + 1));
            }
            if self.is_valid_edge(i, i + self.width) {
                self.edges.push((i, i + self.width));
            }
        }

        self.num_white_cells = self.colors.iter().filter(|&&c| c == Color::White).count();

        self.num_white_edges = 0;
        self.last_white_edge = 0;
        for (k, &(a, b)) in self.edges.iter().enumerate() {
            if self.colors[a] == Color::White || self.colors[b] == Color::White {
                self.num_white_edges += 1;
                self.last_white_edge = k;
            }
        }
    }

    // -- validity predicates ---------------------------------------------------

    /// A node the solution cycle may pass through: on-board, not Black, and
    /// if Gray, free of head-on wind pairs.
    #[must_use]
    pub fn is_valid_node(&self, i: usize) -> bool {
        if i >= self.width * self.height {
            return false;
        }
        if self.colors[i] == Color::Black {
            return false;
        }
        if self.colors[i] == Color::Gray {
            let dirs = &self.directions[i];
            for (j, &a) in dirs.iter().enumerate() {
                if dirs[j + 1..].contains(&a.opposite()) {
                    return false;
                }
            }
        }
        true
    }

    /// A grid edge both the geometry and the cell constraints allow.
    #[must_use]
    pub fn is_valid_edge(&self, i: usize, j: usize) -> bool {
        if i > j {
            return self.is_valid_edge(j, i);
        }

        // Must be a horizontal or vertical grid step without wrapping.
        if i + 1 != j && i + self.width != j {
            return false;
        }
        if i + 1 == j && (i + 1) % self.width == 0 {
            return false;
        }
        if i + self.width == j && i + self.width >= self.width * self.height {
            return false;
        }

        if !self.is_valid_node(i) || !self.is_valid_node(j) {
            return false;
        }

        // A White cell only admits edges parallel to its arrow.
        let dij = self.relative_direction(i, j);
        let dji = self.relative_direction(j, i);
        for cell in [i, j] {
            if self.colors[cell] == Color::White {
                let arrow = self.directions[cell]
                    .first()
                    .copied()
                    .unwrap_or(Direction::None);
                if dij != arrow && dji != arrow {
                    return false;
                }
            }
        }

        true
    }

    /// A White cell that can never sit on a solution cycle (or that
    /// contradicts the winds reaching it).
    #[must_use]
    pub fn is_meaningless_white_cell(&self, x: usize, y: usize) -> bool {
        if self.color_at(x, y) != Color::White {
            return false;
        }

        let arrow = self.first_direction_at(x, y);
        if arrow == Direction::None {
            return true;
        }

        // The cell must be windless or reached exactly by its own arrow.
        let winds = self.winds(x, y);
        if winds.len() > 1 || (winds.len() == 1 && winds[0] != arrow) {
            return true;
        }

        // Both neighbors along the arrow axis must exist and be passable.
        let Some((fx, fy)) = self.neighbor(x, y, arrow) else {
            return true;
        };
        let Some((bx, by)) = self.neighbor(x, y, arrow.opposite()) else {
            return true;
        };

        for (nx, ny) in [(fx, fy), (bx, by)] {
            match self.color_at(nx, ny) {
                Color::Black => return true,
                Color::White if self.first_direction_at(nx, ny) != arrow => return true,
                _ => {}
            }
        }

        false
    }

    /// A Black cell blowing into a wall or another Black cell, or standing
    /// in its own wind.
    #[must_use]
    pub fn is_meaningless_black_cell(&self, x: usize, y: usize) -> bool {
        if self.color_at(x, y) != Color::Black {
            return false;
        }

        let wind = self.first_direction_at(x, y);

        // Another Black cell blows straight back at this one.
        if self.winds(x, y).contains(&wind.opposite()) {
            return true;
        }

        if wind != Direction::None {
            match self.neighbor(x, y, wind) {
                None => return true,
                Some((nx, ny)) if self.color_at(nx, ny) == Color::Black => return true,
                Some(_) => {}
            }
        }

        false
    }

    /// Any cell on the board is meaningless.
    #[must_use]
    pub fn is_meaningless(&self) -> bool {
        for x in 1..=self.width {
            for y in 1..=self.height {
                if self.is_meaningless_white_cell(x, y) || self.is_meaningless_black_cell(x, y) {
                    return true;
                }
            }
        }
        false
    }

    /// The properization invariants hold: direction lists match colors and
    /// Gray cells carry exactly the winds reaching them.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        for x in 1..=self.width {
            for y in 1..=self.height {
                let dirs = self.directions_at(x, y);
                match self.color_at(x, y) {
                    Color::White => {
                        if dirs.len() != 1 || dirs[0] == Direction::None {
                            return false;
                        }
                    }
                    Color::Black => {
                        if dirs.len() != 1 {
                            return false;
                        }
                    }
                    Color::Gray => {
                        let winds = self.winds(x, y);
                        if dirs.len() != winds.len() {
                            return false;
                        }
                        if dirs.iter().any(|d| !winds.contains(d)) {
                            return false;
                        }
                    }
                    Color::None => {
                        if !dirs.is_empty() {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Every non-Black cell is reachable over the valid-edge list.
    /// Requires a properized board.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let cells = self.width * self.height;
        let Some(&(seed, _)) = self.edges.first() else {
            return self.colors.iter().all(|&c| c == Color::Black);
        };

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); cells];
        for &(a, b) in &self.edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }

        let mut visited = vec![false; cells];
        let mut stack = vec![seed];
        visited[seed] = true;
        while let Some(i) = stack.pop() {
            for &j in &adjacency[i] {
                if !visited[j] {
                    visited[j] = true;
                    stack.push(j);
                }
            }
        }

        (0..cells).all(|i| self.colors[i] == Color::Black || visited[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_edges_in_scan_order() {
        let board = Board::new(2, 2);
        assert_eq!(board.edges(), &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn properize_is_idempotent() {
        let mut board = Board::with_cells(4, 4, [(2, 2, Color::Black, Direction::Right)]);
        let once = board.clone();
        board.properize();
        assert_eq!(board, once);
        assert!(board.is_proper());
    }

    #[test]
    fn black_paints_its_ray_gray() {
        let board = Board::with_cells(4, 1, [(1, 1, Color::Black, Direction::Right)]);
        assert_eq!(board.color_at(2, 1), Color::Gray);
        assert_eq!(board.color_at(3, 1), Color::Gray);
        assert_eq!(board.color_at(4, 1), Color::Gray);
        assert_eq!(board.directions_at(3, 1), &[Direction::Right]);
    }

    #[test]
    fn white_is_transparent_to_wind_but_unpainted() {
        let board = Board::with_cells(
            4,
            1,
            [
                (1, 1, Color::Black, Direction::Right),
                (2, 1, Color::White, Direction::Right),
            ],
        );
        assert_eq!(board.color_at(2, 1), Color::White);
        // The wind passes through the White cell.
        assert_eq!(board.color_at(3, 1), Color::Gray);
        assert_eq!(board.directions_at(3, 1), &[Direction::Right]);
    }

    #[test]
    fn wind_is_blocked_by_black() {
        let board = Board::with_cells(
            5,
            1,
            [
                (1, 1, Color::Black, Direction::Right),
                (3, 1, Color::Black, Direction::None),
            ],
        );
        assert_eq!(board.color_at(2, 1), Color::Gray);
        assert_eq!(board.color_at(4, 1), Color::None);
        assert_eq!(board.color_at(5, 1), Color::None);
    }

    #[test]
    fn winds_report_only_backblowing_blacks() {
        let board = Board::with_cells(
            3,
            3,
            [
                (1, 2, Color::Black, Direction::Right),
                (2, 1, Color::Black, Direction::Up),
            ],
        );
        // (1,2) blows Right into row 2; (2,1) blows Up, away from (2,2).
        assert_eq!(board.winds(2, 2), vec![Direction::Right]);
        assert_eq!(board.winds(3, 2), vec![Direction::Right]);
        assert_eq!(board.winds(2, 3), vec![]);
    }

    #[test]
    fn white_arrow_restricts_edges() {
        let board = Board::with_cells(3, 3, [(2, 2, Color::White, Direction::Up)]);
        let center = board.pos(2, 2);
        // Vertical edges survive, horizontal ones do not.
        assert!(board.is_valid_edge(center - 3, center));
        assert!(board.is_valid_edge(center, center + 3));
        assert!(!board.is_valid_edge(center - 1, center));
        assert!(!board.is_valid_edge(center, center + 1));
    }

    #[test]
    fn gray_with_headon_winds_is_invalid_node() {
        let board = Board::with_cells(
            3,
            1,
            [
                (1, 1, Color::Black, Direction::Right),
                (3, 1, Color::Black, Direction::Left),
            ],
        );
        assert_eq!(board.color_at(2, 1), Color::Gray);
        assert!(!board.is_valid_node(board.pos(2, 1)));
    }

    #[test]
    fn edges_do_not_wrap_rows() {
        let board = Board::new(3, 2);
        // pos(3,1) = 2 and pos(1,2) = 3 are consecutive indices but not
        // neighbors.
        assert!(!board.edges().contains(&(2, 3)));
    }

    #[test]
    fn meaningless_white_off_board_arrow() {
        // S4: the arrow axis leaves the board.
        let board = Board::with_cells(2, 2, [(1, 1, Color::White, Direction::Up)]);
        assert!(board.is_meaningless_white_cell(1, 1));
        assert!(board.is_meaningless());
    }

    #[test]
    fn meaningless_black_facing_wall_or_black() {
        let facing_wall = Board::with_cells(3, 3, [(1, 1, Color::Black, Direction::Left)]);
        assert!(facing_wall.is_meaningless_black_cell(1, 1));

        let facing_black = Board::with_cells(
            3,
            3,
            [
                (1, 1, Color::Black, Direction::Right),
                (2, 1, Color::Black, Direction::None),
            ],
        );
        assert!(facing_black.is_meaningless_black_cell(1, 1));

        let fine = Board::with_cells(3, 3, [(1, 1, Color::Black, Direction::Right)]);
        assert!(!fine.is_meaningless_black_cell(1, 1));
    }

    #[test]
    fn blacks_blowing_at_each_other_are_meaningless() {
        let board = Board::with_cells(
            4,
            1,
            [
                (1, 1, Color::Black, Direction::Right),
                (4, 1, Color::Black, Direction::Left),
            ],
        );
        assert!(board.is_meaningless_black_cell(1, 1));
        assert!(board.is_meaningless_black_cell(4, 1));
    }

    #[test]
    fn connectivity_around_a_black_wall() {
        // A full-height Black column splits the board.
        let split = Board::with_cells(
            3,
            2,
            [
                (2, 1, Color::Black, Direction::None),
                (2, 2, Color::Black, Direction::None),
            ],
        );
        assert!(!split.is_connected());

        let open = Board::with_cells(3, 2, [(2, 1, Color::Black, Direction::None)]);
        assert!(open.is_connected());
    }

    #[test]
    fn white_counters_track_last_white_edge() {
        let mut board = Board::new(3, 3);
        assert_eq!(board.num_white_edges(), 0);
        assert_eq!(board.last_white_edge(), 0);

        board.set_cell(2, 2, Color::White, Direction::Up);
        board.properize();
        assert_eq!(board.num_white_cells(), 1);
        assert_eq!(board.num_white_edges(), 2);
        let center = board.pos(2, 2);
        let last = board.edges()[board.last_white_edge()];
        assert_eq!(last, (center, center + 3));
    }
}
