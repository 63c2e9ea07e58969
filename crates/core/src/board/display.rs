use core::fmt::{self, Display, Formatter};

use crate::board::types::Color;
use crate::board::Board;

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Width   : {}", self.width())?;
        writeln!(f, "Height  : {}", self.height())?;
        writeln!(f, "# White Cells : {}", self.num_white_cells())?;
        writeln!(f, "# White Edges : {}", self.num_white_edges())?;
        writeln!(f, "Proper ? : {}", if self.is_proper() { "Yes" } else { "No" })?;
        for x in 1..=self.width() {
            for y in 1..=self.height() {
                let dirs = self.directions_at(x, y);
                write!(f, "({x},{y}) = [{}:", self.color_at(x, y))?;
                for (k, d) in dirs.iter().enumerate() {
                    if k > 0 {
                        write!(f, "&")?;
                    }
                    write!(f, "{d}")?;
                }
                writeln!(f, "]")?;
            }
        }
        Ok(())
    }
}

impl Board {
    /// Render the board in the `pzprv3` text format.
    ///
    /// White cells become the lowercase initial of their arrow, Black cells
    /// the uppercase one; Gray and empty cells are `.` since Gray is derived
    /// state. The output parses back to an equal board.
    #[must_use]
    pub fn to_pzprv3(&self) -> String {
        let mut out = String::new();
        out.push_str("pzprv3\nnagare\n");
        out.push_str(&self.height().to_string());
        out.push('\n');
        out.push_str(&self.width().to_string());
        out.push('\n');
        for y in 1..=self.height() {
            for x in 1..=self.width() {
                let token = match self.color_at(x, y) {
                    Color::White => self.directions_at(x, y)[0].letter().to_ascii_lowercase(),
                    Color::Black => self.directions_at(x, y)[0].letter(),
                    Color::Gray | Color::None => '.',
                };
                out.push(token);
                out.push(if x == self.width() { '\n' } else { ' ' });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::board::types::{Color, Direction};
    use crate::board::Board;

    #[test]
    fn pzprv3_rendering() {
        let board = Board::with_cells(
            3,
            2,
            [
                (1, 1, Color::Black, Direction::Right),
                (3, 2, Color::White, Direction::Up),
            ],
        );
        assert_eq!(board.to_pzprv3(), "pzprv3\nnagare\n2\n3\nR . .\n. . u\n");
    }

    #[test]
    fn display_reports_properness() {
        let board = Board::new(2, 2);
        let text = board.to_string();
        assert!(text.contains("Width   : 2"));
        assert!(text.contains("Proper ? : Yes"));
    }
}
