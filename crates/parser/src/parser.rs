/// Winnow-based parser for the `pzprv3` board format.
///
/// Grammar:
/// ```text
/// board = "pzprv3" NEWLINE
///         "nagare" NEWLINE
///         height NEWLINE
///         width NEWLINE
///         row{height}
/// row   = cell (" " cell)* NEWLINE?
/// cell  = any single non-whitespace character
/// ```
/// Cell semantics: `.` is an empty cell; an uppercase letter places a
/// Black cell, a lowercase letter a White cell; `U`/`D`/`L`/`R` (either
/// case) carry the direction, any other letter means no direction.
use nagare_core::{Board, Color, Direction};
use winnow::ascii::{dec_uint, line_ending};
use winnow::combinator::{eof, opt};
use winnow::prelude::*;
use winnow::token::{any, literal};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a `pzprv3` board string into a properized [`Board`].
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input
/// does not conform to the grammar.
pub fn parse_board(input: &str) -> Result<Board, ParseError> {
    let original = input;
    let mut stream: &str = input;
    match board_parser.parse_next(&mut stream) {
        Ok(board) => Ok(board),
        Err(e) => {
            // Compute how many bytes were consumed before the error.
            let remaining_len = stream.len();
            let consumed = original.len().saturating_sub(remaining_len);
            let (line, column) = offset_to_line_col(original, consumed);
            Err(ParseError {
                message: e.to_string(),
                line,
                column,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// A positive grid dimension.
fn dimension(input: &mut &str) -> ModalResult<usize> {
    dec_uint.verify(|&n: &usize| n >= 1).parse_next(input)
}

/// A single cell token: any non-whitespace character.
fn cell_token(input: &mut &str) -> ModalResult<char> {
    any.verify(|c: &char| !c.is_whitespace()).parse_next(input)
}

/// The placement a cell token encodes, if any.
fn placement(x: usize, y: usize, token: char) -> Option<(usize, usize, Color, Direction)> {
    if token == '.' {
        return None;
    }
    let color = if token.is_ascii_uppercase() {
        Color::Black
    } else {
        Color::White
    };
    Some((x, y, color, Direction::from_letter(token)))
}

// ---------------------------------------------------------------------------
// Board parser
// ---------------------------------------------------------------------------

fn board_parser(input: &mut &str) -> ModalResult<Board> {
    literal("pzprv3").parse_next(input)?;
    line_ending.parse_next(input)?;
    literal("nagare").parse_next(input)?;
    line_ending.parse_next(input)?;
    let height = dimension.parse_next(input)?;
    line_ending.parse_next(input)?;
    let width = dimension.parse_next(input)?;
    line_ending.parse_next(input)?;

    let mut cells = Vec::new();
    for y in 1..=height {
        for x in 1..=width {
            if x > 1 {
                ' '.parse_next(input)?;
            }
            let token = cell_token.parse_next(input)?;
            cells.extend(placement(x, y, token));
        }
        if y < height {
            line_ending.parse_next(input)?;
        } else {
            opt(line_ending).parse_next(input)?;
        }
    }
    eof.parse_next(input)?;

    Ok(Board::with_cells(width, height, cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_board() {
        let board = parse_board("pzprv3\nnagare\n2\n3\nR . .\n. . u\n").unwrap();
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.color_at(1, 1), Color::Black);
        assert_eq!(board.directions_at(1, 1), &[Direction::Right]);
        assert_eq!(board.color_at(3, 2), Color::White);
        assert_eq!(board.directions_at(3, 2), &[Direction::Up]);
        // The wind of the Black cell was propagated on read.
        assert_eq!(board.color_at(2, 1), Color::Gray);
    }

    #[test]
    fn case_selects_color_and_unknown_letters_drop_the_direction() {
        let board = parse_board("pzprv3\nnagare\n1\n3\nX u .\n").unwrap();
        assert_eq!(board.color_at(1, 1), Color::Black);
        assert_eq!(board.directions_at(1, 1), &[Direction::None]);
        assert_eq!(board.color_at(2, 1), Color::White);
        assert_eq!(board.directions_at(2, 1), &[Direction::Up]);
        assert_eq!(board.color_at(3, 1), Color::None);
    }

    #[test]
    fn round_trips_through_to_pzprv3() {
        let text = "pzprv3\nnagare\n3\n3\n. D .\nl . .\n. . U\n";
        let board = parse_board(text).unwrap();
        let rendered = board.to_pzprv3();
        let reparsed = parse_board(&rendered).unwrap();
        assert_eq!(board, reparsed);
        assert_eq!(rendered, text);
    }

    #[test]
    fn accepts_a_missing_trailing_newline() {
        let board = parse_board("pzprv3\nnagare\n1\n2\n. .").unwrap();
        assert_eq!(board.width(), 2);
    }

    #[test]
    fn rejects_a_wrong_header() {
        let err = parse_board("pzprv4\nnagare\n1\n1\n.\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn rejects_the_wrong_puzzle_kind() {
        let err = parse_board("pzprv3\nslither\n1\n1\n.\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_a_short_row() {
        let err = parse_board("pzprv3\nnagare\n2\n3\n. .\n. . .\n").unwrap_err();
        assert_eq!(err.line, 5);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(parse_board("pzprv3\nnagare\n0\n3\n").is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse_board("pzprv3\nnagare\n1\n1\n.\nextra\n").is_err());
    }
}
