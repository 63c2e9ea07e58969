use core::fmt::{self, Display, Formatter};

/// Cell color on a Nagareru board.
///
/// `White` cells carry an arrow the solution cycle must follow, `Black`
/// cells emit wind and block it, `Gray` cells are derived during
/// [properization](crate::board::Board::properize) from the winds that
/// reach them, and `None` cells are plain empty cells.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
    Gray,
    #[default]
    None,
}

/// A compass direction, or `None` for "no direction".
///
/// `None` appears as a real value in the data model: a Black cell may be
/// placed without a wind, and such a cell still owns a one-element
/// direction list.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Every direction value, in placement-sampling order.
    pub const ALL: [Self; 5] = [Self::Up, Self::Down, Self::Left, Self::Right, Self::None];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::None => Self::None,
        }
    }

    /// The `(dx, dy)` grid step of this direction (y grows downwards).
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::None => (0, 0),
        }
    }

    /// Map a board-file letter (`U`/`D`/`L`/`R`, any case) to a direction;
    /// every other character means `None`.
    #[must_use]
    pub const fn from_letter(letter: char) -> Self {
        match letter.to_ascii_uppercase() {
            'U' => Self::Up,
            'D' => Self::Down,
            'L' => Self::Left,
            'R' => Self::Right,
            _ => Self::None,
        }
    }

    /// The uppercase board-file letter of this direction (`N` for `None`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
            Self::None => 'N',
        }
    }

    /// The arrow glyph used in Graphviz cell labels.
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Left => "←",
            Self::Right => "→",
            Self::None => "*",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Gray => "Gray",
            Self::None => "No",
        };
        f.write_str(name)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::None => "No",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_up() {
        for d in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
        assert_eq!(Direction::None.opposite(), Direction::None);
    }

    #[test]
    fn letters_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_letter(d.letter()), d);
        }
        assert_eq!(Direction::from_letter('u'), Direction::Up);
        assert_eq!(Direction::from_letter('X'), Direction::None);
    }
}
