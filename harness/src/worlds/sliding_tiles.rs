//! 3×3 sliding-tile puzzle (the eight-puzzle).
//!
//! Tiles are `1..=8`, `0` is the blank. A move slides the blank one cell.

use std::fmt;

use wayfinder_kernel::{
    Capabilities, GoalCapability, MoveRejected, SearchState, StateKey, SuccessorCapability,
};

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;
const SOLVED: [u8; CELLS] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn target(self, blank: usize) -> Option<usize> {
        let (row, col) = (blank / SIDE, blank % SIDE);
        match self {
            Self::Up if row > 0 => Some(blank - SIDE),
            Self::Down if row + 1 < SIDE => Some(blank + SIDE),
            Self::Left if col > 0 => Some(blank - 1),
            Self::Right if col + 1 < SIDE => Some(blank + 1),
            _ => None,
        }
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingTiles {
    tiles: [u8; CELLS],
    blank: usize,
}

impl SlidingTiles {
    #[must_use]
    pub fn solved() -> Self {
        Self {
            tiles: SOLVED,
            blank: CELLS - 1,
        }
    }

    /// Accepts any permutation of `0..=8`, row-major.
    ///
    /// Returns `None` otherwise. Unsolvable permutations are accepted; a
    /// search from one simply exhausts.
    #[must_use]
    pub fn from_tiles(tiles: [u8; CELLS]) -> Option<Self> {
        let mut seen = [false; CELLS];
        for &t in &tiles {
            let slot = seen.get_mut(usize::from(t))?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        let blank = tiles.iter().position(|&t| t == 0)?;
        Some(Self { tiles, blank })
    }

    /// The solved board with `slides` applied; illegal slides are skipped.
    #[must_use]
    pub fn scrambled(slides: &[Slide]) -> Self {
        let mut board = Self::solved();
        for slide in slides {
            // Skipping out-of-bounds slides keeps scripted scrambles simple.
            let _ = board.apply_move(slide);
        }
        board
    }

    #[must_use]
    pub fn tiles(&self) -> [u8; CELLS] {
        self.tiles
    }
}

impl fmt::Display for SlidingTiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(SIDE).enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for t in row {
                if *t == 0 {
                    f.write_str("_")?;
                } else {
                    write!(f, "{t}")?;
                }
            }
        }
        Ok(())
    }
}

impl SearchState for SlidingTiles {
    type Move = Slide;
    const CAPABILITIES: Capabilities =
        Capabilities::new(GoalCapability::Predicate, SuccessorCapability::MoveEnumeration);

    fn state_key(&self) -> StateKey {
        StateKey::new(self.to_string())
    }

    fn apply_move(&mut self, mv: &Slide) -> Result<(), MoveRejected> {
        let target = mv
            .target(self.blank)
            .ok_or_else(|| MoveRejected::new(format!("blank cannot move {mv}")))?;
        self.tiles.swap(self.blank, target);
        self.blank = target;
        Ok(())
    }

    fn is_goal(&self) -> bool {
        self.tiles == SOLVED
    }

    fn valid_moves(&self) -> Vec<Slide> {
        Slide::ALL
            .into_iter()
            .filter(|s| s.target(self.blank).is_some())
            .collect()
    }
}
