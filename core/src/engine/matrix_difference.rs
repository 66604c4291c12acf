use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixOutcome {
    Found,
    /// `repeated` is set when the cell was already penalized.
    Missed { repeated: bool, wrong_count: u32 },
}

impl MatrixOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Missed { repeated: true, .. })
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Found)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixDifferenceGame {
    layout: MatrixLayout,
    wrong_cells: HashSet<Coord2>,
    last_miss: Option<Coord2>,
    revealed: bool,
}

impl MatrixDifferenceGame {
    pub fn new(layout: MatrixLayout) -> Self {
        Self {
            layout,
            wrong_cells: HashSet::new(),
            last_miss: None,
            revealed: false,
        }
    }

    pub fn layout(&self) -> &MatrixLayout {
        &self.layout
    }

    /// Distinct wrong cells, each counted once.
    pub fn wrong_count(&self) -> u32 {
        self.wrong_cells.len().try_into().unwrap_or(u32::MAX)
    }

    pub fn is_wrong_cell(&self, coords: Coord2) -> bool {
        self.wrong_cells.contains(&coords)
    }

    pub fn last_miss(&self) -> Option<Coord2> {
        self.last_miss
    }

    pub fn is_complete(&self) -> bool {
        self.revealed
    }

    pub fn point_to_cell(&self, x: f32, y: f32) -> Option<Coord2> {
        self.layout.geometry().point_to_cell(x, y)
    }

    /// Row holding the differing glyph.
    pub fn hint(&self) -> Coord {
        self.layout.answer().0
    }

    pub fn clear_selection(&mut self) {
        self.last_miss = None;
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<MatrixOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.revealed {
            return Err(PuzzleError::AlreadyEnded);
        }

        if coords == self.layout.answer() {
            self.revealed = true;
            self.last_miss = None;
            log::debug!("Matrix-difference solved at {:?}", coords);
            return Ok(MatrixOutcome::Found);
        }

        let repeated = !self.wrong_cells.insert(coords);
        self.last_miss = Some(coords);
        log::trace!("Missed at {:?}, repeated: {}", coords, repeated);
        Ok(MatrixOutcome::Missed {
            repeated,
            wrong_count: self.wrong_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::matrix_layout;

    fn first_miss(layout: &MatrixLayout) -> Coord2 {
        layout
            .iter_coords()
            .find(|&coords| coords != layout.answer())
            .unwrap()
    }

    #[test]
    fn hit_solves_after_wrong_taps() {
        let mut game = MatrixDifferenceGame::new(matrix_layout(3));
        let answer = game.layout().answer();
        let miss = first_miss(game.layout());

        game.tap(miss).unwrap();
        assert_eq!(game.tap(answer).unwrap(), MatrixOutcome::Found);
        assert!(game.is_complete());
        assert_eq!(game.wrong_count(), 1);
        assert_eq!(game.tap(miss), Err(PuzzleError::AlreadyEnded));
    }

    #[test]
    fn repeated_wrong_cell_counts_once() {
        let mut game = MatrixDifferenceGame::new(matrix_layout(5));
        let miss = first_miss(game.layout());

        assert_eq!(
            game.tap(miss).unwrap(),
            MatrixOutcome::Missed {
                repeated: false,
                wrong_count: 1
            }
        );
        let outcome = game.tap(miss).unwrap();

        assert_eq!(
            outcome,
            MatrixOutcome::Missed {
                repeated: true,
                wrong_count: 1
            }
        );
        assert!(!outcome.has_update());
        assert!(game.is_wrong_cell(miss));
    }

    #[test]
    fn distinct_misses_accumulate() {
        let mut game = MatrixDifferenceGame::new(matrix_layout(8));
        let answer = game.layout().answer();
        let misses: Vec<_> = game
            .layout()
            .iter_coords()
            .filter(|&coords| coords != answer)
            .collect();

        for &coords in &misses {
            game.tap(coords).unwrap();
        }

        assert_eq!(game.wrong_count(), 8);
        assert_eq!(game.last_miss(), misses.last().copied());
        game.clear_selection();
        assert_eq!(game.last_miss(), None);
    }

    #[test]
    fn hint_names_answer_row() {
        let mut game = MatrixDifferenceGame::new(matrix_layout(11));

        assert_eq!(game.hint(), game.layout().answer().0);
        assert_eq!(game.tap((3, 0)), Err(PuzzleError::InvalidCoords));
        assert_eq!(game.wrong_count(), 0);
    }
}
