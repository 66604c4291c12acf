use serde::{Deserialize, Serialize};

use crate::*;
pub use grid_fill::*;
pub use matrix_difference::*;
pub use pair_matching::*;

mod grid_fill;
mod matrix_difference;
mod pair_matching;

/// Logical target of a tap, after hit testing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    Cell(Coord2),
    Item(ItemId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    GridFill(GridFillOutcome),
    MatrixDifference(MatrixOutcome),
    PairMatching(PairOutcome),
}

impl TapOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::GridFill(outcome) => outcome.has_update(),
            Self::MatrixDifference(outcome) => outcome.has_update(),
            Self::PairMatching(outcome) => outcome.has_update(),
        }
    }

    pub const fn is_complete(self) -> bool {
        match self {
            Self::GridFill(outcome) => outcome.is_complete(),
            Self::MatrixDifference(outcome) => outcome.is_complete(),
            Self::PairMatching(outcome) => outcome.is_complete(),
        }
    }

    /// Whether this tap was penalized as a wrong attempt.
    pub const fn is_wrong(self) -> bool {
        matches!(
            self,
            Self::GridFill(GridFillOutcome::Full { correct: false })
                | Self::MatrixDifference(MatrixOutcome::Missed {
                    repeated: false,
                    ..
                })
                | Self::PairMatching(PairOutcome::Wrong)
        )
    }
}

/// One puzzle attempt of any kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Game {
    GridFill(GridFillGame),
    MatrixDifference(MatrixDifferenceGame),
    PairMatching(PairMatchingGame),
}

impl Game {
    pub fn kind(&self) -> GameKind {
        match self {
            Self::GridFill(_) => GameKind::GridFill,
            Self::MatrixDifference(_) => GameKind::MatrixDifference,
            Self::PairMatching(_) => GameKind::PairMatching,
        }
    }

    pub fn wrong_count(&self) -> u32 {
        match self {
            Self::GridFill(game) => game.wrong_count(),
            Self::MatrixDifference(game) => game.wrong_count(),
            Self::PairMatching(game) => game.wrong_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Self::GridFill(game) => game.is_complete(),
            Self::MatrixDifference(game) => game.is_complete(),
            Self::PairMatching(game) => game.is_complete(),
        }
    }

    pub fn score_rule(&self) -> ScoreRule {
        match self {
            Self::GridFill(_) => GRID_FILL_RULE,
            Self::MatrixDifference(_) => MATRIX_DIFFERENCE_RULE,
            Self::PairMatching(_) => PAIR_MATCHING_RULE,
        }
    }

    pub fn breakdown(&self, timing: ScoreTiming) -> ScoreBreakdown {
        self.score_rule().breakdown(timing, self.wrong_count())
    }

    /// Hit test in local, unscaled coordinates.
    pub fn point_to_selection(&self, x: f32, y: f32) -> Option<Selection> {
        let selection = match self {
            Self::GridFill(game) => game.point_to_cell(x, y).map(Selection::Cell),
            Self::MatrixDifference(game) => game.point_to_cell(x, y).map(Selection::Cell),
            Self::PairMatching(game) => game.point_to_item(x, y).map(Selection::Item),
        };
        log::trace!("Hit test ({}, {}) -> {:?}", x, y, selection);
        selection
    }

    pub fn tap(&mut self, selection: Selection) -> Result<TapOutcome> {
        match (self, selection) {
            (Self::GridFill(game), Selection::Cell(coords)) => {
                game.tap(coords).map(TapOutcome::GridFill)
            }
            (Self::MatrixDifference(game), Selection::Cell(coords)) => {
                game.tap(coords).map(TapOutcome::MatrixDifference)
            }
            (Self::PairMatching(game), Selection::Item(id)) => {
                game.tap(id).map(TapOutcome::PairMatching)
            }
            (_, Selection::Cell(_)) => Err(PuzzleError::InvalidCoords),
            (_, Selection::Item(id)) => Err(PuzzleError::UnknownItem(id)),
        }
    }

    pub fn clear_selection(&mut self) {
        match self {
            Self::GridFill(game) => game.clear_selection(),
            Self::MatrixDifference(game) => game.clear_selection(),
            Self::PairMatching(game) => game.clear_selection(),
        }
    }

    /// Logical board size, used by hosts to center the puzzle.
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            Self::GridFill(game) => {
                let geometry = game.layout().geometry();
                (geometry.width(), geometry.height())
            }
            Self::MatrixDifference(game) => {
                let geometry = game.layout().geometry();
                (geometry.width(), geometry.height())
            }
            Self::PairMatching(game) => (
                game.layout().metrics().total_width(),
                game.layout().height(),
            ),
        }
    }
}

impl From<GridFillGame> for Game {
    fn from(game: GridFillGame) -> Self {
        Self::GridFill(game)
    }
}

impl From<MatrixDifferenceGame> for Game {
    fn from(game: MatrixDifferenceGame) -> Self {
        Self::MatrixDifference(game)
    }
}

impl From<PairMatchingGame> for Game {
    fn from(game: PairMatchingGame) -> Self {
        Self::PairMatching(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{matrix_layout, pair_layout, solution_path};

    #[test]
    fn selection_kind_must_match_game() {
        let mut game = Game::from(PairMatchingGame::new(pair_layout(2, 0)));

        assert_eq!(
            game.tap(Selection::Cell((0, 0))),
            Err(PuzzleError::InvalidCoords)
        );

        let mut game = Game::from(MatrixDifferenceGame::new(matrix_layout(0)));
        assert_eq!(
            game.tap(Selection::Item(1)),
            Err(PuzzleError::UnknownItem(1))
        );
    }

    #[test]
    fn dispatch_reports_completion() {
        let layout = crate::fixtures::grid_fill_layout("国泰民安", 9);
        let path = solution_path(&layout);
        let mut game = Game::from(GridFillGame::new(layout));

        let outcomes: Vec<_> = path
            .into_iter()
            .map(|coords| game.tap(Selection::Cell(coords)).unwrap())
            .collect();

        assert!(outcomes.last().unwrap().is_complete());
        assert!(game.is_complete());
        assert_eq!(game.kind(), GameKind::GridFill);
        assert_eq!(game.bounds(), (306., 306.));
    }

    #[test]
    fn wrong_outcomes_are_flagged() {
        let mut game = Game::from(PairMatchingGame::new(pair_layout(2, 1)));

        game.tap(Selection::Item(1)).unwrap();
        let outcome = game.tap(Selection::Item(4)).unwrap();

        assert!(outcome.is_wrong());
        assert_eq!(game.wrong_count(), 1);
        assert_eq!(game.score_rule(), PAIR_MATCHING_RULE);
    }

    #[test]
    fn point_to_selection_uses_game_geometry() {
        let game = Game::from(MatrixDifferenceGame::new(matrix_layout(2)));

        assert_eq!(game.point_to_selection(90., 5.), Some(Selection::Cell((0, 1))));
        assert_eq!(game.point_to_selection(82., 5.), None);
    }
}
