use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridFillOutcome {
    /// Selection was already full, nothing changed.
    Ignored,
    Deselected,
    Selected { len: usize },
    /// The selection reached the target length.
    Full { correct: bool },
}

impl GridFillOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Full { correct: true })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridFillGame {
    layout: GridFillLayout,
    selection: SmallVec<[Coord2; 8]>,
    wrong_count: u32,
    solved: bool,
}

impl GridFillGame {
    pub fn new(layout: GridFillLayout) -> Self {
        Self {
            layout,
            selection: SmallVec::new(),
            wrong_count: 0,
            solved: false,
        }
    }

    pub fn layout(&self) -> &GridFillLayout {
        &self.layout
    }

    /// Selected cells in tap order.
    pub fn selection(&self) -> &[Coord2] {
        &self.selection
    }

    pub fn is_selected(&self, coords: Coord2) -> bool {
        self.selection.contains(&coords)
    }

    pub fn selected_word(&self) -> String {
        self.selection
            .iter()
            .filter_map(|&coords| self.layout.glyph_at(coords))
            .collect()
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn is_complete(&self) -> bool {
        self.solved
    }

    pub fn is_full(&self) -> bool {
        self.selection.len() >= self.layout.target().len()
    }

    pub fn point_to_cell(&self, x: f32, y: f32) -> Option<Coord2> {
        self.layout.geometry().point_to_cell(x, y)
    }

    /// First glyph of the target, the grid-fill hint.
    pub fn hint(&self) -> Option<char> {
        self.layout.target().first().copied()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<GridFillOutcome> {
        use GridFillOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        if self.solved {
            return Err(PuzzleError::AlreadyEnded);
        }

        if let Some(pos) = self.selection.iter().position(|&selected| selected == coords) {
            self.selection.remove(pos);
            log::trace!("Deselected {:?}", coords);
            return Ok(Deselected);
        }
        if self.is_full() {
            return Ok(Ignored);
        }

        self.selection.push(coords);
        if !self.is_full() {
            return Ok(Selected {
                len: self.selection.len(),
            });
        }

        let correct = self
            .selection
            .iter()
            .filter_map(|&coords| self.layout.glyph_at(coords))
            .eq(self.layout.target().iter().copied());
        if correct {
            self.solved = true;
            log::debug!("Grid-fill solved with {} wrong attempts", self.wrong_count);
        } else {
            self.wrong_count += 1;
            log::trace!("Wrong grid-fill word {:?}", self.selected_word());
        }
        Ok(Full { correct })
    }
}
