use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mark")]
pub enum CellMark {
    Plain,
    /// 1-based position in the grid-fill selection.
    Selected { order: usize },
    Wrong,
    Found,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    pub coords: Coord2,
    pub glyph: String,
    #[serde(flatten)]
    pub mark: CellMark,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemState {
    pub id: ItemId,
    pub text: String,
    pub role: ItemRole,
    pub rect: Rect,
    pub selected: bool,
    pub connected: bool,
}

/// Plain-data picture of a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "game")]
pub enum DrawState {
    #[serde(rename_all = "camelCase")]
    GridFill {
        rows: Coord,
        columns: Coord,
        cells: Vec<CellState>,
        selected_word: String,
    },
    #[serde(rename_all = "camelCase")]
    MatrixDifference {
        rows: Coord,
        columns: Coord,
        cells: Vec<CellState>,
    },
    #[serde(rename_all = "camelCase")]
    PairMatching {
        items: Vec<ItemState>,
        connections: Vec<Connection>,
        pending: Option<ItemId>,
    },
}

impl DrawState {
    /// Compact text rendering for terminals: selected cells in brackets, found cell in braces,
    /// wrong cells as `·`.
    pub fn to_text(&self) -> String {
        match self {
            Self::GridFill {
                rows,
                columns,
                cells,
                selected_word,
            } => {
                let mut out = cell_rows(*rows, *columns, cells);
                if !selected_word.is_empty() {
                    out.push_str(&format!("已选：{}\n", selected_word));
                }
                out
            }
            Self::MatrixDifference {
                rows,
                columns,
                cells,
            } => cell_rows(*rows, *columns, cells),
            Self::PairMatching {
                items,
                connections,
                pending,
            } => {
                let mut out = String::new();
                for item in items {
                    let mark = if item.connected {
                        '✓'
                    } else if Some(item.id) == *pending {
                        '*'
                    } else {
                        ' '
                    };
                    out.push_str(&format!(
                        "{} {:>3} {:?} {}\n",
                        mark,
                        item.id,
                        item.role,
                        item.text
                    ));
                }
                for connection in connections {
                    out.push_str(&format!("{} - {}\n", connection.from, connection.to));
                }
                out
            }
        }
    }
}

fn cell_rows(rows: Coord, columns: Coord, cells: &[CellState]) -> String {
    let mut out = String::new();
    for row in 0..rows {
        for col in 0..columns {
            let Some(cell) = cells.iter().find(|cell| cell.coords == (row, col)) else {
                continue;
            };
            let text = match cell.mark {
                CellMark::Plain => format!(" {} ", cell.glyph),
                CellMark::Selected { .. } => format!("[{}]", cell.glyph),
                CellMark::Wrong => " · ".to_owned(),
                CellMark::Found => format!("{{{}}}", cell.glyph),
            };
            out.push_str(&text);
        }
        out.push('\n');
    }
    out
}

impl GridFillGame {
    pub fn draw_state(&self) -> DrawState {
        let layout = self.layout();
        let (rows, columns) = layout.size();
        let cells = layout
            .iter_cells()
            .map(|(coords, glyph)| CellState {
                coords,
                glyph: glyph.to_string(),
                mark: match self.selection().iter().position(|&c| c == coords) {
                    Some(index) => CellMark::Selected { order: index + 1 },
                    None => CellMark::Plain,
                },
            })
            .collect();
        DrawState::GridFill {
            rows,
            columns,
            cells,
            selected_word: self.selected_word(),
        }
    }
}

impl MatrixDifferenceGame {
    pub fn draw_state(&self) -> DrawState {
        let layout = self.layout();
        let (rows, columns) = layout.size();
        let cells = layout
            .iter_coords()
            .map(|coords| CellState {
                coords,
                glyph: layout.glyph_at(coords).to_owned(),
                mark: if self.is_complete() && coords == layout.answer() {
                    CellMark::Found
                } else if self.is_wrong_cell(coords) {
                    CellMark::Wrong
                } else {
                    CellMark::Plain
                },
            })
            .collect();
        DrawState::MatrixDifference {
            rows,
            columns,
            cells,
        }
    }
}

impl PairMatchingGame {
    pub fn draw_state(&self) -> DrawState {
        let items = self
            .layout()
            .items()
            .iter()
            .map(|item| ItemState {
                id: item.id,
                text: item.text.clone(),
                role: item.role,
                rect: item.rect,
                selected: self.pending() == Some(item.id),
                connected: self.is_connected(item.id),
            })
            .collect();
        DrawState::PairMatching {
            items,
            connections: self.connections().to_vec(),
            pending: self.pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{grid_fill_layout, matrix_layout, pair_layout, solution_path};

    #[test]
    fn grid_fill_state_orders_selection() {
        let mut game = GridFillGame::new(grid_fill_layout("国泰民安", 7));
        let path = solution_path(game.layout());
        game.tap(path[1]).unwrap();
        game.tap(path[0]).unwrap();

        let DrawState::GridFill {
            cells,
            selected_word,
            ..
        } = game.draw_state()
        else {
            panic!("wrong state kind");
        };

        assert_eq!(cells.len(), 16);
        assert_eq!(selected_word, "泰国");
        let first = cells.iter().find(|cell| cell.coords == path[1]).unwrap();
        assert_eq!(first.mark, CellMark::Selected { order: 1 });
    }

    #[test]
    fn matrix_state_marks_wrong_and_found() {
        let mut game = MatrixDifferenceGame::new(matrix_layout(4));
        let answer = game.layout().answer();
        let miss = game
            .layout()
            .iter_coords()
            .find(|&coords| coords != answer)
            .unwrap();
        game.tap(miss).unwrap();
        game.tap(answer).unwrap();

        let text = game.draw_state().to_text();

        assert!(text.contains("{已}"));
        assert!(text.contains('·'));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn pair_state_serializes_with_tag() {
        let mut game = PairMatchingGame::new(pair_layout(2, 6));
        game.tap(1).unwrap();

        let json = serde_json::to_value(game.draw_state()).unwrap();

        assert_eq!(json["game"], "pairMatching");
        assert_eq!(json["pending"], 1);
        assert_eq!(json["items"].as_array().unwrap().len(), 4);
    }
}
