use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    /// Item is part of a committed connection.
    Already,
    Select,
    Clear,
    Connect { complete: bool },
    Wrong,
}

impl PairOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Already)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Connect { complete: true })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: ItemId,
    pub to: ItemId,
}

impl Connection {
    pub fn involves(&self, id: ItemId) -> bool {
        self.from == id || self.to == id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairMatchingGame {
    layout: PairLayout,
    pending: Option<ItemId>,
    connections: Vec<Connection>,
    wrong_count: u32,
}

impl PairMatchingGame {
    pub fn new(layout: PairLayout) -> Self {
        Self {
            layout,
            pending: None,
            connections: Vec::new(),
            wrong_count: 0,
        }
    }

    pub fn layout(&self) -> &PairLayout {
        &self.layout
    }

    pub fn pending(&self) -> Option<ItemId> {
        self.pending
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_connected(&self, id: ItemId) -> bool {
        self.connections.iter().any(|connection| connection.involves(id))
    }

    pub fn wrong_count(&self) -> u32 {
        self.wrong_count
    }

    pub fn is_complete(&self) -> bool {
        self.connections.len() >= self.layout.upper_count()
    }

    pub fn point_to_item(&self, x: f32, y: f32) -> Option<ItemId> {
        self.layout.point_to_item(x, y)
    }

    /// First upper item that still has no connection.
    pub fn hint(&self) -> Option<ItemId> {
        self.layout
            .items()
            .iter()
            .filter(|item| item.role == ItemRole::Upper)
            .map(|item| item.id)
            .find(|&id| !self.is_connected(id))
    }

    pub fn clear_selection(&mut self) {
        self.pending = None;
    }

    pub fn tap(&mut self, id: ItemId) -> Result<PairOutcome> {
        use PairOutcome::*;

        if self.layout.item(id).is_none() {
            return Err(PuzzleError::UnknownItem(id));
        }
        if self.is_complete() {
            return Err(PuzzleError::AlreadyEnded);
        }
        if self.is_connected(id) {
            return Ok(Already);
        }

        let Some(pending) = self.pending.take() else {
            self.pending = Some(id);
            log::trace!("Selected item {}", id);
            return Ok(Select);
        };
        if pending == id {
            return Ok(Clear);
        }

        if self.layout.is_declared_pair(pending, id) {
            self.connections.push(Connection {
                from: pending,
                to: id,
            });
            let complete = self.is_complete();
            log::debug!(
                "Connected {} and {}, {}/{}",
                pending,
                id,
                self.connections.len(),
                self.layout.upper_count()
            );
            Ok(Connect { complete })
        } else {
            self.wrong_count += 1;
            log::trace!("Wrong pair {} and {}", pending, id);
            Ok(Wrong)
        }
    }
}
