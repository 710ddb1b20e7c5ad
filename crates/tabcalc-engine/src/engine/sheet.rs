//! The sheet: sole owner of every cell in the grid.
//!
//! Cells are stored by value in an ordered map keyed by [`Address`].
//! Resolution replaces a cell's value in place; nothing outside the sheet
//! holds a reference to a cell while that happens.

use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

use super::address::Address;
use super::cell::{Cell, classify};
use super::formula::{Visited, resolve_formula};

/// Address -> cell mapping with fixed grid dimensions.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    cells: BTreeMap<Address, Cell>,
    rows: usize,
    cols: usize,
}

/// Counts of terminal states after [`Sheet::resolve_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub empty: usize,
    pub strings: usize,
    pub numbers: usize,
    pub errors: usize,
}

impl Sheet {
    pub fn new(rows: usize, cols: usize) -> Self {
        Sheet {
            cells: BTreeMap::new(),
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Store raw text as an unresolved cell, replacing whatever was there.
    pub fn insert_raw(&mut self, addr: Address, raw: impl Into<String>) {
        self.cells.insert(addr, Cell::Undefined(raw.into()));
    }

    /// Store a cell as-is (used for loader placeholders).
    pub fn insert(&mut self, addr: Address, cell: Cell) {
        self.cells.insert(addr, cell);
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.cells.contains_key(addr)
    }

    pub fn get(&self, addr: &Address) -> Option<&Cell> {
        self.cells.get(addr)
    }

    /// Replace the cell at an existing address. Returns the previous value,
    /// or None (and stores nothing) if the address has no cell.
    pub fn replace(&mut self, addr: &Address, cell: Cell) -> Option<Cell> {
        let slot = self.cells.get_mut(addr)?;
        Some(std::mem::replace(slot, cell))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Cell)> {
        self.cells.iter()
    }

    /// Drive the cell at `addr` to a terminal state and return it.
    ///
    /// Undefined cells are classified first; formulas are evaluated with
    /// the given visited set. Terminal cells are returned unchanged.
    /// Returns None if the address is outside the grid.
    pub fn resolve(&mut self, addr: &Address, visited: &mut Visited) -> Option<Cell> {
        match self.classify_at(addr)? {
            Cell::Formula(expr) => Some(resolve_formula(self, addr, &expr, visited)),
            terminal => Some(terminal),
        }
    }

    /// Classify the cell at `addr` if it is still undefined and return its
    /// state. Formulas come back unevaluated.
    pub(crate) fn classify_at(&mut self, addr: &Address) -> Option<Cell> {
        let next = match self.cells.get(addr)? {
            Cell::Undefined(raw) => {
                let next = classify(raw);
                debug!(cell = %addr, raw = raw.as_str(), state = ?next, "classified");
                next
            }
            current => return Some(current.clone()),
        };
        self.replace(addr, next.clone());
        Some(next)
    }

    /// Force every unresolved cell to a terminal state.
    ///
    /// Each top-level cell gets a fresh visited set; references are forced
    /// on demand, so by the time the loop reaches a cell it may already be
    /// terminal.
    pub fn resolve_all(&mut self) -> ResolveSummary {
        let pending: Vec<Address> = self
            .cells
            .iter()
            .filter(|(_, cell)| !cell.is_terminal())
            .map(|(addr, _)| addr.clone())
            .collect();

        for addr in &pending {
            let mut visited = Visited::new();
            self.resolve(addr, &mut visited);
        }

        let summary = self.summary();
        debug!(
            pending = pending.len(),
            empty = summary.empty,
            strings = summary.strings,
            numbers = summary.numbers,
            errors = summary.errors,
            "sheet resolved"
        );
        summary
    }

    pub fn summary(&self) -> ResolveSummary {
        let mut summary = ResolveSummary::default();
        for cell in self.cells.values() {
            match cell {
                Cell::Empty => summary.empty += 1,
                Cell::String(_) => summary.strings += 1,
                Cell::Number { .. } => summary.numbers += 1,
                Cell::Error(_) => summary.errors += 1,
                Cell::Undefined(_) | Cell::Formula(_) => {}
            }
        }
        summary
    }

    /// Display text of the cell at `addr`, or None outside the grid.
    pub fn get_display(&self, addr: &Address) -> Option<Cow<'_, str>> {
        self.cells.get(addr).map(Cell::display)
    }
}
