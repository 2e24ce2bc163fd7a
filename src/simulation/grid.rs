use std::ops::Index;

use rand::Rng;

use crate::error::ConfigError;
use crate::simulation::State;

/// Logical grid of cell states, addressed `[x][y]`.
///
/// Cells are stored column-major so that `from_columns(vec![col0, col1])`
/// reads the same way the grid is indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<State>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with every cell in state 0
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        Ok(Self {
            cells: vec![0; width * height],
            width,
            height,
        })
    }

    /// Build a grid from columns, so `columns[x][y]` is the state at `(x, y)`
    pub fn from_columns(columns: Vec<Vec<State>>) -> Result<Self, ConfigError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (column, states) in columns.into_iter().enumerate() {
            if states.len() != height {
                return Err(ConfigError::RaggedGrid {
                    column,
                    expected: height,
                    found: states.len(),
                });
            }
            cells.extend(states);
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// State at `(x, y)`, or `None` off the grid
    pub fn get(&self, x: usize, y: usize) -> Option<State> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// State at a signed coordinate, or `None` off the grid. No wraparound.
    pub fn get_signed(&self, x: isize, y: isize) -> Option<State> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    /// Overwrite a cell. Returns false when `(x, y)` is off the grid.
    pub fn set(&mut self, x: usize, y: usize, state: State) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Advance a cell to `(state + 1) mod states`, returning the new state
    pub fn cycle(&mut self, x: usize, y: usize, states: usize) -> Option<State> {
        let i = self.index_of(x, y)?;
        let next = (self.cells[i] + 1) % states.max(1);
        self.cells[i] = next;
        Some(next)
    }

    /// Reset every cell to state 0
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Fill the grid with uniformly random states in `[0, states)`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, states: usize) {
        let states = states.max(1);
        for cell in &mut self.cells {
            *cell = rng.gen_range(0..states);
        }
    }

    /// Iterate `(x, y, state)` in storage order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, State)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (i / height, i % height, state))
    }

    /// Coordinate of a flat storage index
    pub(crate) fn coords_of(&self, index: usize) -> (usize, usize) {
        (index / self.height, index % self.height)
    }

    pub(crate) fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(x * self.height + y)
        } else {
            None
        }
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = State;

    fn index(&self, (x, y): (usize, usize)) -> &State {
        match self.index_of(x, y) {
            Some(i) => &self.cells[i],
            None => panic!(
                "indexed ({}, {}) outside of a {}x{} grid",
                x, y, self.width, self.height
            ),
        }
    }
}
