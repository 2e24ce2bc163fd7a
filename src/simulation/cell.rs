use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::{Grid, State};

/// Which surrounding cells count as neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbourhood {
    /// All eight orthogonally and diagonally adjacent cells
    Moore,
    /// The four orthogonally adjacent cells
    VonNeumann,
}

/// Read-only view of one cell and its neighbours, handed to rule predicates.
///
/// The view is bound to the grid as it was before the current step began, so
/// a predicate never observes a neighbour's freshly computed state.
///
/// Positive x goes right, positive y goes up.
pub struct Cell<'a> {
    grid: &'a Grid,
    x: usize,
    y: usize,
    seed: u64,
    rng: RefCell<Option<StdRng>>,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(grid: &'a Grid, x: usize, y: usize, seed: u64) -> Self {
        Self {
            grid,
            x,
            y,
            seed,
            rng: RefCell::new(None),
        }
    }

    /// Coordinate of the cell under evaluation
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// State of the neighbour displaced by `(dx, dy)`.
    ///
    /// Returns `None` for a displacement of `(0, 0)` or when the target lies
    /// off the edge of the grid.
    pub fn neighbour(&self, dx: isize, dy: isize) -> Option<State> {
        if dx == 0 && dy == 0 {
            return None;
        }
        let x = (self.x as isize).checked_add(dx)?;
        let y = (self.y as isize).checked_add(dy)?;
        self.grid.get_signed(x, y)
    }

    /// Number of neighbours currently in state `target`.
    ///
    /// Off-grid positions contribute nothing, so edge and corner cells have
    /// fewer neighbours to count.
    pub fn count_neighbours(&self, target: State, neighbourhood: Neighbourhood) -> usize {
        let mut count = 0;
        for dx in -1..=1isize {
            for dy in -1..=1isize {
                let diagonal = dx != 0 && dy != 0;
                if diagonal && neighbourhood == Neighbourhood::VonNeumann {
                    continue;
                }
                if self.neighbour(dx, dy) == Some(target) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Uniform sample in `[0, 1)` from this cell's random stream
    pub fn random(&self) -> f64 {
        let mut rng = self.rng.borrow_mut();
        rng.get_or_insert_with(|| StdRng::seed_from_u64(self.seed))
            .gen::<f64>()
    }

    /// True with probability `p`
    pub fn chance(&self, p: f64) -> bool {
        self.random() < p
    }
}

/// Seed for one cell's random stream, derived from the step seed and the
/// cell's storage index so that draws do not depend on scheduling order.
pub(crate) fn cell_seed(step_seed: u64, index: usize) -> u64 {
    let lo = pcg_hash((step_seed as u32) ^ pcg_hash(index as u32));
    let hi = pcg_hash(((step_seed >> 32) as u32).wrapping_add(lo));
    ((hi as u64) << 32) | lo as u64
}

/// PCG hash function for generating deterministic seeds
fn pcg_hash(input: u32) -> u32 {
    let state = input.wrapping_mul(747796405).wrapping_add(2891336453);
    let word = ((state >> ((state >> 28).wrapping_add(4))) ^ state).wrapping_mul(277803737);
    (word >> 22) ^ word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(columns: Vec<Vec<State>>, x: usize, y: usize) -> (Grid, usize, usize) {
        (Grid::from_columns(columns).unwrap(), x, y)
    }

    #[test]
    fn test_neighbour_off_grid() {
        let (grid, x, y) = view(vec![vec![1, 2, 3], vec![4, 0, 5]], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.neighbour(1, 0), None);
    }

    #[test]
    fn test_neighbour_far_offsets() {
        let (grid, x, y) = view(vec![vec![0; 3]; 3], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.neighbour(isize::MAX, 0), None);
        assert_eq!(cell.neighbour(0, isize::MAX), None);
        assert_eq!(cell.neighbour(isize::MIN, isize::MIN), None);
        assert_eq!(cell.neighbour(-1, isize::MAX), None);
    }

    #[test]
    fn test_neighbour_north() {
        let (grid, x, y) = view(vec![vec![1, 2, 3], vec![4, 0, 5], vec![6, 7, 8]], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.neighbour(0, 1), Some(5));
        assert_eq!(cell.neighbour(-1, -1), Some(1));
        assert_eq!(cell.neighbour(1, 0), Some(7));
    }

    #[test]
    fn test_self_query_disallowed() {
        let (grid, x, y) = view(vec![vec![1, 1], vec![1, 1]], 0, 0);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.neighbour(0, 0), None);
    }

    #[test]
    fn test_count_none() {
        let (grid, x, y) = view(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.count_neighbours(0, Neighbourhood::Moore), 0);
        assert_eq!(cell.count_neighbours(0, Neighbourhood::VonNeumann), 0);
    }

    #[test]
    fn test_count_surrounded() {
        let (grid, x, y) = view(vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::Moore), 8);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::VonNeumann), 4);
    }

    #[test]
    fn test_count_edge() {
        let (grid, x, y) = view(vec![vec![1, 1, 1], vec![1, 0, 1]], 1, 1);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::Moore), 5);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::VonNeumann), 3);
    }

    #[test]
    fn test_count_corner() {
        let (grid, x, y) = view(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]], 0, 0);
        let cell = Cell::new(&grid, x, y, 0);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::Moore), 3);
        assert_eq!(cell.count_neighbours(1, Neighbourhood::VonNeumann), 2);
    }

    #[test]
    fn test_random_stream_is_seeded() {
        let grid = Grid::new(1, 1).unwrap();
        let a = Cell::new(&grid, 0, 0, 42);
        let b = Cell::new(&grid, 0, 0, 42);
        let draws_a: Vec<f64> = (0..4).map(|_| a.random()).collect();
        let draws_b: Vec<f64> = (0..4).map(|_| b.random()).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|r| (0.0..1.0).contains(r)));
    }

    #[test]
    fn test_chance_extremes() {
        let grid = Grid::new(1, 1).unwrap();
        let cell = Cell::new(&grid, 0, 0, 9);
        assert!(!cell.chance(0.0));
        assert!(cell.chance(1.0));
    }

    #[test]
    fn test_cell_seeds_differ_by_index() {
        assert_ne!(cell_seed(1, 0), cell_seed(1, 1));
        assert_ne!(cell_seed(1, 0), cell_seed(2, 0));
        assert_eq!(cell_seed(5, 17), cell_seed(5, 17));
    }
}
