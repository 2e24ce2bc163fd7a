use rayon::prelude::*;

use crate::simulation::cell::cell_seed;
use crate::simulation::{Cell, Grid, RuleTable, State};

/// Advance `grid` by one tick with simultaneous-update semantics.
///
/// Every cell is evaluated independently against the unmodified input grid,
/// so evaluation order cannot change the result. Fired rules are gathered as
/// `(x, y, state)` writes and only applied once all cells are done; cells
/// without a write keep their previous state.
pub(crate) fn evaluate(rules: &RuleTable, grid: &Grid, seed: u64) -> Grid {
    let writes: Vec<(usize, usize, State)> = (0..grid.len())
        .into_par_iter()
        .filter_map(|index| {
            let (x, y) = grid.coords_of(index);
            let state = match grid.get(x, y) {
                Some(state) => state,
                None => panic!(
                    "step evaluator indexed ({}, {}) outside of a {}x{} grid",
                    x,
                    y,
                    grid.width(),
                    grid.height()
                ),
            };

            let cell = Cell::new(grid, x, y, cell_seed(seed, index));
            rules.evaluate(state, &cell).map(|next| (x, y, next))
        })
        .collect();

    let mut next = grid.clone();
    for &(x, y, state) in &writes {
        if !next.set(x, y, state) {
            panic!(
                "step evaluator wrote ({}, {}) outside of a {}x{} grid",
                x,
                y,
                next.width(),
                next.height()
            );
        }
    }

    log::trace!(
        "Stepped {}x{} grid, {} cells changed rule",
        grid.width(),
        grid.height(),
        writes.len()
    );

    next
}
