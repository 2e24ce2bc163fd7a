use rand::Rng;

use crate::simulation::cell::cell_seed;
use crate::simulation::{Automaton, Canvas, Grid, State};

/// A running automaton: the current grid plus the state that travels with it
/// between ticks.
///
/// Everything here changes only between steps, never from inside a rule.
pub struct Simulation {
    automaton: Automaton,
    grid: Grid,
    generation: u64,
    seed: Option<u64>,
    started: bool,
}

impl Simulation {
    /// Run `automaton` from `grid` as given. With `seed` set, probabilistic rules
    /// replay identically from the same starting grid.
    pub fn new(automaton: Automaton, grid: Grid, seed: Option<u64>) -> Self {
        Self {
            automaton,
            grid,
            generation: 0,
            seed,
            started: false,
        }
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Completed steps since `start`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Cycle the cell at `(x, y)` to its next state. Editing is only allowed
    /// before the simulation starts.
    pub fn edit(&mut self, x: usize, y: usize) -> Option<State> {
        if self.started {
            return None;
        }
        self.grid.cycle(x, y, self.automaton.count_states())
    }

    /// Fill the grid with random states. Only allowed before start.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.started {
            return false;
        }
        self.grid.randomize(rng, self.automaton.count_states());
        true
    }

    /// Reset every cell to state 0. Only allowed before start.
    pub fn clear(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.grid.clear();
        true
    }

    /// Leave editing mode. Further edits are refused.
    pub fn start(&mut self) {
        if !self.started {
            log::info!("Simulation started");
            self.started = true;
        }
    }

    /// Step once, then record the completed generation. Does nothing until
    /// the simulation is started.
    pub fn advance(&mut self) -> bool {
        if !self.started {
            return false;
        }

        self.grid = match self.seed {
            Some(seed) => {
                let step_seed = cell_seed(seed, self.generation as usize);
                self.automaton.step_seeded(&self.grid, step_seed)
            }
            None => self.automaton.step(&self.grid),
        };
        self.generation += 1;
        true
    }

    /// Render the current grid
    pub fn paint(&self, canvas: &Canvas) -> Vec<f32> {
        self.automaton.paint(&self.grid, canvas)
    }
}
