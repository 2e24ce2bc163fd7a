//! Conway's Game of Life: B3/S23 over the Moore neighbourhood.

use crate::error::ConfigError;
use crate::simulation::{Automaton, Neighbourhood, Rgb, TransitionSet};

pub const DEAD: usize = 0;
pub const ALIVE: usize = 1;

pub fn conways() -> Result<Automaton, ConfigError> {
    let mut rules = TransitionSet::new();

    // exactly three live neighbours: birth
    rules.add_transition(DEAD, ALIVE, |cell| {
        cell.count_neighbours(ALIVE, Neighbourhood::Moore) == 3
    });

    // under- and overpopulation
    rules.add_transition(ALIVE, DEAD, |cell| {
        cell.count_neighbours(ALIVE, Neighbourhood::Moore) < 2
    });
    rules.add_transition(ALIVE, DEAD, |cell| {
        cell.count_neighbours(ALIVE, Neighbourhood::Moore) > 3
    });

    Automaton::new(rules, vec![Rgb::BLACK, Rgb::WHITE])
}
