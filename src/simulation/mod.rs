mod automaton;
mod canvas;
mod cell;
mod grid;
mod rules;
#[allow(clippy::module_inception)]
mod simulation;
mod step;

pub use automaton::{Automaton, Rgb};
pub use canvas::{Canvas, CHANNELS};
pub use cell::{Cell, Neighbourhood};
pub use grid::Grid;
pub use rules::{Predicate, RuleTable, Transition, TransitionSet};
pub use simulation::Simulation;

/// Index of a cell's condition within an automaton's palette
pub type State = usize;
