//! Grid-based cellular automata.
//!
//! An [`Automaton`](simulation::Automaton) ties a per-state rule table to a
//! colouring. Stepping evaluates every cell in parallel against the previous
//! grid, and a [`Canvas`](simulation::Canvas) paints the result into a flat
//! RGBA buffer.
//!
//! ```
//! use cellular_automata::models::conways;
//! use cellular_automata::simulation::{Canvas, Grid};
//!
//! let life = conways().unwrap();
//! let grid = Grid::from_columns(vec![vec![1, 0], vec![0, 1]]).unwrap();
//! let next = life.step(&grid);
//! assert_eq!(next, Grid::from_columns(vec![vec![0, 0], vec![0, 0]]).unwrap());
//!
//! let canvas = Canvas::new(2, 2, 8, 8).unwrap();
//! assert_eq!(life.paint(&next, &canvas).len(), 4 * 8 * 8);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod simulation;

pub use error::ConfigError;
