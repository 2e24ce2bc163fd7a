//! Rainbow ripples: red spreads orthogonally into black, then every lit cell
//! cycles through the colour wheel.

use crate::error::ConfigError;
use crate::simulation::{Automaton, Neighbourhood, Rgb, State, TransitionSet};

pub const BLACK: State = 0;
pub const RED: State = 1;
pub const YELLOW: State = 2;
pub const GREEN: State = 3;
pub const CYAN: State = 4;
pub const BLUE: State = 5;
pub const PURPLE: State = 6;

pub fn rainbow() -> Result<Automaton, ConfigError> {
    let mut rules = TransitionSet::new();

    rules.add_transition(BLACK, RED, |cell| {
        cell.count_neighbours(RED, Neighbourhood::VonNeumann) >= 1
    });

    let wheel = [RED, YELLOW, GREEN, CYAN, BLUE, PURPLE];
    for (i, &colour) in wheel.iter().enumerate() {
        rules.add_transition(colour, wheel[(i + 1) % wheel.len()], |_| true);
    }

    Automaton::new(
        rules,
        vec![
            Rgb::BLACK,
            Rgb::new(1.0, 0.0, 0.0),
            Rgb::new(1.0, 1.0, 0.0),
            Rgb::new(0.0, 1.0, 0.0),
            Rgb::new(0.0, 1.0, 1.0),
            Rgb::new(0.0, 0.0, 1.0),
            Rgb::new(1.0, 0.0, 1.0),
        ],
    )
}
