//! Langton's ant.
//!
//! The ant's heading and the colour of the square it stands on are folded
//! into the cell state, so no state outlives a step outside the grid. On a
//! white square the ant turns clockwise, on a black square anticlockwise; the
//! square it leaves flips colour. All ant states paint red.

use crate::error::ConfigError;
use crate::simulation::{Automaton, Cell, Rgb, State, TransitionSet};

pub const BLACK: State = 0;
pub const WHITE: State = 1;
pub const BLACK_ANT_N: State = 2;
pub const BLACK_ANT_E: State = 3;
pub const BLACK_ANT_S: State = 4;
pub const BLACK_ANT_W: State = 5;
pub const WHITE_ANT_N: State = 6;
pub const WHITE_ANT_E: State = 7;
pub const WHITE_ANT_S: State = 8;
pub const WHITE_ANT_W: State = 9;

const STATES: usize = 10;

/// True when the neighbour at `(dx, dy)` is an ant facing `heading`,
/// `heading` being an offset from the black-square ant states.
fn ant_heading(cell: &Cell<'_>, dx: isize, dy: isize, heading: State) -> bool {
    matches!(
        cell.neighbour(dx, dy),
        Some(s) if s == BLACK_ANT_N + heading || s == WHITE_ANT_N + heading
    )
}

const N: State = 0;
const E: State = 1;
const S: State = 2;
const W: State = 3;

pub fn langtons() -> Result<Automaton, ConfigError> {
    let mut rules = TransitionSet::new();

    // An ant arriving on black turns anticlockwise
    rules.add_transition(BLACK, BLACK_ANT_N, |cell| ant_heading(cell, -1, 0, E));
    rules.add_transition(BLACK, BLACK_ANT_E, |cell| ant_heading(cell, 0, 1, S));
    rules.add_transition(BLACK, BLACK_ANT_S, |cell| ant_heading(cell, 1, 0, W));
    rules.add_transition(BLACK, BLACK_ANT_W, |cell| ant_heading(cell, 0, -1, N));

    // An ant arriving on white turns clockwise
    rules.add_transition(WHITE, WHITE_ANT_S, |cell| ant_heading(cell, -1, 0, E));
    rules.add_transition(WHITE, WHITE_ANT_W, |cell| ant_heading(cell, 0, 1, S));
    rules.add_transition(WHITE, WHITE_ANT_N, |cell| ant_heading(cell, 1, 0, W));
    rules.add_transition(WHITE, WHITE_ANT_E, |cell| ant_heading(cell, 0, -1, N));

    // The ant leaves and the square flips
    for ant in BLACK_ANT_N..=BLACK_ANT_W {
        rules.add_transition(ant, WHITE, |_| true);
    }
    for ant in WHITE_ANT_N..=WHITE_ANT_W {
        rules.add_transition(ant, BLACK, |_| true);
    }

    let mut colouring = vec![Rgb::new(1.0, 0.0, 0.0); STATES];
    colouring[BLACK] = Rgb::BLACK;
    colouring[WHITE] = Rgb::WHITE;

    Automaton::new(rules, colouring)
}
