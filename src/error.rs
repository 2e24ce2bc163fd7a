use thiserror::Error;

use crate::simulation::State;

/// Errors raised while building an automaton, grid or canvas.
///
/// These indicate a defect in the rule or colour tables handed to the
/// engine; nothing is built when one is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The rule table and colouring describe a different number of states.
    #[error("mismatched lengths of transitions and colouring: {transitions} != {colouring}")]
    MismatchedLengths { transitions: usize, colouring: usize },

    /// An automaton must describe at least two states.
    #[error("an automaton must describe at least 2 states, got {0}")]
    TooFewStates(usize),

    /// A colour channel lies outside the closed interval [0, 1].
    #[error("colouring for state {state} invalid: channel {channel} = {value} is outside [0, 1]")]
    ColourOutOfRange {
        state: State,
        channel: usize,
        value: f32,
    },

    /// A rule targets a state the automaton does not define.
    #[error("state {state}, rule {rule} has invalid new state {target} (max = {max})")]
    InvalidTarget {
        state: State,
        rule: usize,
        target: State,
        max: State,
    },

    /// A state index was skipped while registering rules and never declared.
    #[error("state {0} has no rules and was never declared as a fixed point")]
    UndeclaredState(State),

    /// The canvas cannot give every cell at least one pixel.
    #[error("{cells} cells cannot fit in {pixels} pixels along the {axis} axis")]
    CanvasTooSmall {
        axis: char,
        cells: usize,
        pixels: usize,
    },

    /// The window cannot be expressed in the `u32` sizes windows and GPU
    /// buffers use.
    #[error("window of {width}x{height} pixels exceeds {max} along an axis", max = u32::MAX)]
    WindowTooLarge { width: usize, height: usize },

    /// Steps must be paced at a positive rate.
    #[error("fps must be greater than zero")]
    ZeroFps,

    /// A grid needs at least one cell.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// Grid columns have differing heights.
    #[error("grid column {column} has height {found}, expected {expected}")]
    RaggedGrid {
        column: usize,
        expected: usize,
        found: usize,
    },
}
