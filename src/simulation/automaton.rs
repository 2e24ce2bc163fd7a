use crate::error::ConfigError;
use crate::simulation::step::evaluate;
use crate::simulation::{Canvas, Grid, RuleTable, State, TransitionSet};

/// Render colour of a single state. Every channel must lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// A validated set of per-state rules together with their render colours.
///
/// Build one with [`Automaton::new`]; it cannot be modified afterwards.
#[derive(Debug)]
pub struct Automaton {
    rules: RuleTable,
    colouring: Box<[Rgb]>,
    states: usize,
}

impl Automaton {
    /// Validate and freeze a rule set and its colouring.
    ///
    /// State `n` is described by the rules registered for `n` and coloured by
    /// `colouring[n]`. Checks run in order: matching lengths, at least two
    /// states, colour channels in `[0, 1]`, rule targets in range, and no
    /// undeclared state gaps.
    pub fn new(transitions: TransitionSet, colouring: Vec<Rgb>) -> Result<Self, ConfigError> {
        if transitions.len() != colouring.len() {
            return Err(ConfigError::MismatchedLengths {
                transitions: transitions.len(),
                colouring: colouring.len(),
            });
        }

        let states = colouring.len();
        if states <= 1 {
            return Err(ConfigError::TooFewStates(states));
        }

        for (state, rgb) in colouring.iter().enumerate() {
            for (channel, value) in rgb.channels().into_iter().enumerate() {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::ColourOutOfRange {
                        state,
                        channel,
                        value,
                    });
                }
            }
        }

        if let Some((state, rule, target)) = transitions.targets().find(|&(_, _, t)| t >= states) {
            return Err(ConfigError::InvalidTarget {
                state,
                rule,
                target,
                max: states - 1,
            });
        }

        let rules = transitions.freeze()?;
        log::debug!("Built automaton with {} states", states);

        Ok(Self {
            rules,
            colouring: colouring.into_boxed_slice(),
            states,
        })
    }

    /// Number of states this automaton describes
    pub fn count_states(&self) -> usize {
        self.states
    }

    /// Copy of the colouring, `colouring()[n]` being the colour of state `n`
    pub fn colouring(&self) -> Vec<Rgb> {
        self.colouring.to_vec()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Advance `grid` by one tick.
    ///
    /// Pure with respect to the grid: the input is never modified. Rules that
    /// draw random numbers get a fresh seed each call, so probabilistic
    /// automata are not reproducible through this entry point; use
    /// [`Automaton::step_seeded`] for that.
    pub fn step(&self, grid: &Grid) -> Grid {
        self.step_seeded(grid, rand::random())
    }

    /// Advance `grid` by one tick with every cell's random stream derived
    /// from `seed`. Identical inputs give identical outputs.
    pub fn step_seeded(&self, grid: &Grid, seed: u64) -> Grid {
        evaluate(&self.rules, grid, seed)
    }

    /// Paint `grid` onto `canvas` using this automaton's colouring
    pub fn paint(&self, grid: &Grid, canvas: &Canvas) -> Vec<f32> {
        canvas.paint(grid, &self.colouring)
    }

    /// Whether `state` is a valid index for this automaton
    pub fn contains(&self, state: State) -> bool {
        state < self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip() -> TransitionSet {
        let mut t = TransitionSet::new();
        t.add_transition(0, 1, |_| true);
        t.add_transition(1, 0, |_| true);
        t
    }

    #[test]
    fn test_new_ok() {
        let a = Automaton::new(flip(), vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        assert_eq!(a.count_states(), 2);
        assert_eq!(a.rules().len(), 2);
        assert_eq!(a.colouring().len(), 2);
    }

    #[test]
    fn test_empty_rejected() {
        let err = Automaton::new(TransitionSet::new(), vec![]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewStates(0));
    }

    #[test]
    fn test_single_state_rejected() {
        let mut t = TransitionSet::new();
        t.add_fixed_point(0);
        let err = Automaton::new(t, vec![Rgb::BLACK]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewStates(1));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = Automaton::new(flip(), vec![Rgb::BLACK]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MismatchedLengths {
                transitions: 2,
                colouring: 1
            }
        );
    }

    #[test]
    fn test_colour_channels_checked() {
        let err = Automaton::new(flip(), vec![Rgb::BLACK, Rgb::new(0.5, 1.5, 0.0)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ColourOutOfRange {
                state: 1,
                channel: 1,
                value: 1.5
            }
        );

        let err = Automaton::new(flip(), vec![Rgb::new(0.0, 0.0, -0.1), Rgb::WHITE]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ColourOutOfRange {
                state: 0,
                channel: 2,
                ..
            }
        ));

        assert!(Automaton::new(flip(), vec![Rgb::new(f32::NAN, 0.0, 0.0), Rgb::WHITE]).is_err());
    }

    #[test]
    fn test_invalid_target_rejected() {
        let mut t = flip();
        t.add_transition(1, 2, |_| true);
        let err = Automaton::new(t, vec![Rgb::BLACK, Rgb::WHITE]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTarget {
                state: 1,
                rule: 1,
                target: 2,
                max: 1
            }
        );
    }

    #[test]
    fn test_undeclared_gap_rejected() {
        let mut t = TransitionSet::new();
        t.add_transition(0, 2, |_| true);
        t.add_transition(2, 0, |_| true);
        let err = Automaton::new(t, vec![Rgb::BLACK; 3]).unwrap_err();
        assert_eq!(err, ConfigError::UndeclaredState(1));
    }

    #[test]
    fn test_trailing_fixed_point() {
        let mut t = TransitionSet::new();
        t.add_transition(0, 2, |_| true);
        t.add_fixed_point(1).add_fixed_point(2);
        let a = Automaton::new(t, vec![Rgb::BLACK; 3]).unwrap();
        assert_eq!(a.count_states(), 3);
        assert!(a.contains(2));
        assert!(!a.contains(3));
    }

    #[test]
    fn test_colouring_is_a_copy() {
        let a = Automaton::new(flip(), vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        let mut colours = a.colouring();
        colours[0] = Rgb::new(1.0, 0.0, 0.0);
        assert_eq!(a.colouring()[0], Rgb::BLACK);
    }

    #[test]
    fn test_checkerboard_step() {
        let a = Automaton::new(flip(), vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
        let grid = Grid::from_columns(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let next = a.step(&grid);
        assert_eq!(next, Grid::from_columns(vec![vec![0, 1], vec![1, 0]]).unwrap());
    }
}
