use std::fmt;

use crate::error::ConfigError;
use crate::simulation::{Cell, State};

/// Condition deciding whether a transition fires for a given cell
pub type Predicate = Box<dyn Fn(&Cell<'_>) -> bool + Send + Sync>;

/// A conditional move from one state to `target`
pub struct Transition {
    pub target: State,
    predicate: Predicate,
}

impl Transition {
    pub fn fires(&self, cell: &Cell<'_>) -> bool {
        (self.predicate)(cell)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Rules collected per source state, before the automaton freezes them.
///
/// States are 0-indexed. Registering a rule for a state beyond the current
/// length grows the set; any skipped states are left undeclared and must
/// either receive rules or be declared with [`TransitionSet::add_fixed_point`]
/// before the set is frozen.
///
/// ```
/// use cellular_automata::simulation::{Neighbourhood, TransitionSet};
///
/// const DEAD: usize = 0;
/// const ALIVE: usize = 1;
///
/// let mut rules = TransitionSet::new();
/// rules.add_transition(DEAD, ALIVE, |cell| {
///     cell.neighbour(1, 0) == Some(ALIVE)
/// });
/// rules.add_fixed_point(ALIVE);
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TransitionSet {
    states: Vec<Option<Vec<Transition>>>,
}

impl TransitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of state slots, declared or not
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Append a rule to `from`'s list. Insertion order is evaluation order.
    pub fn add_transition<F>(&mut self, from: State, to: State, predicate: F) -> &mut Self
    where
        F: Fn(&Cell<'_>) -> bool + Send + Sync + 'static,
    {
        self.slot(from).push(Transition {
            target: to,
            predicate: Box::new(predicate),
        });
        self
    }

    /// Declare `state` as intentionally having no rules of its own
    pub fn add_fixed_point(&mut self, state: State) -> &mut Self {
        self.slot(state);
        self
    }

    fn slot(&mut self, state: State) -> &mut Vec<Transition> {
        if state >= self.states.len() {
            self.states.resize_with(state + 1, || None);
        }
        self.states[state].get_or_insert_with(Vec::new)
    }

    /// Freeze into a fixed-size table, rejecting undeclared gaps.
    pub(crate) fn freeze(self) -> Result<RuleTable, ConfigError> {
        let mut rules = Vec::with_capacity(self.states.len());
        for (state, transitions) in self.states.into_iter().enumerate() {
            match transitions {
                Some(transitions) => rules.push(transitions.into_boxed_slice()),
                None => return Err(ConfigError::UndeclaredState(state)),
            }
        }
        Ok(RuleTable {
            rules: rules.into_boxed_slice(),
        })
    }

    pub(crate) fn targets(&self) -> impl Iterator<Item = (State, usize, State)> + '_ {
        self.states.iter().enumerate().flat_map(|(state, slot)| {
            slot.iter()
                .flatten()
                .enumerate()
                .map(move |(rule, t)| (state, rule, t.target))
        })
    }
}

/// Frozen per-state rule lists, indexed `0..N`
#[derive(Debug)]
pub struct RuleTable {
    rules: Box<[Box<[Transition]>]>,
}

impl RuleTable {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules_for(&self, state: State) -> Option<&[Transition]> {
        self.rules.get(state).map(|r| &**r)
    }

    /// Target of the first rule for `state` whose predicate holds.
    ///
    /// `None` means the cell keeps its state, either because no rule fired or
    /// because `state` has no rules at all.
    pub fn evaluate(&self, state: State, cell: &Cell<'_>) -> Option<State> {
        self.rules_for(state)?
            .iter()
            .find(|t| t.fires(cell))
            .map(|t| t.target)
    }
}
