//! Ready-made automata.

mod conways;
mod forest;
mod langtons;
mod rainbow;

pub use conways::conways;
pub use forest::forest;
pub use langtons::langtons;
pub use rainbow::rainbow;

use crate::error::ConfigError;
use crate::simulation::Automaton;

/// Named automaton selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Model {
    Conways,
    Forest,
    Langtons,
    Rainbow,
}

impl Model {
    pub fn build(self) -> Result<Automaton, ConfigError> {
        match self {
            Model::Conways => conways(),
            Model::Forest => forest(),
            Model::Langtons => langtons(),
            Model::Rainbow => rainbow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_models_build() {
        let expected = [
            (Model::Conways, 2),
            (Model::Forest, 3),
            (Model::Langtons, 10),
            (Model::Rainbow, 7),
        ];
        for (model, states) in expected {
            let automaton = model.build().unwrap();
            assert_eq!(automaton.count_states(), states, "{model:?}");
            assert_eq!(automaton.colouring().len(), states);
        }
    }
}
