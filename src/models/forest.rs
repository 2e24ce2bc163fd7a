//! Forest growth and fire.
//!
//! Dead ground may sprout a tree, more likely next to living trees. Trees
//! catch fire from lightning or from burning neighbours, and fires burn out.

use crate::error::ConfigError;
use crate::simulation::{Automaton, Neighbourhood, Rgb, TransitionSet};

pub const DEAD: usize = 0;
pub const ALIVE: usize = 1;
pub const ON_FIRE: usize = 2;

const SPONTANEOUS_GROWTH: f64 = 0.00001;
const SPREAD_GROWTH: f64 = 0.01;
const LIGHTNING: f64 = 0.0001;
const CATCH_FIRE: f64 = 0.75;
const BURN_OUT: f64 = 0.7;

pub fn forest() -> Result<Automaton, ConfigError> {
    let mut rules = TransitionSet::new();

    rules.add_transition(DEAD, ALIVE, |cell| cell.chance(SPONTANEOUS_GROWTH));
    rules.add_transition(DEAD, ALIVE, |cell| {
        // one roll per neighbouring tree
        (0..cell.count_neighbours(ALIVE, Neighbourhood::Moore)).any(|_| cell.chance(SPREAD_GROWTH))
    });

    rules.add_transition(ALIVE, ON_FIRE, |cell| cell.chance(LIGHTNING));
    rules.add_transition(ALIVE, ON_FIRE, |cell| {
        cell.count_neighbours(ON_FIRE, Neighbourhood::Moore) > 0 && cell.chance(CATCH_FIRE)
    });

    rules.add_transition(ON_FIRE, DEAD, |cell| cell.chance(BURN_OUT));

    Automaton::new(
        rules,
        vec![Rgb::BLACK, Rgb::new(0.0, 1.0, 0.0), Rgb::new(1.0, 0.0, 0.0)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Grid;

    #[test]
    fn test_fire_only_spreads_to_trees() {
        let forest = forest().unwrap();
        let mut grid = Grid::new(30, 30).unwrap();
        for x in 0..30 {
            grid.set(x, 15, ON_FIRE);
        }

        for seed in 0..10 {
            let next = forest.step_seeded(&grid, seed);
            for (x, y, state) in next.iter() {
                // dead ground never ignites and fire never reignites
                if y != 15 {
                    assert_ne!(state, ON_FIRE, "({x}, {y}) caught fire without a tree");
                } else {
                    assert!(state == ON_FIRE || state == DEAD);
                }
            }
        }
    }

    #[test]
    fn test_fires_burn_out() {
        let forest = forest().unwrap();
        let mut grid = Grid::new(20, 20).unwrap();
        for x in 0..20 {
            for y in 0..20 {
                grid.set(x, y, ON_FIRE);
            }
        }

        let next = forest.step_seeded(&grid, 3);
        let burned = next.iter().filter(|&(_, _, s)| s == DEAD).count();
        assert!(burned > 200 && burned < 360, "burned {burned} of 400");
    }

    #[test]
    fn test_seeded_step_reproducible() {
        let forest = forest().unwrap();
        let mut grid = Grid::new(16, 16).unwrap();
        grid.set(8, 8, ALIVE);
        grid.set(8, 9, ON_FIRE);
        assert_eq!(forest.step_seeded(&grid, 11), forest.step_seeded(&grid, 11));
    }
}
