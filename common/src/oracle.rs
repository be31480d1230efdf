//! SAT check of what a set of observations logically forces,
//! used to check the knowledge base never concludes more than it may.

use crate::cell::{Cell, all_cells, neighbors};
use itertools::Itertools;
use std::collections::HashMap;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver, Var};

/// For each cell: `Some(true)` if every consistent layout has a mine there,
/// `Some(false)` if none does, `None` if both are possible.
pub fn forced_cells(
    height: usize,
    width: usize,
    observations: &[(Cell, usize)],
) -> HashMap<Cell, Option<bool>> {
    let mut solver = Solver::new();
    let var_map: HashMap<Cell, Var> = all_cells(height, width)
        .map(|cell| (cell, solver.new_var()))
        .collect();
    let mine = |cell: &Cell| Lit::from_var(var_map[cell], true);

    let mut formula = CnfFormula::new();
    for (cell, count) in observations {
        // A probed cell is not a mine.
        formula.add_clause(&[!mine(cell)]);

        let lits: Vec<Lit> = neighbors(*cell, height, width).map(|n| mine(&n)).collect();
        encode_exactly_k(&mut formula, &lits, *count);
    }
    solver.add_formula(&formula);
    assert!(solver.solve().unwrap(), "observations are unsatisfiable");

    let mut forced = HashMap::new();
    for cell in var_map.keys() {
        let can_be = |solver: &mut Solver, lit: Lit| {
            solver.assume(&[lit]);
            let result = solver.solve().unwrap();
            solver.assume(&[]);
            result
        };
        let mine_possible = can_be(&mut solver, mine(cell));
        let safe_possible = can_be(&mut solver, !mine(cell));

        let state = match (mine_possible, safe_possible) {
            (true, true) => None,
            (true, false) => Some(true),
            (false, true) => Some(false),
            (false, false) => unreachable!("formula is satisfiable"),
        };
        forced.insert(*cell, state);
    }
    forced
}

/// Naive "exactly k" encoding; neighborhoods never exceed eight cells.
fn encode_exactly_k(formula: &mut CnfFormula, vars: &[Lit], k: usize) {
    if k > vars.len() {
        formula.add_clause(&[]);
        return;
    }
    // At most k: no k + 1 of them are all mines.
    for combo in vars.iter().copied().combinations(k + 1) {
        let clause: Vec<Lit> = combo.iter().map(|&lit| !lit).collect();
        formula.add_clause(&clause);
    }
    // At least k: any n - k + 1 of them contain a mine.
    if k > 0 {
        for combo in vars.iter().copied().combinations(vars.len() - k + 1) {
            formula.add_clause(&combo);
        }
    }
}

#[test]
fn test_oracle_single_constraint() {
    let forced = forced_cells(1, 2, &[(Cell::new(0, 0), 1)]);
    assert_eq!(forced[&Cell::new(0, 0)], Some(false));
    assert_eq!(forced[&Cell::new(0, 1)], Some(true));

    let forced = forced_cells(1, 3, &[(Cell::new(0, 1), 1)]);
    assert_eq!(forced[&Cell::new(0, 0)], None);
    assert_eq!(forced[&Cell::new(0, 2)], None);
}
