mod support;

use netsimplex_mcf::SolverStatus;

#[test]
fn demand_unreachable_from_supply_is_infeasible() {
    let mut solver = support::build(&[1, 0, -1], &[(0, 1, 0, 10, 1)]);
    support::solve_expecting(&mut solver, SolverStatus::Infeasible);
}

#[test]
fn arc_capacity_insufficient_to_cover_demand_is_infeasible() {
    let mut solver = support::build(&[10, -10], &[(0, 1, 0, 4, 1)]);
    support::solve_expecting(&mut solver, SolverStatus::Infeasible);
}

#[test]
fn arc_capacity_exactly_sufficient_is_optimal() {
    let mut solver = support::build(&[10, -10], &[(0, 1, 0, 10, 1)]);
    support::solve_expecting(&mut solver, SolverStatus::Optimal);
    assert_eq!(solver.get_flow(0).unwrap(), 10);
}
