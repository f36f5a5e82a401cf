mod support;

use netsimplex_mcf::SolverStatus;

#[test]
fn two_node_line_matches_expected_objective() {
    let mut solver = support::build(&[5, -5], &[(0, 1, 0, 10, 1)]);
    support::solve_expecting(&mut solver, SolverStatus::Optimal);

    assert_eq!(solver.get_flow(0).unwrap(), 5);
    assert_eq!(solver.get_total_cost(), 5);
    assert!(solver.validate().unwrap().is_valid());
}

#[test]
fn solving_twice_is_idempotent() {
    let mut solver = support::build(&[5, -5], &[(0, 1, 0, 10, 1)]);
    support::solve_expecting(&mut solver, SolverStatus::Optimal);
    let first_flow = solver.get_flow(0).unwrap();
    let first_cost = solver.get_total_cost();

    // A second solve() without an intervening reset() is a no-op that
    // returns the cached outcome.
    let status_again = solver.solve().unwrap();
    assert_eq!(status_again, SolverStatus::Optimal);
    assert_eq!(solver.get_flow(0).unwrap(), first_flow);
    assert_eq!(solver.get_total_cost(), first_cost);
}
