mod support;

use netsimplex_mcf::SolverStatus;

#[test]
fn negative_cycle_saturates_every_arc_to_capacity() {
    let mut solver = support::build(
        &[0, 0, 0],
        &[(0, 1, 0, 1, -1), (1, 2, 0, 1, -1), (2, 0, 0, 1, -1)],
    );
    support::solve_expecting(&mut solver, SolverStatus::Optimal);

    assert_eq!(solver.get_total_cost(), -3);
    assert_eq!(solver.get_flow(0).unwrap(), 1);
    assert_eq!(solver.get_flow(1).unwrap(), 1);
    assert_eq!(solver.get_flow(2).unwrap(), 1);
    assert!(solver.validate().unwrap().is_valid());
}
