mod support;

use netsimplex_mcf::SolverStatus;

#[test]
fn diamond_routes_all_supply_through_the_cheaper_path() {
    let mut solver = support::build(
        &[10, 0, 0, -10],
        &[
            (0, 1, 0, 10, 2),
            (0, 2, 0, 10, 3),
            (1, 3, 0, 10, 1),
            (2, 3, 0, 10, 2),
        ],
    );
    support::solve_expecting(&mut solver, SolverStatus::Optimal);

    assert_eq!(solver.get_total_cost(), 30);
    // Arc 0 is 0->1, arc 2 is 1->3: the cheaper leg (cost 2+1=3 vs 3+2=5).
    assert_eq!(solver.get_flow(0).unwrap(), 10);
    assert_eq!(solver.get_flow(2).unwrap(), 10);
    assert_eq!(solver.get_flow(1).unwrap(), 0);
    assert_eq!(solver.get_flow(3).unwrap(), 0);
    assert!(solver.validate().unwrap().is_valid());
}
