mod common;

use tspanalyser_lib::{
    DatasetSelection, Error, SolverConfig, TourAlgorithm, TourEngine, TourRequest,
};

use common::{assert_valid_tour, complete_graph, engine_for, square_with_diagonals};

#[test]
fn four_node_fixture_has_optimal_cost_80() {
    let engine = TourEngine::with_dataset(square_with_diagonals(), SolverConfig::default());
    let tour = engine.solve_exact(0).expect("tour exists");
    assert_eq!(tour.cost, 80.0);
    assert_valid_tour(engine.graph(), &tour, 0);
}

#[test]
fn every_algorithm_returns_a_permutation_closing_on_start() {
    let engine = TourEngine::with_dataset(complete_graph(8), SolverConfig::default());
    for algorithm in TourAlgorithm::ALL {
        for start in [0, 5] {
            let request = TourRequest::new(algorithm).with_start(start);
            let tour = engine.solve(&request).expect("complete graph has a tour");
            assert_valid_tour(engine.graph(), &tour, start);
        }
    }
}

#[test]
fn exact_never_loses_to_approximation_on_complete_graphs() {
    for n in 3..=8 {
        let engine = TourEngine::with_dataset(complete_graph(n), SolverConfig::default());
        let exact = engine.solve_exact(0).expect("exact");
        let approx = engine.solve_approx().expect("approx");
        let greedy = engine.solve_greedy().expect("greedy");
        assert!(exact.cost <= approx.cost, "n = {n}");
        assert!(exact.cost <= greedy.cost, "n = {n}");
    }
}

#[test]
fn exact_is_deterministic() {
    let engine = TourEngine::with_dataset(complete_graph(7), SolverConfig::default());
    let first = engine.solve_exact(0).expect("tour");
    let second = engine.solve_exact(0).expect("tour");
    assert_eq!(first.ids(), second.ids());
    assert_eq!(first.cost, second.cost);
}

#[test]
fn pruning_does_not_change_the_optimum() {
    let dataset = complete_graph(7);
    let pruned = TourEngine::with_dataset(dataset.clone(), SolverConfig::default());
    let unpruned = TourEngine::with_dataset(
        dataset,
        SolverConfig {
            exact_pruning: false,
            ..SolverConfig::default()
        },
    );
    assert_eq!(
        pruned.solve_exact(0).expect("tour").cost,
        unpruned.solve_exact(0).expect("tour").cost
    );
}

#[test]
fn greedy_uses_only_real_edges_on_complete_graphs() {
    let engine = TourEngine::with_dataset(complete_graph(9), SolverConfig::default());
    let tour = engine.solve_greedy().expect("tour");
    assert_eq!(tour.estimated_legs, 0);
}

#[test]
fn out_of_range_start_is_rejected() {
    let engine = TourEngine::with_dataset(square_with_diagonals(), SolverConfig::default());
    for algorithm in TourAlgorithm::ALL {
        let err = engine
            .solve(&TourRequest::new(algorithm).with_start(42))
            .expect_err("start 42 is not loaded");
        assert!(matches!(err, Error::NoSuchStartVertex { id: 42 }));
        assert_eq!(err.to_string(), "start node 42 does not exist");
    }
}

#[test]
fn dead_end_drives_recovery_to_a_closed_tour() {
    // In shipping.csv nearest neighbour from 0 walks 0-1-2-3 and node 3 has
    // no edge back to 0.
    let engine = engine_for(&DatasetSelection::toy("shipping"));

    let greedy = engine.solve_greedy().expect("greedy always closes");
    assert_eq!(greedy.ids(), vec![0, 1, 2, 3, 0]);
    assert_eq!(greedy.estimated_legs, 1);

    let search = engine.solve_recovery_a(0).expect("recovery search");
    assert_eq!(search.ids(), vec![0, 1, 3, 2, 0]);
    assert_eq!(search.cost, 12.0);
    assert_eq!(search.estimated_legs, 0);

    let backtrack = engine.solve_recovery_b(0).expect("recovery backtrack");
    assert_eq!(backtrack.cost, 12.0);
    assert_valid_tour(engine.graph(), &backtrack, 0);
}

#[test]
fn dead_end_without_budget_reports_no_feasible_tour() {
    let mut engine = engine_for(&DatasetSelection::toy("shipping"));
    engine.set_config(SolverConfig {
        search_attempt_budget: 0,
        backtrack_budget: 0,
        exact_threshold: 0,
        ..SolverConfig::default()
    });

    for result in [engine.solve_recovery_a(0), engine.solve_recovery_b(0)] {
        let err = result.expect_err("budget too small to recover");
        assert!(matches!(err, Error::NoFeasibleTour { start: 0 }));
    }
}

#[test]
fn labelled_toy_graph_matches_the_four_node_fixture() {
    let engine = engine_for(&DatasetSelection::toy("tourism"));
    let tour = engine.solve_exact(0).expect("tour");
    assert_eq!(tour.cost, 80.0);
    assert_eq!(tour.nodes[0].label(), Some("carmo"));
}

#[test]
fn stadiums_optimum() {
    let engine = engine_for(&DatasetSelection::toy("stadiums"));
    let exact = engine.solve_exact(0).expect("tour");
    assert_eq!(exact.cost, 32.0);
    for algorithm in TourAlgorithm::ALL {
        let tour = engine.solve(&TourRequest::new(algorithm)).expect("tour");
        assert!(tour.cost >= exact.cost, "{algorithm} beat the optimum");
    }
}

#[test]
fn sparse_real_world_graph_is_recovered() {
    let engine = engine_for(&DatasetSelection::real_world(1));
    let exact = engine.solve_exact(0).expect("ring exists");
    assert_valid_tour(engine.graph(), &exact, 0);
    assert_eq!(exact.estimated_legs, 0);

    let search = engine.solve_recovery_a(0).expect("recovery search");
    assert_valid_tour(engine.graph(), &search, 0);
    assert!(search.cost >= exact.cost);

    let backtrack = engine.solve_recovery_b(0).expect("recovery backtrack");
    assert_eq!(backtrack.cost, exact.cost);
}

#[test]
fn medium_graph_heuristics_run_on_geographic_data() {
    let engine = engine_for(&DatasetSelection::medium(25));
    assert_eq!(engine.graph().node_count(), 25);
    assert!(engine.graph().is_complete());

    let approx = engine.solve_approx().expect("approx");
    let greedy = engine.solve_greedy().expect("greedy");
    assert_valid_tour(engine.graph(), &approx, 0);
    assert_valid_tour(engine.graph(), &greedy, 0);
    assert_eq!(approx.estimated_legs, 0);
    assert_eq!(greedy.estimated_legs, 0);
}

#[test]
fn replacing_the_graph_resets_results() {
    let mut engine = TourEngine::with_dataset(square_with_diagonals(), SolverConfig::default());
    assert_eq!(engine.solve_exact(0).expect("tour").cost, 80.0);

    let replacement = complete_graph(3);
    engine.set_graph(replacement.graph);
    engine.set_id_to_node(replacement.id_to_node);
    let tour = engine.solve_exact(0).expect("tour");
    assert_eq!(tour.ids().len(), 4);
    assert!(matches!(
        engine.solve_exact(3),
        Err(Error::NoSuchStartVertex { id: 3 })
    ));
}
