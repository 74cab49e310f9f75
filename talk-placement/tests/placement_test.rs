#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::time::Duration;

use itertools::Itertools;
use talk_placement::lower_bound;
use talk_placement::CostSource;
use talk_placement::CostTable;
use talk_placement::PlacementInstance;
use talk_placement::PlacementModel;
use talk_placement::SearchOutcome;
use talk_placement::SearchStrategy;

fn build(instance: PlacementInstance, costs: CostSource) -> PlacementModel {
    let table = costs.build_table(&instance).expect("valid costs");
    PlacementModel::build(instance, table).expect("valid instance")
}

fn talks_per_track(placement: &[usize], no_of_tracks: usize) -> Vec<usize> {
    (0..no_of_tracks)
        .map(|track| placement.iter().filter(|&&assigned| assigned == track).count())
        .collect()
}

#[test]
fn conflicting_pairs_are_separated() {
    let mut model = build(
        PlacementInstance::balanced(2, 2, 10),
        CostSource::Explicit(vec![(0, 1, 10), (2, 3, 10)]),
    );

    let report = SearchStrategy::new(&mut model).find_optimal(0);

    assert_eq!(report.outcome(), SearchOutcome::Optimal);
    assert_eq!(report.total_cost(), Some(0));
    let placement = report.placement().expect("a placement");
    assert_ne!(placement[0], placement[1]);
    assert_ne!(placement[2], placement[3]);
}

#[test]
fn uniform_costs_force_a_balanced_split() {
    let entries = (0..4)
        .tuple_combinations::<(usize, usize)>()
        .map(|(a, b)| (a, b, 5))
        .collect();
    let mut model = build(
        PlacementInstance::balanced(2, 2, 10),
        CostSource::Explicit(entries),
    );

    let report = SearchStrategy::new(&mut model).find_optimal(0);

    assert_eq!(report.outcome(), SearchOutcome::Optimal);
    assert_eq!(report.total_cost(), Some(10));
    let placement = report.placement().expect("a placement");
    assert_eq!(talks_per_track(placement, 2), vec![2, 2]);
}

#[test]
fn reported_cost_matches_the_placement() {
    for seed in [1, 7, 55] {
        let mut model = build(
            PlacementInstance::balanced(2, 3, 20),
            CostSource::Random { seed },
        );

        let report = SearchStrategy::new(&mut model).find_optimal(0);

        assert_eq!(report.outcome(), SearchOutcome::Optimal);
        let placement = report.placement().expect("a placement");
        assert_eq!(report.total_cost(), Some(model.evaluate(placement)));
        assert_eq!(talks_per_track(placement, 2), vec![3, 3]);
        assert!(report.improving_solutions() >= 1);
    }
}

#[test]
fn lower_bound_does_not_exceed_the_optimum() {
    for (tracks, slots, seed) in [(1, 3, 2), (2, 2, 3), (2, 3, 11), (2, 3, 55)] {
        let instance = PlacementInstance::balanced(tracks, slots, 30);
        let table = CostTable::random(instance.no_of_talks, seed, 30).unwrap();
        let estimate = lower_bound::estimate(tracks, slots, &table);
        let mut model = PlacementModel::build(instance, table).unwrap();

        let report = SearchStrategy::new(&mut model).find_optimal(0);

        assert_eq!(report.outcome(), SearchOutcome::Optimal);
        assert_eq!(report.lower_bound(), estimate);
        assert!(estimate <= report.total_cost().unwrap());
    }
}

#[test]
fn capped_search_respects_the_cap() {
    let mut model = build(
        PlacementInstance::balanced(2, 3, 20),
        CostSource::Random { seed: 9 },
    );
    let mut search = SearchStrategy::new(&mut model);

    let uncapped = search.find_under_bound(None, 0);
    assert_eq!(uncapped.outcome(), SearchOutcome::Satisfiable);
    let first_cost = uncapped.total_cost().unwrap();

    let mut cap = first_cost;
    while cap > 0 {
        cap -= 1;
        let report = search.find_under_bound(Some(cap as i32), 0);

        match report.outcome() {
            SearchOutcome::Satisfiable => {
                let cost = report.total_cost().unwrap();
                assert!(cost <= cap);
                cap = cost;
            }
            SearchOutcome::Infeasible => break,
            outcome => panic!("unexpected outcome {outcome}"),
        }
    }
}

#[test]
fn capped_search_below_the_optimum_is_infeasible() {
    let entries = (0..4)
        .tuple_combinations::<(usize, usize)>()
        .map(|(a, b)| (a, b, 5))
        .collect();
    let mut model = build(
        PlacementInstance::balanced(2, 2, 10),
        CostSource::Explicit(entries),
    );

    let report = SearchStrategy::new(&mut model).find_under_bound(Some(9), 0);

    assert_eq!(report.outcome(), SearchOutcome::Infeasible);
    assert!(!report.is_solution_found());
}

#[test]
fn descending_search_reaches_the_optimum() {
    let instance = PlacementInstance::balanced(2, 3, 20);
    let optimum = {
        let mut model = build(instance, CostSource::Random { seed: 4 });
        SearchStrategy::new(&mut model)
            .find_optimal(0)
            .total_cost()
            .unwrap()
    };

    // Without a step every cap is one below the cost just found.
    let mut model = build(instance, CostSource::Random { seed: 4 });
    let exact = SearchStrategy::new(&mut model).descend_from_above(None, 0, 0);
    assert_eq!(exact.outcome(), SearchOutcome::Satisfiable);
    assert_eq!(exact.total_cost(), Some(optimum));

    let mut model = build(instance, CostSource::Random { seed: 4 });
    let coarse = SearchStrategy::new(&mut model).descend_from_above(None, 50, 0);
    assert_eq!(coarse.outcome(), SearchOutcome::Satisfiable);
    assert!(coarse.total_cost().unwrap() >= optimum);
}

#[test]
fn large_costs_do_not_slow_down_the_search() {
    let mut model = build(
        PlacementInstance::balanced(2, 2, 2_000_000),
        CostSource::Explicit(vec![(0, 1, 2_000_000), (2, 3, 2_000_000)]),
    );

    let report = SearchStrategy::new(&mut model).find_optimal(1);

    assert_eq!(report.outcome(), SearchOutcome::Optimal);
    assert_eq!(report.total_cost(), Some(0));
    assert!(report.elapsed() < Duration::from_secs(1));
}

#[test]
fn optimal_search_stops_at_the_timeout() {
    let mut model = build(
        PlacementInstance::balanced(6, 6, 50),
        CostSource::Random { seed: 55 },
    );

    let report = SearchStrategy::new(&mut model).find_optimal(1);

    assert!(matches!(
        report.outcome(),
        SearchOutcome::BestFound | SearchOutcome::Unknown
    ));
    assert!(report.elapsed() < Duration::from_secs(2));
}

#[test]
fn capped_search_stops_at_the_timeout() {
    let mut model = build(
        PlacementInstance::balanced(6, 6, 50),
        CostSource::Random { seed: 55 },
    );

    let report = SearchStrategy::new(&mut model).find_under_bound(None, 1);

    assert!(matches!(
        report.outcome(),
        SearchOutcome::Satisfiable | SearchOutcome::Unknown
    ));
    assert!(report.elapsed() < Duration::from_secs(2));
}
