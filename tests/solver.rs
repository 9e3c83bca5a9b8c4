// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! End-to-end tests of the two solving methods: branch and bound is cross
//! validated against the exhaustive oracle on a battery of small instances
//! (handcrafted and pseudo-random), and the public contract of `solve` is
//! checked on the fixed scenarios.

use tspbb::{solve, Instance, Method, Report, SolverConfig, SolverConfigBuilder};

const INF: f64 = f64::INFINITY;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| ((b'A' + i as u8) as char).to_string()).collect()
}

fn instance(distances: Vec<Vec<f64>>) -> Instance {
    let n = distances.len();
    Instance::new(labels(n), distances).expect("instance must be valid")
}

fn demo() -> Instance {
    instance(vec![
        vec![INF, 10.0, 15.0, 20.0],
        vec![10.0, INF, 35.0, 25.0],
        vec![15.0, 35.0, INF, 30.0],
        vec![20.0, 25.0, 30.0, INF],
    ])
}

fn triangle() -> Instance {
    instance(vec![
        vec![INF, 1.0, 3.0],
        vec![1.0, INF, 2.0],
        vec![3.0, 2.0, INF],
    ])
}

fn bnb(instance: &Instance) -> Report {
    solve(instance, Method::BranchAndBound, &SolverConfig::default()).unwrap()
}

fn brute(instance: &Instance) -> Report {
    solve(instance, Method::BruteForce, &SolverConfig::default()).unwrap()
}

/// A tiny xorshift generator, enough to build reproducible instances
/// without pulling a full-blown RNG into the dev dependencies.
struct XorShift(u64);
impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    /// A distance in [1, 100].
    fn distance(&mut self) -> f64 {
        (self.next() % 100 + 1) as f64
    }
}

/// Builds a symmetric instance with n cities and pseudo-random integer
/// distances. Same seed, same instance.
fn random_instance(n: usize, seed: u64) -> Instance {
    let mut rng = XorShift(seed);
    let mut distances = vec![vec![INF; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = rng.distance();
            distances[i][j] = d;
            distances[j][i] = d;
        }
    }
    instance(distances)
}

fn route_cost(instance: &Instance, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|leg| instance.matrix().get(leg[0], leg[1]))
        .sum()
}

fn assert_valid_tour(instance: &Instance, route: &[usize], cost: f64) {
    let n = instance.nb_cities();
    assert_eq!(n + 1, route.len());
    assert_eq!(route.first(), route.last());
    let mut visited: Vec<usize> = route[..n].to_vec();
    visited.sort_unstable();
    assert_eq!((0..n).collect::<Vec<_>>(), visited);
    assert_eq!(cost, route_cost(instance, route));
}


// ############################################################################
// #### CROSS VALIDATION ######################################################
// ############################################################################

#[test]
fn branch_and_bound_agrees_with_the_oracle_on_random_instances() {
    for n in 3..=8 {
        for seed in 1..=5u64 {
            let instance = random_instance(n, seed * 7919 + n as u64);
            let exact = bnb(&instance);
            let oracle = brute(&instance);
            assert!(exact.completion.is_exact);
            let exact = exact.completion.best.expect("complete graph has a tour");
            let oracle = oracle.completion.best.unwrap();
            assert_eq!(oracle.cost, exact.cost, "mismatch on n={n} seed={seed}");
            assert_valid_tour(&instance, &exact.route, exact.cost);
        }
    }
}

#[test]
fn branch_and_bound_agrees_with_the_oracle_when_some_edges_are_missing() {
    for n in 4..=7 {
        for seed in 1..=5u64 {
            let mut rng = XorShift(seed * 104729 + n as u64);
            let mut distances = vec![vec![INF; n]; n];
            for i in 0..n {
                for j in (i + 1)..n {
                    // roughly one pair out of four is unreachable
                    let d = if rng.next() % 4 == 0 { INF } else { rng.distance() };
                    distances[i][j] = d;
                    distances[j][i] = d;
                }
            }
            let instance = instance(distances);
            let exact = bnb(&instance).completion;
            let oracle = brute(&instance).completion;
            assert!(exact.is_exact);
            match (exact.best, oracle.best) {
                (None, None) => {}
                (Some(a), Some(b)) => assert_eq!(b.cost, a.cost, "n={n} seed={seed}"),
                (a, b) => panic!(
                    "feasibility disagreement on n={n} seed={seed}: bnb={:?} oracle={:?}",
                    a, b
                ),
            }
        }
    }
}


// ############################################################################
// #### FIXED SCENARIOS #######################################################
// ############################################################################

#[test]
fn the_four_city_demo_costs_eighty() {
    let instance = demo();
    let report = bnb(&instance);
    let best = report.completion.best.unwrap();
    assert_eq!(80.0, best.cost);
    assert_valid_tour(&instance, &best.route, best.cost);
}

#[test]
fn the_triangle_costs_six() {
    let instance = triangle();
    assert_eq!(6.0, bnb(&instance).completion.best.unwrap().cost);
    assert_eq!(6.0, brute(&instance).completion.best.unwrap().cost);
}

#[test]
fn a_disconnected_instance_is_proved_infeasible() {
    let instance = instance(vec![
        vec![INF, 1.0, INF, INF],
        vec![1.0, INF, INF, INF],
        vec![INF, INF, INF, 1.0],
        vec![INF, INF, 1.0, INF],
    ]);
    let completion = bnb(&instance).completion;
    assert!(completion.is_exact);
    assert!(completion.best.is_none());
}

#[test]
fn the_initial_lower_bound_never_exceeds_the_optimum() {
    for seed in 1..=10u64 {
        let instance = random_instance(6, seed);
        let report = bnb(&instance);
        let optimum = report.completion.best.unwrap().cost;
        let bound: f64 = report.steps[0]
            .result
            .as_deref()
            .and_then(|r| r.strip_prefix("Initial lower bound = "))
            .and_then(|v| v.parse().ok())
            .expect("the trace opens with the initial reduction");
        assert!(bound <= optimum, "bound {bound} > optimum {optimum} (seed={seed})");
    }
}


// ############################################################################
// #### CONFIGURATION #########################################################
// ############################################################################

#[test]
fn disabling_the_pruning_does_not_change_the_answer() {
    let relaxed = SolverConfigBuilder::default().pruning(false).build().unwrap();
    for seed in 1..=5u64 {
        let instance = random_instance(5, seed);
        let pruned = bnb(&instance).completion.best.unwrap();
        let full = solve(&instance, Method::BranchAndBound, &relaxed)
            .unwrap()
            .completion
            .best
            .unwrap();
        assert_eq!(full.cost, pruned.cost);
    }
}

#[test]
fn an_exhausted_node_budget_yields_an_inexact_completion() {
    let config = SolverConfigBuilder::default().node_budget(Some(1)).build().unwrap();
    let completion = solve(&demo(), Method::BranchAndBound, &config).unwrap().completion;
    assert!(!completion.is_exact);
}

#[test]
fn repeated_resolutions_produce_the_same_report() {
    let instance = random_instance(7, 42);
    let first = bnb(&instance);
    let second = bnb(&instance);
    assert_eq!(
        first.completion.best.as_ref().map(|s| (s.cost, s.route.clone())),
        second.completion.best.as_ref().map(|s| (s.cost, s.route.clone()))
    );
    assert_eq!(first.steps.len(), second.steps.len());
    for (a, b) in first.steps.iter().zip(second.steps.iter()) {
        assert_eq!(a.description, b.description);
        assert_eq!(a.data, b.data);
        assert_eq!(a.result, b.result);
    }
}

#[test]
fn the_report_serializes_to_json() {
    let report = bnb(&triangle());
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"is_exact\":true"));
    assert!(json.contains("Initial matrix reduction"));
}
