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

//! This module provides the brute-force reference solver: it enumerates
//! every permutation of the non-start cities and keeps the cheapest feasible
//! tour. It exists as a correctness oracle for small instances (and as an
//! alternate method the caller may select); it is not meant for anything
//! beyond demonstration scale.

use itertools::Itertools;
use log::trace;

use crate::{format_value, Completion, Instance, Method, Result, Solution, Solver, Step};

/// The exhaustive oracle. Deterministic: permutations are generated in
/// lexicographic order, and only a strictly cheaper tour replaces the
/// incumbent.
pub struct BruteForceSolver<'a> {
    instance: &'a Instance,
    steps: Vec<Step>,
}

impl<'a> BruteForceSolver<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance, steps: Vec::new() }
    }

    /// Sums the edge weights along the closed route, or yields `None` as
    /// soon as an unreachable edge is crossed.
    fn tour_cost(&self, route: &[usize]) -> Option<f64> {
        let matrix = self.instance.matrix();
        let mut cost = 0.0;
        for leg in route.windows(2) {
            let distance = matrix.get(leg[0], leg[1]);
            if !distance.is_finite() {
                return None;
            }
            cost += distance;
        }
        Some(cost)
    }
}

impl Solver for BruteForceSolver<'_> {
    fn minimize(&mut self) -> Result<Completion> {
        let n = self.instance.nb_cities();
        let mut best_cost = f64::INFINITY;
        let mut best_route: Option<Vec<usize>> = None;

        for order in (1..n).permutations(n - 1) {
            let mut route = Vec::with_capacity(n + 1);
            route.push(0);
            route.extend(order);
            route.push(0);

            let rendered = self.instance.render_route(&route);
            match self.tour_cost(&route) {
                None => {
                    self.steps.push(
                        Step::new("Evaluate permutation")
                            .with_data(rendered)
                            .with_result("Infeasible (∞ edge)".to_string()),
                    );
                }
                Some(cost) => {
                    self.steps.push(
                        Step::new("Evaluate permutation")
                            .with_data(rendered)
                            .with_result(format!("Cost = {}", format_value(cost))),
                    );
                    if cost < best_cost {
                        trace!("new incumbent with cost {cost}");
                        best_cost = cost;
                        best_route = Some(route);
                    }
                }
            }
        }

        let best = best_route.map(|route| {
            self.steps.push(
                Step::new("Best tour found")
                    .with_data(self.instance.render_route(&route))
                    .with_result(format!("Cost = {}", format_value(best_cost))),
            );
            Solution { cost: best_cost, route }
        });
        Ok(Completion { is_exact: true, best, method: Method::BruteForce })
    }

    fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn take_steps(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_brute_force {
    use crate::{BruteForceSolver, Instance, Method, Solver};

    const INF: f64 = f64::INFINITY;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| ((b'A' + i as u8) as char).to_string()).collect()
    }

    fn demo() -> Instance {
        Instance::new(
            labels(4),
            vec![
                vec![INF, 10.0, 15.0, 20.0],
                vec![10.0, INF, 35.0, 25.0],
                vec![15.0, 35.0, INF, 30.0],
                vec![20.0, 25.0, 30.0, INF],
            ],
        )
        .unwrap()
    }

    #[test]
    fn the_demo_instance_solves_to_eighty() {
        let instance = demo();
        let mut solver = BruteForceSolver::new(&instance);
        let completion = solver.minimize().unwrap();
        assert!(completion.is_exact);
        assert_eq!(Method::BruteForce, completion.method);
        assert_eq!(80.0, completion.best.unwrap().cost);
    }

    #[test]
    fn it_evaluates_every_permutation_of_the_non_start_cities() {
        let instance = demo();
        let mut solver = BruteForceSolver::new(&instance);
        solver.minimize().unwrap();
        let evaluations = solver
            .steps()
            .iter()
            .filter(|step| step.description == "Evaluate permutation")
            .count();
        assert_eq!(6, evaluations); // 3! orderings of B, C, D
    }

    #[test]
    fn an_infeasible_permutation_is_reported_not_counted() {
        let instance = Instance::new(
            labels(3),
            vec![
                vec![INF, 1.0, INF],
                vec![1.0, INF, 2.0],
                vec![INF, 2.0, INF],
            ],
        )
        .unwrap();
        let mut solver = BruteForceSolver::new(&instance);
        let completion = solver.minimize().unwrap();
        assert!(completion.best.is_none());
        assert!(solver
            .steps()
            .iter()
            .any(|step| step.result.as_deref() == Some("Infeasible (∞ edge)")));
    }

    #[test]
    fn the_route_starts_and_ends_at_the_first_city() {
        let instance = demo();
        let mut solver = BruteForceSolver::new(&instance);
        let route = solver.minimize().unwrap().best.unwrap().route;
        assert_eq!(0, *route.first().unwrap());
        assert_eq!(0, *route.last().unwrap());
        assert_eq!(5, route.len());
    }
}
