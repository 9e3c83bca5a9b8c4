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

//! This module provides the reduction-based branch-and-bound solver: the
//! best-first exploration of include/exclude edge decisions, bounded by the
//! matrix reduction cost and pruned against the incumbent.

use fxhash::FxHashSet;
use itertools::Itertools;
use log::{debug, trace};

use crate::{
    block_subcycles, format_value, reconstruct_tour, Completion, CostMatrix, Cutoff, Edge,
    Frontier, Instance, Method, Reduction, Result, SearchNode, Solution, Solver, SolverConfig,
    Step, ZeroChoice,
};

/// The branch-and-bound solver. Each popped node either gets pruned against
/// the incumbent, or is expanded into an "include edge" and an "exclude
/// edge" child; children whose bound cannot strictly improve on the
/// incumbent, or whose matrix lost its last finite entry in some unused row
/// or column, are discarded on the spot.
///
/// The search is deterministic: the frontier breaks bound ties by insertion
/// order and the zero selection breaks penalty ties in row-major order, so
/// repeated runs on the same instance produce identical traces and results.
pub struct ReductionSolver<'a> {
    /// The validated instance being solved.
    instance: &'a Instance,
    /// The resolution knobs (budgets, pruning, trace detail).
    config: &'a SolverConfig,
    /// The defensive cutoff; when it triggers the search stops and the
    /// outcome is flagged inexact.
    cutoff: &'a dyn Cutoff,
    /// The set of nodes that must still be explored, popped in ascending
    /// lower bound order.
    frontier: &'a mut dyn Frontier,
    /// Number of nodes popped and expanded so far.
    explored: usize,
    /// Cost of the best complete tour found so far (infinite while none).
    best_cost: f64,
    /// Edge set of the best complete tour found so far.
    best_path: Option<Vec<Edge>>,
    /// The pedagogical trace.
    steps: Vec<Step>,
    /// Set when the cutoff interrupted the search.
    aborted: bool,
}

impl<'a> ReductionSolver<'a> {
    pub fn new(
        instance: &'a Instance,
        config: &'a SolverConfig,
        cutoff: &'a dyn Cutoff,
        frontier: &'a mut dyn Frontier,
    ) -> Self {
        Self {
            instance,
            config,
            cutoff,
            frontier,
            explored: 0,
            best_cost: f64::INFINITY,
            best_path: None,
            steps: Vec::new(),
            aborted: false,
        }
    }

    /// Reduces the full input matrix and posts the root node onto the
    /// frontier; its reduction cost is the initial lower bound of the whole
    /// instance.
    fn initialize(&mut self) {
        let mut matrix = self.instance.matrix().clone();
        let reduction = matrix.reduce();
        let mut step = Step::new("Initial matrix reduction")
            .with_result(format!("Initial lower bound = {}", format_value(reduction.cost)));
        if let Some(data) = self.reduction_data(&reduction, &matrix) {
            step = step.with_data(data);
        }
        self.steps.push(step);

        let root = SearchNode::root(matrix, reduction.cost);
        if root.matrix.is_feasible(&root.used_from, &root.used_to) {
            self.frontier.push(root);
        } else {
            debug!("root matrix has a city without any finite edge, no tour exists");
            self.steps.push(
                Step::new("Instance is infeasible")
                    .with_data("Some city has no finite edge at all: no tour can exist"),
            );
        }
    }

    fn process_one_node(&mut self, node: SearchNode) {
        let n = self.instance.nb_cities();
        match node.matrix.best_zero(&node.used_from, &node.used_to) {
            None => {
                // leaf: either a tour one edge away from closing, or a dead end
                if node.path.len() == n - 1 {
                    self.try_complete(&node.path, &node.used_from, &node.used_to, node.cost);
                } else {
                    trace!("dead end at depth {} (no selectable zero)", node.path.len());
                }
            }
            Some(choice) => {
                self.steps.push(
                    Step::new("Select zero with largest penalty").with_data(format!(
                        "Selected edge {} → {} (penalty = {})",
                        self.instance.label(choice.row),
                        self.instance.label(choice.col),
                        format_value(choice.penalty)
                    )),
                );
                self.branch_include(&node, choice);
                self.branch_exclude(&node, choice);
            }
        }
    }

    /// Commits the chosen edge: its row, column and reverse cell become
    /// infinite, every premature sub-cycle closure is cut, and the matrix is
    /// re-reduced to tighten the child's bound.
    fn branch_include(&mut self, node: &SearchNode, choice: ZeroChoice) {
        let n = self.instance.nb_cities();
        let mut matrix = node.matrix.clone();
        for col in 0..n {
            matrix.set(choice.row, col, f64::INFINITY);
        }
        for row in 0..n {
            matrix.set(row, choice.col, f64::INFINITY);
        }
        matrix.set(choice.col, choice.row, f64::INFINITY);

        let mut path = node.path.clone();
        path.push(Edge { from: choice.row, to: choice.col });
        block_subcycles(&mut matrix, &path, n);

        let reduction = matrix.reduce();
        let cost = node.cost + self.instance.matrix().get(choice.row, choice.col);
        let lower_bound = cost + reduction.cost;

        let mut step = Step::new(format!(
            "Include edge {} → {}",
            self.instance.label(choice.row),
            self.instance.label(choice.col)
        ))
        .with_result(format!("Lower bound = {}", format_value(lower_bound)));
        if let Some(data) = self.reduction_data(&reduction, &matrix) {
            step = step.with_data(data);
        }
        self.steps.push(step);

        let mut used_from = node.used_from.clone();
        used_from.insert(choice.row);
        let mut used_to = node.used_to.clone();
        used_to.insert(choice.col);

        if path.len() == n - 1 {
            self.try_complete(&path, &used_from, &used_to, cost);
        } else if self.beats_best(lower_bound) {
            if matrix.is_feasible(&used_from, &used_to) {
                trace!("push include child, bound {lower_bound}");
                self.frontier.push(SearchNode {
                    matrix,
                    cost,
                    lower_bound,
                    path,
                    used_from,
                    used_to,
                });
            } else {
                debug!("include child lost its last finite entry, dropped");
            }
        }
    }

    /// Forbids the chosen edge: only its cell becomes infinite, the matrix
    /// is re-reduced, and the committed path and cost stay untouched.
    fn branch_exclude(&mut self, node: &SearchNode, choice: ZeroChoice) {
        let mut matrix = node.matrix.clone();
        matrix.set(choice.row, choice.col, f64::INFINITY);
        let reduction = matrix.reduce();
        let lower_bound = node.cost + reduction.cost;

        let mut step = Step::new(format!(
            "Exclude edge {} → {}",
            self.instance.label(choice.row),
            self.instance.label(choice.col)
        ))
        .with_result(format!("Lower bound = {}", format_value(lower_bound)));
        if let Some(data) = self.reduction_data(&reduction, &matrix) {
            step = step.with_data(data);
        }
        self.steps.push(step);

        if self.beats_best(lower_bound) {
            if matrix.is_feasible(&node.used_from, &node.used_to) {
                trace!("push exclude child, bound {lower_bound}");
                self.frontier.push(SearchNode {
                    matrix,
                    cost: node.cost,
                    lower_bound,
                    path: node.path.clone(),
                    used_from: node.used_from.clone(),
                    used_to: node.used_to.clone(),
                });
            } else {
                debug!("exclude child lost its last finite entry, dropped");
            }
        }
    }

    /// A path of n-1 committed edges leaves exactly one source and one
    /// destination unused: the implicit closing edge. When that edge exists
    /// in the original matrix, the candidate tour is recorded and compared
    /// (strictly) against the incumbent.
    fn try_complete(
        &mut self,
        path: &[Edge],
        used_from: &FxHashSet<usize>,
        used_to: &FxHashSet<usize>,
        cost: f64,
    ) {
        let n = self.instance.nb_cities();
        let from = (0..n).find(|city| !used_from.contains(city));
        let to = (0..n).find(|city| !used_to.contains(city));
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };
        let closing = self.instance.matrix().get(from, to);
        if !closing.is_finite() {
            trace!("closing edge {from} -> {to} is unreachable, candidate dropped");
            return;
        }

        let total = cost + closing;
        let mut edges = path.to_vec();
        edges.push(Edge { from, to });
        let rendered = edges
            .iter()
            .map(|e| format!("{}→{}", self.instance.label(e.from), self.instance.label(e.to)))
            .join(", ");
        self.steps.push(
            Step::new("Complete tour")
                .with_data(format!("Edges: {rendered}"))
                .with_result(format!("Cost = {}", format_value(total))),
        );

        if total < self.best_cost {
            debug!("new incumbent with cost {total}");
            self.best_cost = total;
            self.best_path = Some(edges);
        }
    }

    /// Strict improvement test, short-circuited when pruning is disabled.
    fn beats_best(&self, lower_bound: f64) -> bool {
        !self.config.pruning || lower_bound < self.best_cost
    }

    /// The reduction detail lines, with a matrix snapshot appended when the
    /// configuration asks for one. `None` when there is nothing to show.
    fn reduction_data(&self, reduction: &Reduction, matrix: &CostMatrix) -> Option<String> {
        let mut data = reduction.detail();
        if self.config.capture_matrices {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str("Reduced matrix:\n");
            data.push_str(&matrix.render(self.instance.labels()));
        }
        if data.is_empty() {
            None
        } else {
            Some(data)
        }
    }
}

impl Solver for ReductionSolver<'_> {
    fn minimize(&mut self) -> Result<Completion> {
        self.initialize();

        while let Some(node) = self.frontier.pop() {
            if self.cutoff.must_stop(self.explored) {
                debug!("cutoff after {} expansions, search incomplete", self.explored);
                self.steps.push(
                    Step::new("Search budget exhausted")
                        .with_result("Result is the best tour found so far".to_string()),
                );
                self.aborted = true;
                self.frontier.clear();
                break;
            }
            self.explored += 1;

            if self.config.pruning && node.lower_bound >= self.best_cost {
                trace!(
                    "prune node: bound {} >= best {}",
                    node.lower_bound,
                    self.best_cost
                );
                self.steps.push(Step::new("Prune node").with_data(format!(
                    "Lower bound {} ≥ current best {}",
                    format_value(node.lower_bound),
                    format_value(self.best_cost)
                )));
                continue;
            }
            self.process_one_node(node);
        }

        let best = match &self.best_path {
            Some(edges) => {
                let route = reconstruct_tour(edges, self.instance.nb_cities())?;
                Some(Solution { cost: self.best_cost, route })
            }
            None => None,
        };
        Ok(Completion { is_exact: !self.aborted, best, method: Method::BranchAndBound })
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
mod test_reduction_solver {
    use crate::{
        BoundFrontier, Instance, Method, NoCutoff, ReductionSolver, Solver, SolverConfig,
        SolverConfigBuilder,
    };

    const INF: f64 = f64::INFINITY;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| ((b'A' + i as u8) as char).to_string()).collect()
    }

    /// The 4 city demonstration instance of the interactive page.
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

    fn solve(instance: &Instance, config: &SolverConfig) -> crate::Completion {
        let cutoff = config.cutoff();
        let mut frontier = BoundFrontier::new();
        let mut solver = ReductionSolver::new(instance, config, cutoff.as_ref(), &mut frontier);
        solver.minimize().unwrap()
    }

    #[test]
    fn the_demo_instance_solves_to_eighty() {
        let completion = solve(&demo(), &SolverConfig::default());
        assert!(completion.is_exact);
        assert_eq!(Method::BranchAndBound, completion.method);
        let best = completion.best.unwrap();
        assert_eq!(80.0, best.cost);
    }

    #[test]
    fn the_reported_route_is_a_closed_permutation() {
        let completion = solve(&demo(), &SolverConfig::default());
        let route = completion.best.unwrap().route;
        assert_eq!(5, route.len());
        assert_eq!(route.first(), route.last());
        let mut cities: Vec<usize> = route[..4].to_vec();
        cities.sort_unstable();
        assert_eq!(vec![0, 1, 2, 3], cities);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let instance = demo();
        let config = SolverConfig::default();

        let cutoff = NoCutoff;
        let mut frontier = BoundFrontier::new();
        let mut first = ReductionSolver::new(&instance, &config, &cutoff, &mut frontier);
        let completion_a = first.minimize().unwrap();
        let steps_a = first.take_steps();

        let mut frontier = BoundFrontier::new();
        let mut second = ReductionSolver::new(&instance, &config, &cutoff, &mut frontier);
        let completion_b = second.minimize().unwrap();
        let steps_b = second.take_steps();

        assert_eq!(completion_a, completion_b);
        assert_eq!(steps_a, steps_b);
    }

    #[test]
    fn disabling_pruning_does_not_change_the_answer() {
        let pruned = solve(&demo(), &SolverConfig::default());
        let exhaustive = solve(
            &demo(),
            &SolverConfigBuilder::default().pruning(false).build().unwrap(),
        );
        assert_eq!(pruned.best, exhaustive.best);
    }

    #[test]
    fn a_triangle_costs_the_sum_of_its_edges() {
        let instance = Instance::new(
            labels(3),
            vec![
                vec![INF, 1.0, 3.0],
                vec![1.0, INF, 2.0],
                vec![3.0, 2.0, INF],
            ],
        )
        .unwrap();
        let completion = solve(&instance, &SolverConfig::default());
        assert_eq!(6.0, completion.best.unwrap().cost);
    }

    #[test]
    fn an_unreachable_pair_without_detour_is_infeasible() {
        // in a triangle, every tour uses all three edges: one missing edge
        // makes the instance unsolvable
        let instance = Instance::new(
            labels(3),
            vec![
                vec![INF, 1.0, INF],
                vec![1.0, INF, 2.0],
                vec![INF, 2.0, INF],
            ],
        )
        .unwrap();
        let completion = solve(&instance, &SolverConfig::default());
        assert!(completion.is_exact);
        assert!(completion.best.is_none());
    }

    #[test]
    fn a_city_with_no_edge_at_all_is_infeasible() {
        let instance = Instance::new(
            labels(4),
            vec![
                vec![INF, INF, INF, INF],
                vec![INF, INF, 1.0, 2.0],
                vec![INF, 1.0, INF, 3.0],
                vec![INF, 2.0, 3.0, INF],
            ],
        )
        .unwrap();
        let completion = solve(&instance, &SolverConfig::default());
        assert!(completion.is_exact);
        assert!(completion.best.is_none());
    }

    #[test]
    fn a_tiny_node_budget_yields_an_inexact_outcome() {
        let config = SolverConfigBuilder::default()
            .node_budget(Some(1))
            .build()
            .unwrap();
        let completion = solve(&demo(), &config);
        assert!(!completion.is_exact);
    }

    #[test]
    fn the_trace_starts_with_the_initial_reduction() {
        let instance = demo();
        let config = SolverConfig::default();
        let cutoff = NoCutoff;
        let mut frontier = BoundFrontier::new();
        let mut solver = ReductionSolver::new(&instance, &config, &cutoff, &mut frontier);
        solver.minimize().unwrap();
        let steps = solver.steps();
        assert_eq!("Initial matrix reduction", steps[0].description);
        assert_eq!(
            Some("Initial lower bound = 70".to_string()),
            steps[0].result
        );
    }

    #[test]
    fn matrix_snapshots_can_be_turned_off() {
        let instance = demo();
        let config = SolverConfigBuilder::default()
            .capture_matrices(false)
            .build()
            .unwrap();
        let cutoff = NoCutoff;
        let mut frontier = BoundFrontier::new();
        let mut solver = ReductionSolver::new(&instance, &config, &cutoff, &mut frontier);
        solver.minimize().unwrap();
        assert!(solver
            .steps()
            .iter()
            .all(|step| !step.data.as_deref().unwrap_or("").contains("Reduced matrix")));
    }
}
