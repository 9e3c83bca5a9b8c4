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

//! # TSPBB
//! TSPBB is a small, self-contained solver for the symmetric Traveling
//! Salesman Problem, built around the classic cost-matrix reduction
//! branch-and-bound (row/column reduction yields an additive lower bound,
//! the zero cell with the largest penalty decides the edge to branch on,
//! and a best-first frontier prunes everything that cannot strictly improve
//! on the incumbent). A brute-force oracle is provided for cross validation
//! and as an alternate method on tiny instances.
//!
//! The library targets pedagogical use: every resolution returns, next to
//! the optimal tour, the complete ordered trace of decision steps
//! (reductions, selected zeros, include/exclude branches, prunings and
//! completed tours) ready for a UI layer to display. The computation itself
//! is pure and synchronous; the trace is plain data, never control flow.
//!
//! ## Quick Example
//! The following solves the 4-city demonstration instance and checks that
//! the optimal tour costs 80.
//!
//! ```
//! use tspbb::*;
//!
//! let labels = vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()];
//! let instance = Instance::from_pairs(labels, &[
//!     ("A", "B", 10.0), ("A", "C", 15.0), ("A", "D", 20.0),
//!     ("B", "C", 35.0), ("B", "D", 25.0),
//!     ("C", "D", 30.0),
//! ]).unwrap();
//!
//! let report = solve(&instance, Method::BranchAndBound, &SolverConfig::default()).unwrap();
//!
//! let best = report.completion.best.unwrap();
//! assert_eq!(80.0, best.cost);
//! assert!(report.completion.is_exact);
//! assert!(!report.steps.is_empty());
//! ```
//!
//! ## Infeasible instances
//! A disconnected instance is not an error: the resolution completes with
//! `best == None` and `is_exact == true` (the absence of a tour was proved).
//! Errors are reserved for invalid input (non-square or asymmetric matrix,
//! negative distances, fewer than 3 cities) -- all rejected eagerly when the
//! `Instance` is built -- and for internal invariant violations.

mod abstraction;
mod common;
mod errors;
mod implementation;
mod instance;

pub use abstraction::*;
pub use common::*;
pub use errors::*;
pub use implementation::*;
pub use instance::*;

/// Solves the given instance with the requested method and hands back the
/// outcome together with the full pedagogical trace. This is the one-stop
/// entry point UI layers are expected to call.
pub fn solve(instance: &Instance, method: Method, config: &SolverConfig) -> Result<Report> {
    match method {
        Method::BranchAndBound => {
            let cutoff = config.cutoff();
            let mut frontier = BoundFrontier::new();
            let mut solver =
                ReductionSolver::new(instance, config, cutoff.as_ref(), &mut frontier);
            let completion = solver.minimize()?;
            Ok(Report { completion, steps: solver.take_steps() })
        }
        Method::BruteForce => {
            let mut solver = BruteForceSolver::new(instance);
            let completion = solver.minimize()?;
            Ok(Report { completion, steps: solver.take_steps() })
        }
    }
}
