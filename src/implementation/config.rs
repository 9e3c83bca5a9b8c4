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

//! This module defines the knobs a caller can turn when running a solver.

use std::time::Duration;

use derive_builder::Builder;

use crate::{AnyCutoff, Cutoff, NoCutoff, NodeBudget, TimeBudget};

/// The configuration of a resolution. The defaults run the search to
/// completion with full trace detail; the budgets are defensive margins
/// against pathological inputs and the pruning switch exists so that tests
/// can check that pruning never changes the outcome.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct SolverConfig {
    /// Stop after this many node expansions (`None` = unbounded).
    pub node_budget: Option<usize>,
    /// Stop after this much wall-clock time (`None` = unbounded).
    pub time_budget: Option<Duration>,
    /// When false, nodes are never discarded on account of their bound. The
    /// search then degenerates to exhaustive exploration; it must still
    /// return the exact same solution.
    pub pruning: bool,
    /// When false, trace steps omit the matrix snapshots (the reduction
    /// detail lines are always kept).
    pub capture_matrices: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_budget: None,
            time_budget: None,
            pruning: true,
            capture_matrices: true,
        }
    }
}

impl SolverConfig {
    /// Materializes the configured budgets into a single cutoff.
    pub fn cutoff(&self) -> Box<dyn Cutoff> {
        match (self.node_budget, self.time_budget) {
            (None, None) => Box::new(NoCutoff),
            (Some(nodes), None) => Box::new(NodeBudget::new(nodes)),
            (None, Some(duration)) => Box::new(TimeBudget::new(duration)),
            (Some(nodes), Some(duration)) => Box::new(AnyCutoff::new(vec![
                Box::new(NodeBudget::new(nodes)),
                Box::new(TimeBudget::new(duration)),
            ])),
        }
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
