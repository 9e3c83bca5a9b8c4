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

//! This module provides the implementation of the various cutoffs that can be
//! used to bound the effort spent on a resolution.

use std::time::{Duration, Instant};

use crate::Cutoff;

/// _This is the default cutoff._ It imposes that the search proves
/// optimality (or infeasibility) before it stops.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self, _explored: usize) -> bool {
        false
    }
}

/// Stops the search once the given number of nodes has been expanded. The
/// search then reports the incumbent found so far with `is_exact == false`.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    max_nodes: usize,
}
impl NodeBudget {
    pub fn new(max_nodes: usize) -> Self {
        Self { max_nodes }
    }
}
impl Cutoff for NodeBudget {
    fn must_stop(&self, explored: usize) -> bool {
        explored >= self.max_nodes
    }
}

/// Stops the search once the given wall-clock budget has elapsed. The solver
/// is single threaded so the deadline is simply polled between expansions.
#[derive(Debug, Copy, Clone)]
pub struct TimeBudget {
    deadline: Instant,
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        Self { deadline: Instant::now() + budget }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self, _explored: usize) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Combines several cutoffs; the search stops as soon as any of them says so.
pub struct AnyCutoff {
    cutoffs: Vec<Box<dyn Cutoff>>,
}
impl AnyCutoff {
    pub fn new(cutoffs: Vec<Box<dyn Cutoff>>) -> Self {
        Self { cutoffs }
    }
}
impl Cutoff for AnyCutoff {
    fn must_stop(&self, explored: usize) -> bool {
        self.cutoffs.iter().any(|cutoff| cutoff.must_stop(explored))
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_cutoff {
    use std::time::Duration;

    use crate::{AnyCutoff, Cutoff, NoCutoff, NodeBudget, TimeBudget};

    #[test]
    fn no_cutoff_never_stops() {
        assert!(!NoCutoff.must_stop(0));
        assert!(!NoCutoff.must_stop(usize::MAX));
    }

    #[test]
    fn a_node_budget_stops_once_exhausted() {
        let budget = NodeBudget::new(10);
        assert!(!budget.must_stop(9));
        assert!(budget.must_stop(10));
        assert!(budget.must_stop(11));
    }

    #[test]
    fn an_elapsed_time_budget_stops() {
        let budget = TimeBudget::new(Duration::from_secs(0));
        assert!(budget.must_stop(0));
    }

    #[test]
    fn a_generous_time_budget_does_not_stop() {
        let budget = TimeBudget::new(Duration::from_secs(3600));
        assert!(!budget.must_stop(0));
    }

    #[test]
    fn any_cutoff_stops_when_one_of_its_members_does() {
        let any = AnyCutoff::new(vec![Box::new(NoCutoff), Box::new(NodeBudget::new(5))]);
        assert!(!any.must_stop(4));
        assert!(any.must_stop(5));
    }
}
