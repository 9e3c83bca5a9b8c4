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

//! This module defines the `Solver` trait.

use crate::{Completion, Result, Step};

/// This is the solver abstraction: something able to search for the minimum
/// cost Hamiltonian cycle of a validated instance, recording a pedagogical
/// trace while it does so. It is implemented both by the reduction-based
/// branch-and-bound solver and by the brute-force oracle.
pub trait Solver {
    /// This method orders the solver to search for the cheapest tour. The
    /// returned `Completion` is marked exact when the search space was
    /// covered exhaustively (either an optimal tour was found, or the
    /// instance was proved infeasible); it is inexact only when a defensive
    /// cutoff interrupted the search.
    ///
    /// An `Err` is returned solely on an internal invariant violation
    /// (`Error::BrokenTour`): the search itself never errors for algorithmic
    /// reasons, and an infeasible instance yields `Ok` with no solution.
    fn minimize(&mut self) -> Result<Completion>;
    /// Gives a view of the trace recorded so far.
    fn steps(&self) -> &[Step];
    /// Takes ownership of the recorded trace, leaving an empty one behind.
    fn take_steps(&mut self) -> Vec<Step>;
}
