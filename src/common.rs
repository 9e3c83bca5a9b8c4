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

//! This module defines the most basic data types that are used throughout all
//! the code of our library. These are also the types your client code (most
//! likely some UI layer) is going to work with.

use std::fmt;

use serde::Serialize;

// ----------------------------------------------------------------------------
// --- EDGE -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A directed edge committed during the search. It should be understood as
/// "the tour travels from city `from` directly to city `to`". Cities are
/// identified by their index in the instance's label list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

// ----------------------------------------------------------------------------
// --- METHOD -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The solving method requested by the caller. Branch-and-bound is the one
/// with actual algorithmic content; brute force is the reference oracle which
/// remains practical for tiny instances only (it evaluates the (n-1)!
/// permutations of the non-start cities).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Method {
    BranchAndBound,
    BruteForce,
}
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::BranchAndBound => write!(f, "branch and bound"),
            Method::BruteForce => write!(f, "brute force"),
        }
    }
}

// ----------------------------------------------------------------------------
// --- STEP -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One record of the pedagogical trace. Steps are plain immutable data meant
/// for display: a human readable description, an optional block of structured
/// text (typically a formatted matrix snapshot) and an optional result
/// annotation. They play no role whatsoever in the control flow of the search.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Step {
    /// What happened at this point of the resolution.
    pub description: String,
    /// Supporting data, e.g. reduction details and a matrix snapshot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// An outcome worth highlighting (a new incumbent, a bound, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}
impl Step {
    /// A step carrying a description only.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), data: None, result: None }
    }
    /// Attaches a data block to the step.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
    /// Attaches a result annotation to the step.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }
}

// ----------------------------------------------------------------------------
// --- SOLUTION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A complete tour: the total cost and the ordered list of city indices,
/// starting and ending at the same city (the start city is repeated at the
/// end of the route).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Solution {
    pub cost: f64,
    pub route: Vec<usize>,
}

// ----------------------------------------------------------------------------
// --- COMPLETION -------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a resolution attempt.
///
/// Three cases are to be distinguished:
/// * `is_exact` is true and `best` is present: the solution is optimal.
/// * `is_exact` is true and `best` is absent: the instance admits no tour at
///   all (the graph is disconnected in a way no Hamiltonian cycle survives).
/// * `is_exact` is false: a defensive budget interrupted the search before
///   it could be carried to completion; `best` is the incumbent known at that
///   time (if any).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Completion {
    /// True iff the search space was exhaustively covered.
    pub is_exact: bool,
    /// The best tour found, if one was found.
    pub best: Option<Solution>,
    /// The method which produced this outcome.
    pub method: Method,
}

// ----------------------------------------------------------------------------
// --- REPORT -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// What the library hands back to the caller: the outcome of the resolution
/// together with the full ordered trace of decision steps.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub completion: Completion,
    pub steps: Vec<Step>,
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
