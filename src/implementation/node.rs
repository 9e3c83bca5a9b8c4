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

//! This module defines the search node: the snapshot of a partial solution
//! sitting on the frontier.

use fxhash::FxHashSet;

use crate::{CostMatrix, Edge};

/// A partial solution of the branch-and-bound search. Every node owns its
/// reduced matrix and its sets: it is an independent, immutable snapshot, and
/// expanding a node never touches its siblings.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// The reduced matrix this node operates on.
    pub matrix: CostMatrix,
    /// The concrete cost accumulated so far: the sum, over the committed
    /// edges, of the *original* matrix entries.
    pub cost: f64,
    /// cost + the reduction cost of `matrix`. Never decreases from parent to
    /// child, which is what makes pruning sound.
    pub lower_bound: f64,
    /// The ordered list of directed edges committed so far.
    pub path: Vec<Edge>,
    /// Source cities already consumed by a committed edge.
    pub used_from: FxHashSet<usize>,
    /// Destination cities already consumed by a committed edge.
    pub used_to: FxHashSet<usize>,
}

impl SearchNode {
    /// The root node: a fully reduced copy of the instance matrix, no
    /// committed edge, and the reduction cost as initial lower bound.
    pub fn root(matrix: CostMatrix, lower_bound: f64) -> Self {
        Self {
            matrix,
            cost: 0.0,
            lower_bound,
            path: Vec::new(),
            used_from: FxHashSet::default(),
            used_to: FxHashSet::default(),
        }
    }
}
