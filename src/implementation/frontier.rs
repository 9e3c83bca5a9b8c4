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

//! This module provides the implementation of the solver frontier (priority
//! queue): a binary heap popping the node with the smallest lower bound
//! first, ties resolved by insertion order.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;
use ordered_float::OrderedFloat;

use crate::{Frontier, SearchNode};

/// A frontier entry: the node plus the sequence number it received when it
/// was pushed. The sequence number is what makes tie breaking deterministic.
struct Entry {
    node: SearchNode,
    seq: usize,
}

/// Orders entries so that the heap (a max-heap) pops the smallest lower
/// bound first, and among equal bounds the oldest entry first.
struct CompareEntry;
impl Compare<Entry> for CompareEntry {
    fn compare(&self, l: &Entry, r: &Entry) -> Ordering {
        OrderedFloat(r.node.lower_bound)
            .cmp(&OrderedFloat(l.node.lower_bound))
            .then_with(|| r.seq.cmp(&l.seq))
    }
}

/// The simplest frontier implementation you can think of: a binary heap of
/// search nodes keyed by lower bound, with a monotonically increasing
/// sequence counter for reproducible tie breaking.
pub struct BoundFrontier {
    heap: BinaryHeap<Entry, CompareEntry>,
    seq: usize,
}

impl BoundFrontier {
    /// This creates a new, empty frontier.
    pub fn new() -> Self {
        Self { heap: BinaryHeap::from_vec_cmp(vec![], CompareEntry), seq: 0 }
    }
}
impl Default for BoundFrontier {
    fn default() -> Self {
        Self::new()
    }
}
impl Frontier for BoundFrontier {
    fn push(&mut self, node: SearchNode) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { node, seq });
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
