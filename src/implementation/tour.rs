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

//! This module provides the two small graph utilities of the search, both
//! built on the successor map of the committed edges: blocking the cells
//! that would close a premature sub-cycle, and reconstructing the final
//! ordered tour out of the accepted edge set.

use fxhash::FxHashMap;

use crate::{CostMatrix, Edge, Error, Result};

/// Walks the chains formed by the committed edges and sets to infinity every
/// cell whose selection would close a cycle before all `n` cities are
/// covered.
///
/// Concretely: starting from every city with an outgoing committed edge,
/// follow the successors to the end of the chain; unless the chain already
/// covers all `n` cities (in which case closing it is exactly the final tour
/// edge), forbid the edge going from the chain's last city back to the
/// starting point of the walk. Walks started mid-chain forbid cells that are
/// equally unusable (their destination already has an incoming edge), so no
/// legitimate completion is ever cut.
pub fn block_subcycles(matrix: &mut CostMatrix, path: &[Edge], n: usize) {
    let successor: FxHashMap<usize, usize> =
        path.iter().map(|edge| (edge.from, edge.to)).collect();

    for &start in successor.keys() {
        let mut covered = 0_usize;
        let mut current = start;
        while let Some(&next) = successor.get(&current) {
            covered += 1;
            current = next;
            if current == start {
                break;
            }
        }
        // `covered` counts the edges walked, so the chain from `start` down
        // to `current` spans covered+1 cities
        if covered + 1 < n {
            matrix.set(current, start, f64::INFINITY);
        }
    }
}

/// Rebuilds the ordered city sequence out of the accepted edges. The edges
/// must chain into a single cycle that starts from the first edge's source,
/// visits every city exactly once and comes back to its starting point;
/// anything else is a bug in the search and is reported as the dedicated
/// `Error::BrokenTour` kind.
pub fn reconstruct_tour(edges: &[Edge], n: usize) -> Result<Vec<usize>> {
    if edges.len() != n {
        return Err(Error::BrokenTour(format!(
            "expected {} edges, got {}",
            n,
            edges.len()
        )));
    }

    let mut successor: FxHashMap<usize, usize> = FxHashMap::default();
    for edge in edges {
        if successor.insert(edge.from, edge.to).is_some() {
            return Err(Error::BrokenTour(format!(
                "city {} has two outgoing edges",
                edge.from
            )));
        }
    }

    let start = edges[0].from;
    let mut route = Vec::with_capacity(n + 1);
    route.push(start);
    let mut current = start;
    for _ in 0..n {
        match successor.get(&current) {
            Some(&next) => {
                route.push(next);
                current = next;
            }
            None => {
                return Err(Error::BrokenTour(format!(
                    "city {current} has no outgoing edge"
                )))
            }
        }
        if current == start {
            break;
        }
    }

    if current != start {
        return Err(Error::BrokenTour("the walk never returns to its start".to_string()));
    }
    if route.len() != n + 1 {
        return Err(Error::BrokenTour(
            "the cycle closes before visiting every city".to_string(),
        ));
    }
    Ok(route)
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
