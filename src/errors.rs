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

//! This module defines the error taxonomy of the library. Validation errors
//! are raised eagerly, before any computation starts. An infeasible instance
//! is *not* an error: it is reported through a `Completion` with no solution.
//! `BrokenTour` stands apart: it flags an internal invariant violation (the
//! accepted edges did not chain into a single Hamiltonian cycle) and thus a
//! bug in the search, never a property of the input.

use thiserror::Error;

/// Anything that can go wrong while validating an instance or running a
/// solver on it.
#[derive(Debug, Error)]
pub enum Error {
    /// The distance matrix is not square.
    #[error("the distance matrix must be square: row {row} has {len} entries but there are {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },
    /// A tour over fewer than 3 cities is not meaningful.
    #[error("a tour needs at least 3 cities, got {0}")]
    TooFewCities(usize),
    /// The label list and the matrix disagree on the number of cities.
    #[error("got {labels} city labels for a {cities}x{cities} distance matrix")]
    LabelMismatch { labels: usize, cities: usize },
    /// Distances must be non-negative.
    #[error("the distance from city {from} to city {to} is negative ({value})")]
    NegativeDistance { from: usize, to: usize, value: f64 },
    /// Distances must be numbers (or the infinity sentinel).
    #[error("the distance from city {from} to city {to} is not a number")]
    NotANumber { from: usize, to: usize },
    /// The caller assumes a symmetric instance; an asymmetric matrix is
    /// rejected rather than silently mis-solved.
    #[error("the distance matrix must be symmetric: cells ({i}, {j}) and ({j}, {i}) differ")]
    Asymmetric { i: usize, j: usize },
    /// A distance pair referenced a label that is not part of the instance.
    #[error("unknown city label '{0}'")]
    UnknownCity(String),
    /// The accepted edge set does not form a single cycle covering every
    /// city exactly once. This indicates a defect in the search itself.
    #[error("internal error: accepted edges do not chain into a tour ({0})")]
    BrokenTour(String),
}

/// Convenient result alias used across the whole crate.
pub type Result<T> = std::result::Result<T, Error>;
