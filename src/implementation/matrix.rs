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

//! This module provides the cost matrix on which the whole search operates,
//! along with the two primitives at the heart of the algorithm: row/column
//! reduction (which yields the additive lower bound contribution) and the
//! selection of the zero cell with the largest penalty (which decides the
//! edge to branch on). Unreachable pairs are represented by `f64::INFINITY`;
//! an infinity is never subtracted, never summed into a reduction cost and
//! never selected.

use fxhash::FxHashSet;
use itertools::Itertools;

/// A dense, square cost matrix. Each search node owns its private copy, so
/// there is never any shared mutable state between branches.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    n: usize,
    cells: Vec<f64>,
}

/// The outcome of reducing a matrix: the summed minima (a valid additive
/// lower bound contribution, since any tour must consume exactly one entry
/// per row and per column) plus the per-row and per-column amounts, kept so
/// the trace can show where the bound comes from.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction {
    pub cost: f64,
    pub rows: Vec<(usize, f64)>,
    pub cols: Vec<(usize, f64)>,
}

impl Reduction {
    /// Human readable summary of the reduction, e.g.
    /// `Row reductions: R1(-10), R3(-15)` on one line and the column
    /// reductions on the next. Empty when nothing was subtracted.
    pub fn detail(&self) -> String {
        let mut lines = Vec::new();
        if !self.rows.is_empty() {
            let rows = self
                .rows
                .iter()
                .map(|(i, v)| format!("R{}(-{})", i + 1, format_value(*v)))
                .join(", ");
            lines.push(format!("Row reductions: {rows}"));
        }
        if !self.cols.is_empty() {
            let cols = self
                .cols
                .iter()
                .map(|(j, v)| format!("C{}(-{})", j + 1, format_value(*v)))
                .join(", ");
            lines.push(format!("Column reductions: {cols}"));
        }
        lines.join("\n")
    }
}

/// A zero cell picked for branching, together with its penalty: the sum of
/// the minimum remaining value in its row and in its column, excluding the
/// cell itself. The higher the penalty, the more it would cost *not* to take
/// this edge, hence the most consequential zero is branched on first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZeroChoice {
    pub row: usize,
    pub col: usize,
    pub penalty: f64,
}

impl CostMatrix {
    /// Builds a matrix from row slices. The caller (the instance validation)
    /// guarantees squareness.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for row in rows {
            cells.extend_from_slice(row);
        }
        Self { n, cells }
    }

    /// The dimension (number of cities) of this matrix.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// The value stored at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.n + col]
    }

    /// Overwrites the value stored at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.n + col] = value;
    }

    /// Reduces this matrix in place and returns the reduction.
    ///
    /// Every row containing at least one finite value has its minimum finite
    /// value subtracted from all its finite entries (when that minimum is
    /// strictly positive); the same is then applied per column on the row
    /// reduced matrix. Rows and columns that are entirely infinite are left
    /// alone and contribute zero. Reducing an already reduced matrix is a
    /// no-op with cost 0.
    pub fn reduce(&mut self) -> Reduction {
        let n = self.n;
        let mut cost = 0.0;
        let mut rows = Vec::new();
        let mut cols = Vec::new();

        for i in 0..n {
            let min = (0..n).map(|j| self.get(i, j)).fold(f64::INFINITY, f64::min);
            if min.is_finite() && min > 0.0 {
                cost += min;
                rows.push((i, min));
                for j in 0..n {
                    let v = self.get(i, j);
                    if v.is_finite() {
                        self.set(i, j, v - min);
                    }
                }
            }
        }
        for j in 0..n {
            let min = (0..n).map(|i| self.get(i, j)).fold(f64::INFINITY, f64::min);
            if min.is_finite() && min > 0.0 {
                cost += min;
                cols.push((j, min));
                for i in 0..n {
                    let v = self.get(i, j);
                    if v.is_finite() {
                        self.set(i, j, v - min);
                    }
                }
            }
        }

        Reduction { cost, rows, cols }
    }

    /// Selects, among the cells equal to zero whose row and column are still
    /// unused, the one with the largest penalty. Ties keep the first
    /// candidate in row-major order, which makes the search deterministic.
    /// Returns `None` when no selectable zero remains.
    pub fn best_zero(
        &self,
        used_from: &FxHashSet<usize>,
        used_to: &FxHashSet<usize>,
    ) -> Option<ZeroChoice> {
        let n = self.n;
        let mut best: Option<ZeroChoice> = None;
        for row in 0..n {
            if used_from.contains(&row) {
                continue;
            }
            for col in 0..n {
                if used_to.contains(&col) || self.get(row, col) != 0.0 {
                    continue;
                }
                let row_min = self.row_min_excluding(row, col);
                let col_min = self.col_min_excluding(col, row);
                let penalty = finite_or_zero(row_min) + finite_or_zero(col_min);
                if best.map_or(true, |b| penalty > b.penalty) {
                    best = Some(ZeroChoice { row, col, penalty });
                }
            }
        }
        best
    }

    /// Checks that every unused source row and unused destination column
    /// still holds at least one finite entry. A node failing this check can
    /// never be completed into a tour and is dropped instead of being left
    /// to starve on infinite arithmetic.
    pub fn is_feasible(&self, used_from: &FxHashSet<usize>, used_to: &FxHashSet<usize>) -> bool {
        let n = self.n;
        for row in 0..n {
            if !used_from.contains(&row) && (0..n).all(|col| !self.get(row, col).is_finite()) {
                return false;
            }
        }
        for col in 0..n {
            if !used_to.contains(&col) && (0..n).all(|row| !self.get(row, col).is_finite()) {
                return false;
            }
        }
        true
    }

    /// Renders the matrix as tab separated text with labeled rows and
    /// columns, using `∞` for unreachable entries. This is the snapshot
    /// format attached to trace steps.
    pub fn render(&self, labels: &[String]) -> String {
        let header = std::iter::once(String::new())
            .chain(labels.iter().cloned())
            .join("\t");
        let rows = (0..self.n).map(|i| {
            std::iter::once(labels[i].clone())
                .chain((0..self.n).map(|j| format_value(self.get(i, j))))
                .join("\t")
        });
        std::iter::once(header).chain(rows).join("\n")
    }

    fn row_min_excluding(&self, row: usize, skip_col: usize) -> f64 {
        (0..self.n)
            .filter(|&col| col != skip_col)
            .map(|col| self.get(row, col))
            .fold(f64::INFINITY, f64::min)
    }

    fn col_min_excluding(&self, col: usize, skip_row: usize) -> f64 {
        (0..self.n)
            .filter(|&row| row != skip_row)
            .map(|row| self.get(row, col))
            .fold(f64::INFINITY, f64::min)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Formats a single cost: `∞` for unreachable, no decimals for integral
/// values, two decimals otherwise.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        "∞".to_string()
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
