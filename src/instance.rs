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

//! This module defines the TSP instance as it is consumed from the calling
//! code: an ordered list of city labels plus a symmetric distance matrix.
//! All of the input validation mandated by the problem happens here, eagerly,
//! so that the solvers themselves never have to worry about ill-formed data.

use crate::{CostMatrix, Error, Result};

/// A validated TSP instance.
///
/// Invariants enforced at construction time:
/// * the matrix is square and matches the number of labels,
/// * there are at least 3 cities,
/// * every off-diagonal entry is either a non-negative finite number or the
///   `f64::INFINITY` sentinel standing for "no direct edge",
/// * the matrix is symmetric,
/// * the diagonal is infinite (no self loops), whatever the caller put there.
#[derive(Clone, Debug)]
pub struct Instance {
    labels: Vec<String>,
    matrix: CostMatrix,
}

impl Instance {
    /// Validates the given labels and full distance matrix and builds the
    /// instance. The diagonal is forced to infinity; every other cell must
    /// hold a symmetric, non-negative value (or infinity for "unreachable").
    pub fn new(labels: Vec<String>, distances: Vec<Vec<f64>>) -> Result<Self> {
        let n = distances.len();
        for (row, r) in distances.iter().enumerate() {
            if r.len() != n {
                return Err(Error::NotSquare { row, len: r.len(), n });
            }
        }
        if n < 3 {
            return Err(Error::TooFewCities(n));
        }
        if labels.len() != n {
            return Err(Error::LabelMismatch { labels: labels.len(), cities: n });
        }
        for (i, row) in distances.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                if value.is_nan() {
                    return Err(Error::NotANumber { from: i, to: j });
                }
                if value < 0.0 {
                    return Err(Error::NegativeDistance { from: i, to: j, value });
                }
                // INFINITY == INFINITY holds, so unreachable pairs are fine
                if i < j && value != distances[j][i] {
                    return Err(Error::Asymmetric { i, j });
                }
            }
        }

        let mut matrix = CostMatrix::from_rows(&distances);
        for i in 0..n {
            matrix.set(i, i, f64::INFINITY);
        }
        Ok(Self { labels, matrix })
    }

    /// Builds an instance from the sparse form used by interactive callers:
    /// a list of `(from_label, to_label, distance)` entries. Pairs that are
    /// never mentioned are unreachable; mentioning a pair fills both of its
    /// symmetric cells.
    pub fn from_pairs(labels: Vec<String>, pairs: &[(&str, &str, f64)]) -> Result<Self> {
        let n = labels.len();
        let mut distances = vec![vec![f64::INFINITY; n]; n];
        let index_of = |label: &str| -> Result<usize> {
            labels
                .iter()
                .position(|l| l == label)
                .ok_or_else(|| Error::UnknownCity(label.to_string()))
        };
        for &(from, to, value) in pairs {
            let i = index_of(from)?;
            let j = index_of(to)?;
            distances[i][j] = value;
            distances[j][i] = value;
        }
        Self::new(labels, distances)
    }

    /// The number of cities of this instance.
    pub fn nb_cities(&self) -> usize {
        self.labels.len()
    }
    /// The ordered city labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
    /// The display label of the given city.
    pub fn label(&self, city: usize) -> &str {
        &self.labels[city]
    }
    /// The validated distance matrix (diagonal forced to infinity).
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }
    /// Renders the given route ("A → B → D → C → A") with this instance's
    /// labels.
    pub fn render_route(&self, route: &[usize]) -> String {
        route
            .iter()
            .map(|&city| self.label(city))
            .collect::<Vec<_>>()
            .join(" → ")
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_instance {
    use crate::{Error, Instance};

    const INF: f64 = f64::INFINITY;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn square(n: usize, value: f64) -> Vec<Vec<f64>> {
        vec![vec![value; n]; n]
    }

    #[test]
    fn a_valid_instance_passes_validation() {
        let inst = Instance::new(labels(&["A", "B", "C"]), square(3, 7.0)).unwrap();
        assert_eq!(3, inst.nb_cities());
        assert_eq!("B", inst.label(1));
    }

    #[test]
    fn the_diagonal_is_forced_to_infinity() {
        let inst = Instance::new(labels(&["A", "B", "C"]), square(3, 7.0)).unwrap();
        for i in 0..3 {
            assert!(inst.matrix().get(i, i).is_infinite());
        }
    }

    #[test]
    fn a_ragged_matrix_is_rejected() {
        let mut distances = square(3, 1.0);
        distances[1].push(4.0);
        let err = Instance::new(labels(&["A", "B", "C"]), distances).unwrap_err();
        assert!(matches!(err, Error::NotSquare { row: 1, len: 4, n: 3 }));
    }

    #[test]
    fn fewer_than_three_cities_are_rejected() {
        let err = Instance::new(labels(&["A", "B"]), square(2, 1.0)).unwrap_err();
        assert!(matches!(err, Error::TooFewCities(2)));
    }

    #[test]
    fn a_label_count_mismatch_is_rejected() {
        let err = Instance::new(labels(&["A", "B"]), square(3, 1.0)).unwrap_err();
        assert!(matches!(err, Error::LabelMismatch { labels: 2, cities: 3 }));
    }

    #[test]
    fn negative_distances_are_rejected() {
        let mut distances = square(3, 1.0);
        distances[0][2] = -3.0;
        distances[2][0] = -3.0;
        let err = Instance::new(labels(&["A", "B", "C"]), distances).unwrap_err();
        assert!(matches!(err, Error::NegativeDistance { from: 0, to: 2, .. }));
    }

    #[test]
    fn nan_distances_are_rejected() {
        let mut distances = square(3, 1.0);
        distances[0][1] = f64::NAN;
        let err = Instance::new(labels(&["A", "B", "C"]), distances).unwrap_err();
        assert!(matches!(err, Error::NotANumber { from: 0, to: 1 }));
    }

    #[test]
    fn an_asymmetric_matrix_is_rejected() {
        let mut distances = square(3, 1.0);
        distances[0][1] = 2.0;
        let err = Instance::new(labels(&["A", "B", "C"]), distances).unwrap_err();
        assert!(matches!(err, Error::Asymmetric { i: 0, j: 1 }));
    }

    #[test]
    fn unreachable_pairs_are_symmetric_too() {
        let mut distances = square(3, 1.0);
        distances[0][1] = INF;
        distances[1][0] = INF;
        assert!(Instance::new(labels(&["A", "B", "C"]), distances).is_ok());
    }

    #[test]
    fn from_pairs_fills_both_symmetric_cells() {
        let inst = Instance::from_pairs(
            labels(&["A", "B", "C"]),
            &[("A", "B", 10.0), ("B", "C", 20.0), ("A", "C", 30.0)],
        )
        .unwrap();
        assert_eq!(10.0, inst.matrix().get(0, 1));
        assert_eq!(10.0, inst.matrix().get(1, 0));
        assert_eq!(20.0, inst.matrix().get(2, 1));
    }

    #[test]
    fn from_pairs_rejects_unknown_labels() {
        let err = Instance::from_pairs(labels(&["A", "B", "C"]), &[("A", "Z", 1.0)]).unwrap_err();
        assert!(matches!(err, Error::UnknownCity(label) if label == "Z"));
    }

    #[test]
    fn from_pairs_leaves_unmentioned_pairs_unreachable() {
        let inst =
            Instance::from_pairs(labels(&["A", "B", "C"]), &[("A", "B", 10.0)]).unwrap();
        assert!(inst.matrix().get(1, 2).is_infinite());
    }

    #[test]
    fn routes_render_with_labels() {
        let inst = Instance::new(labels(&["A", "B", "C"]), square(3, 1.0)).unwrap();
        assert_eq!("A → C → B → A", inst.render_route(&[0, 2, 1, 0]));
    }
}
