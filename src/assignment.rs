//! One-to-one assignment between projected contacts and detections
//!
//! Two strategies over the same cost matrix: exact Kuhn-Munkres minimization
//! and a row-order greedy scan. Ineligible pairs are encoded as infinite cost;
//! they enter the exact solver as a large finite sentinel (so a row can be
//! parked on a dummy column) and are discarded from the returned pairs.

use log::warn;
use ndarray::ArrayView2;
use pathfinding::prelude::{kuhn_munkres_min, Matrix};

use crate::types::AssignmentStrategy;

/// Fixed-point scale applied to pixel costs before integer solving
const COST_SCALE: f64 = 1000.0;
/// Sentinel cost for ineligible or padded entries
const SENTINEL: i64 = 1_000_000_000;

/// Result of one assignment round
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// (row, column) pairs; a bijection over the used indices
    pub pairs: Vec<(usize, usize)>,
    /// Strategy that actually produced the pairs
    pub strategy: AssignmentStrategy,
    /// Sum of the original costs of the returned pairs
    pub total_cost: f64,
}

/// Solve the assignment problem, preferring the requested strategy.
///
/// Falls back to greedy when the exact path is degenerate (empty matrix or no
/// eligible pair); the fallback is logged and visible in the outcome.
pub fn solve(costs: ArrayView2<f64>, preferred: AssignmentStrategy) -> AssignmentOutcome {
    match preferred {
        AssignmentStrategy::Greedy => solve_greedy(costs),
        AssignmentStrategy::Exact => solve_exact(costs).unwrap_or_else(|| {
            warn!(
                "exact assignment unavailable for {}x{} cost matrix, falling back to greedy",
                costs.nrows(),
                costs.ncols()
            );
            solve_greedy(costs)
        }),
    }
}

/// Exact Kuhn-Munkres assignment. `None` when the matrix is degenerate.
fn solve_exact(costs: ArrayView2<f64>) -> Option<AssignmentOutcome> {
    let rows = costs.nrows();
    let cols = costs.ncols();
    if rows == 0 || cols == 0 || !costs.iter().any(|c| c.is_finite()) {
        return None;
    }

    // Pad square so every row can be parked on a dummy column (and vice versa)
    let size = rows.max(cols);
    let mut weights = Matrix::new(size, size, SENTINEL);
    for i in 0..rows {
        for j in 0..cols {
            let cost = costs[[i, j]];
            if cost.is_finite() {
                weights[(i, j)] = ((cost * COST_SCALE) as i64).min(SENTINEL - 1);
            }
        }
    }

    let (_, assignment) = kuhn_munkres_min(&weights);

    let pairs: Vec<(usize, usize)> = assignment
        .iter()
        .enumerate()
        .filter(|&(i, &j)| i < rows && j < cols && costs[[i, j]].is_finite())
        .map(|(i, &j)| (i, j))
        .collect();

    let total_cost = pairs.iter().map(|&(i, j)| costs[[i, j]]).sum();

    Some(AssignmentOutcome {
        pairs,
        strategy: AssignmentStrategy::Exact,
        total_cost,
    })
}

/// Row-order greedy assignment: each row takes the cheapest still-unused
/// eligible column.
///
/// Deterministic but not globally optimal; an early row can claim a column
/// that would have suited a later row better.
fn solve_greedy(costs: ArrayView2<f64>) -> AssignmentOutcome {
    let rows = costs.nrows();
    let cols = costs.ncols();

    let mut pairs = Vec::new();
    let mut used_cols = vec![false; cols];

    for i in 0..rows {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..cols {
            if used_cols[j] {
                continue;
            }
            let cost = costs[[i, j]];
            if !cost.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, b)| cost < b) {
                best = Some((j, cost));
            }
        }
        if let Some((j, _)) = best {
            used_cols[j] = true;
            pairs.push((i, j));
        }
    }

    let total_cost = pairs.iter().map(|&(i, j)| costs[[i, j]]).sum();

    AssignmentOutcome {
        pairs,
        strategy: AssignmentStrategy::Greedy,
        total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};
    use std::collections::HashSet;

    const INF: f64 = f64::INFINITY;

    fn assert_bijection(pairs: &[(usize, usize)]) {
        let rows: HashSet<usize> = pairs.iter().map(|&(i, _)| i).collect();
        let cols: HashSet<usize> = pairs.iter().map(|&(_, j)| j).collect();
        assert_eq!(rows.len(), pairs.len());
        assert_eq!(cols.len(), pairs.len());
    }

    #[test]
    fn test_exact_simple_diagonal() {
        let costs = array![[1.0, 10.0], [10.0, 1.0]];
        let outcome = solve(costs.view(), AssignmentStrategy::Exact);
        assert_eq!(outcome.strategy, AssignmentStrategy::Exact);
        assert_eq!(outcome.pairs, vec![(0, 0), (1, 1)]);
        assert_abs_diff_eq!(outcome.total_cost, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exact_beats_rowwise_nearest_neighbour() {
        // Row 0's nearest column is 0, but taking it forces row 1 onto an
        // expensive column; the optimal pairing crosses over.
        let costs = array![[1.0, 2.0], [1.5, 100.0]];
        let exact = solve(costs.view(), AssignmentStrategy::Exact);
        assert_eq!(exact.pairs, vec![(0, 1), (1, 0)]);
        assert_abs_diff_eq!(exact.total_cost, 3.5, epsilon = 1e-9);

        let greedy = solve(costs.view(), AssignmentStrategy::Greedy);
        assert_eq!(greedy.pairs, vec![(0, 0), (1, 1)]);
        assert!(exact.total_cost <= greedy.total_cost);
    }

    #[test]
    fn test_greedy_row_order_steal() {
        // Row 0 takes column 0 first, leaving row 1 (whose only eligible
        // column was 0) unmatched; exact assignment keeps both rows matched
        let costs = array![[5.0, 6.0], [4.0, INF]];
        let greedy = solve(costs.view(), AssignmentStrategy::Greedy);
        assert_eq!(greedy.pairs, vec![(0, 0)]);

        let exact = solve(costs.view(), AssignmentStrategy::Exact);
        assert_eq!(exact.pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_ineligible_pairs_never_assigned() {
        let costs = array![[INF, 3.0], [INF, INF]];
        for strategy in [AssignmentStrategy::Exact, AssignmentStrategy::Greedy] {
            let outcome = solve(costs.view(), strategy);
            assert_eq!(outcome.pairs, vec![(0, 1)]);
        }
    }

    #[test]
    fn test_rectangular_matrices() {
        let wide = array![[2.0, 1.0, 5.0]];
        let outcome = solve(wide.view(), AssignmentStrategy::Exact);
        assert_eq!(outcome.pairs, vec![(0, 1)]);

        let tall = array![[2.0], [1.0], [5.0]];
        let outcome = solve(tall.view(), AssignmentStrategy::Exact);
        assert_eq!(outcome.pairs, vec![(1, 0)]);
        assert_bijection(&outcome.pairs);
    }

    #[test]
    fn test_empty_matrix_falls_back_to_greedy() {
        let costs = Array2::<f64>::zeros((0, 4));
        let outcome = solve(costs.view(), AssignmentStrategy::Exact);
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.strategy, AssignmentStrategy::Greedy);
    }

    #[test]
    fn test_all_ineligible_falls_back_to_greedy() {
        let costs = Array2::<f64>::from_elem((3, 3), INF);
        let outcome = solve(costs.view(), AssignmentStrategy::Exact);
        assert!(outcome.pairs.is_empty());
        assert_eq!(outcome.strategy, AssignmentStrategy::Greedy);
    }

    #[test]
    fn test_bijection_on_dense_matrix() {
        let costs = Array2::from_shape_fn((6, 4), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        for strategy in [AssignmentStrategy::Exact, AssignmentStrategy::Greedy] {
            let outcome = solve(costs.view(), strategy);
            assert_eq!(outcome.pairs.len(), 4);
            assert_bijection(&outcome.pairs);
        }
    }
}
