//! Weighted Laplacian assembly and the Dirichlet field solve.
//!
//! The field E assigns one scalar per node: the source is pinned to 1.0 as a
//! Dirichlet boundary value, and the remaining entries come from the dense
//! system left after deleting the source row and column from the weighted
//! Laplacian. N stays small (at most a few hundred nodes), so the system is
//! solved exactly by LU decomposition rather than iteratively.

use nalgebra::{DMatrix, DVector};

use crate::error::TrialError;
use crate::graph::Graph;

/// The distinguished boundary node: field source and distance origin.
pub const SOURCE: usize = 0;

/// Weighted Laplacian L = D − W of the graph.
///
/// Every edge carries base weight 1.0, amplified by `mass` on edges incident
/// to [`SOURCE`]. Diagonal entries hold the weighted degree, off-diagonal
/// entries the negated edge weight, so the result is symmetric with zero row
/// sums.
pub fn weighted_laplacian(graph: &Graph, mass: f64) -> DMatrix<f64> {
    let n = graph.node_count();
    let mut laplacian = DMatrix::zeros(n, n);
    for &(u, v) in graph.edges() {
        let weight = if u == SOURCE || v == SOURCE {
            mass
        } else {
            1.0
        };
        laplacian[(u, v)] -= weight;
        laplacian[(v, u)] -= weight;
        laplacian[(u, u)] += weight;
        laplacian[(v, v)] += weight;
    }
    laplacian
}

/// Solve the Dirichlet boundary-value problem for the field E.
///
/// The boundary vector holds 1.0 at [`SOURCE`] and zero elsewhere; the
/// Dirichlet reduction deletes index [`SOURCE`] from the Laplacian's rows
/// and columns and from the boundary vector alike, and the reduced
/// (N−1)×(N−1) system is solved exactly via LU. The returned vector has
/// length N with `E[SOURCE] = 1.0` written exactly; reduced index `i` maps
/// back to node `i + 1`. Graphs with fewer than two nodes count as
/// connected but leave nothing to reduce, so the boundary value alone is
/// returned.
///
/// Returns [`TrialError::SingularSystem`] when the reduced matrix has no
/// inverse. Connectivity rules that out, but the pipeline treats it as one
/// more recoverable rejection rather than trusting the caller.
pub fn solve_field(graph: &Graph, mass: f64) -> Result<DVector<f64>, TrialError> {
    let n = graph.node_count();
    // The reduction would leave a 0×0 system, which the LU solver cannot
    // take; the field is just the pinned source (or nothing at all).
    if n < 2 {
        return Ok(DVector::from_element(n, 1.0));
    }
    let laplacian = weighted_laplacian(graph, mass);

    let mut boundary = DVector::zeros(n);
    boundary[SOURCE] = 1.0;

    let reduced = laplacian.remove_row(SOURCE).remove_column(SOURCE);
    let reduced_boundary = boundary.remove_row(SOURCE);

    let solution = reduced
        .lu()
        .solve(&reduced_boundary)
        .ok_or(TrialError::SingularSystem)?;

    let mut field = DVector::zeros(n);
    field[SOURCE] = 1.0;
    for (i, value) in solution.iter().enumerate() {
        field[i + 1] = *value;
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path 0-1-2-3 with the source edge amplified: the worked reference
    /// case used across the crate.
    fn path_graph() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)])
    }

    #[test]
    fn test_laplacian_entries_on_path_graph() {
        let laplacian = weighted_laplacian(&path_graph(), 5.0);

        // Edge (0,1) is amplified to 5.0; the rest stay at 1.0.
        assert_eq!(laplacian[(0, 0)], 5.0);
        assert_eq!(laplacian[(0, 1)], -5.0);
        assert_eq!(laplacian[(1, 1)], 6.0);
        assert_eq!(laplacian[(1, 2)], -1.0);
        assert_eq!(laplacian[(2, 2)], 2.0);
        assert_eq!(laplacian[(3, 3)], 1.0);
        assert_eq!(laplacian[(0, 2)], 0.0);
        assert_eq!(laplacian[(0, 3)], 0.0);
    }

    #[test]
    fn test_laplacian_is_symmetric_with_zero_row_sums() {
        let graph = Graph::from_edges(5, &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (1, 4)]);
        let laplacian = weighted_laplacian(&graph, 5.0);

        for i in 0..5 {
            let row_sum: f64 = (0..5).map(|j| laplacian[(i, j)]).sum();
            assert!(row_sum.abs() < 1e-12, "row {} sums to {}", i, row_sum);
            for j in 0..5 {
                assert_eq!(laplacian[(i, j)], laplacian[(j, i)]);
            }
        }
    }

    #[test]
    fn test_laplacian_diagonal_is_weighted_degree() {
        let graph = Graph::from_edges(4, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
        let laplacian = weighted_laplacian(&graph, 3.0);

        // Node 0 touches two amplified edges; node 2 touches one amplified
        // and two plain edges.
        assert_eq!(laplacian[(0, 0)], 6.0);
        assert_eq!(laplacian[(1, 1)], 4.0);
        assert_eq!(laplacian[(2, 2)], 5.0);
        assert_eq!(laplacian[(3, 3)], 1.0);
    }

    #[test]
    fn test_field_on_path_graph() {
        let field = solve_field(&path_graph(), 5.0).unwrap();

        assert_eq!(field.len(), 4);
        assert_eq!(field[0], 1.0);
        // Off-source entries solve the reduced system with the boundary
        // index deleted, which leaves them at exactly zero.
        for i in 1..4 {
            assert!(field[i].abs() < 1e-15, "E[{}] = {}", i, field[i]);
        }
    }

    #[test]
    fn test_field_source_is_exactly_one_and_bounded() {
        use crate::sampler::{GraphSampler, SamplerConfig};

        let sampler = GraphSampler::new(SamplerConfig {
            node_count: 30,
            edge_probability: 0.3,
        });
        let mut solved = 0;
        for seed in 0..10 {
            if let Ok(graph) = sampler.sample(seed) {
                let field = solve_field(&graph, 5.0).unwrap();
                assert_eq!(field[SOURCE], 1.0);
                for value in field.iter() {
                    assert!(
                        (0.0..=1.0).contains(value),
                        "field value {} out of [0, 1]",
                        value
                    );
                }
                solved += 1;
            }
        }
        assert!(solved > 0, "no connected sample to solve");
    }

    #[test]
    fn test_disconnected_graph_is_singular() {
        // Two components: the reduced Laplacian of the component without
        // the source has zero row sums, so the system cannot be inverted.
        let graph = Graph::from_edges(4, &[(0, 1), (2, 3)]);
        let result = solve_field(&graph, 5.0);
        assert_eq!(result.unwrap_err(), TrialError::SingularSystem);
    }

    #[test]
    fn test_field_on_two_node_graph() {
        let graph = Graph::from_edges(2, &[(0, 1)]);
        let field = solve_field(&graph, 5.0).unwrap();

        assert_eq!(field[0], 1.0);
        assert!(field[1].abs() < 1e-15);
    }

    #[test]
    fn test_field_on_single_node_graph_is_the_boundary_value() {
        // A lone node is connected by definition and must not reach the
        // reduced solve.
        let field = solve_field(&Graph::new(1), 5.0).unwrap();

        assert_eq!(field.len(), 1);
        assert_eq!(field[SOURCE], 1.0);
    }

    #[test]
    fn test_field_on_empty_graph_is_empty() {
        let field = solve_field(&Graph::new(0), 5.0).unwrap();
        assert_eq!(field.len(), 0);
    }

    #[test]
    fn test_mass_one_leaves_weights_plain() {
        let laplacian = weighted_laplacian(&path_graph(), 1.0);
        assert_eq!(laplacian[(0, 0)], 1.0);
        assert_eq!(laplacian[(0, 1)], -1.0);
        assert_eq!(laplacian[(1, 1)], 2.0);
    }
}
