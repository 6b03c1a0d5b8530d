//! Jacobian matrix types and the pseudo-inverse.
//!
//! A transform's local differential at a point is an `OUT × IN` matrix of
//! partial derivatives; its inverse is derived per call by singular-value
//! decomposition so that non-square and singular Jacobians degrade to the
//! Moore-Penrose pseudo-inverse instead of failing.

use nalgebra::{DMatrix, SMatrix};

/// The forward differential of a transform at a point: `OUT × IN` partial
/// derivatives of output coordinates with respect to input coordinates.
pub type PositionJacobian<const IN: usize, const OUT: usize> = SMatrix<f64, OUT, IN>;

/// The inverse differential: `IN × OUT`, true inverse when the Jacobian is
/// square and non-singular, Moore-Penrose pseudo-inverse otherwise.
pub type InversePositionJacobian<const IN: usize, const OUT: usize> = SMatrix<f64, IN, OUT>;

/// Invert a Jacobian by singular-value decomposition.
///
/// Singular values below `eps * max(IN, OUT) * sigma_max` are treated as
/// zero, so an ill-conditioned Jacobian yields a pseudo-inverse rather than
/// an error;
/// callers must interpret numerically unstable results themselves. Cost is
/// cubic in the larger dimension and paid on every call: parameters may
/// change between calls, so nothing is cached.
pub fn pseudo_invert<const IN: usize, const OUT: usize>(
    jacobian: &PositionJacobian<IN, OUT>,
) -> InversePositionJacobian<IN, OUT> {
    let dense = DMatrix::from_fn(OUT, IN, |i, j| jacobian[(i, j)]);
    let svd = dense.svd(true, true);
    let cutoff = f64::EPSILON * OUT.max(IN) as f64 * svd.singular_values.max();
    match svd.pseudo_inverse(cutoff) {
        Ok(inverse) => SMatrix::from_fn(|i, j| inverse[(i, j)]),
        // pseudo_inverse only rejects a negative cutoff
        Err(_) => SMatrix::zeros(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_inverts_to_identity() {
        let jacobian = PositionJacobian::<3, 3>::identity();
        let inverse = pseudo_invert(&jacobian);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((inverse[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_square_inverse_composes_to_identity() {
        let jacobian = PositionJacobian::<2, 2>::new(2.0, 1.0, 0.5, 3.0);
        let inverse = pseudo_invert(&jacobian);
        let product = jacobian * inverse;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product[(i, j)] - expected).abs() < 1e-12,
                    "entry ({}, {}): {}",
                    i,
                    j,
                    product[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_non_square_pseudo_inverse() {
        // A full-row-rank 2x3 projection: J * J+ must be the 2x2 identity.
        let jacobian = PositionJacobian::<3, 2>::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let inverse = pseudo_invert(&jacobian);
        let product = jacobian * inverse;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_jacobian_degrades_silently() {
        // Rank-1 matrix: the pseudo-inverse exists, no failure.
        let jacobian = PositionJacobian::<2, 2>::new(1.0, 2.0, 2.0, 4.0);
        let inverse = pseudo_invert(&jacobian);
        // Moore-Penrose: J * J+ * J == J
        let reconstructed = jacobian * inverse * jacobian;
        for i in 0..2 {
            for j in 0..2 {
                assert!((reconstructed[(i, j)] - jacobian[(i, j)]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_jacobian_gives_zero_pseudo_inverse() {
        let jacobian = PositionJacobian::<2, 2>::zeros();
        let inverse = pseudo_invert(&jacobian);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(inverse[(i, j)], 0.0);
            }
        }
    }
}
